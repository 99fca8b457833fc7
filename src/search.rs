use std::time::Instant;

use dogs::search_algorithm::StoppingCriterion;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::color::Graph;
use crate::error::ColorError;
use crate::params::Parameters;
use crate::population::{Perturbation, Population};


/// state of the search driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrialState {
    /// the next step runs a trial with k colors
    Trialing(usize),
    /// a proper coloring with k colors was found
    TrialSucceeded(usize),
    /// no proper coloring with k colors was found within the budget
    TrialFailed(usize),
    /// terminal state
    Done,
}

/// number of colors of the first trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingBound {
    /// Δ(G)+1, always feasible
    MaxDegree,
    /// given number of colors (at least 1)
    Fixed(usize),
}

impl StartingBound {
    /// number of colors used by the first trial
    pub fn initial_nb_colors(&self, graph:&Graph) -> Result<usize, ColorError> {
        match self {
            StartingBound::MaxDegree => Ok(graph.max_degree() + 1),
            StartingBound::Fixed(0) => Err(ColorError::config("the starting number of colors must be at least 1")),
            StartingBound::Fixed(k) => Ok(*k),
        }
    }
}

/// statistics of a single trial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    /// number of colors of the trial
    pub nb_colors: usize,
    /// true if a proper coloring was found
    pub success: bool,
    /// number of generations performed
    pub generations: usize,
    /// fewest conflicts reached
    pub best_conflicts: usize,
    /// duration of the trial (seconds)
    pub time: f32,
}

/// result of the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchOutcome {
    /// best proper coloring found
    Colored {
        /// number of colors of the coloring
        nb_colors: usize,
        /// colors[v]: color of the vertex v
        colors: Vec<usize>,
    },
    /// even the first trial failed: only the starting bound is known
    NoImprovementFound {
        /// number of colors of the first trial
        upper_bound: usize,
    },
}

impl SearchOutcome {
    /// best number of colors known (the starting bound if nothing was found)
    pub fn nb_colors(&self) -> usize {
        match self {
            SearchOutcome::Colored { nb_colors, .. } => *nb_colors,
            SearchOutcome::NoImprovementFound { upper_bound } => *upper_bound,
        }
    }
}

/// outcome and per-trial statistics
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// result of the search
    pub outcome: SearchOutcome,
    /// one report per trial, in execution order
    pub trials: Vec<TrialReport>,
}


/**
Population-based Lévy flight search for the graph coloring.
Runs trials with a decreasing number of colors k. A trial:
 1. creates a random population with k colors
 2. for at most t generations: perturbs every member but the elite (restarting the ones
    that stagnated), counts conflicts, keeps the best members and refills the population
    with their copies
 3. succeeds as soon as a member has no conflicts
A successful trial at k is followed by a trial at k-1. The search ends at the first failure.
*/
#[derive(Debug)]
pub struct SearchDriver<'a, R, S> {
    /// graph to color
    graph: &'a Graph,
    /// search parameters
    params: Parameters,
    /// perturbation operator
    perturbation: Perturbation,
    /// random number generator (only source of randomness of the search)
    rng: R,
    /// wall clock limit
    stopping: S,
    /// current state
    state: TrialState,
    /// number of colors of the first trial
    upper_bound: usize,
    /// (k, colors) of the last successful trial
    best_known: Option<(usize, Vec<usize>)>,
    /// statistics of the trials performed
    trials: Vec<TrialReport>,
}

impl<'a, R:Rng, S:StoppingCriterion> SearchDriver<'a, R, S> {

    /// creates a driver in the state Trialing(k0). Fails if a parameter is out of its domain.
    pub fn new(
        graph:&'a Graph,
        params:Parameters,
        start:StartingBound,
        rng:R,
        stopping:S
    ) -> Result<Self, ColorError> {
        params.validate()?;
        let upper_bound = start.initial_nb_colors(graph)?;
        Ok(Self {
            graph,
            params,
            perturbation: Perturbation::from_parameters(&params),
            rng,
            stopping,
            state: TrialState::Trialing(upper_bound),
            upper_bound,
            best_known: None,
            trials: Vec::new(),
        })
    }

    /// current state
    pub fn state(&self) -> TrialState { self.state }

    /// number of colors of the best coloring found so far
    pub fn best_known(&self) -> Option<usize> { self.best_known.as_ref().map(|(k,_)| *k) }

    /// statistics of the trials performed so far
    pub fn trials(&self) -> &[TrialReport] { &self.trials }

    /// performs one transition of the state machine and returns the new state
    pub fn step(&mut self) -> TrialState {
        self.state = match self.state {
            TrialState::Trialing(k) => {
                let (report, winner) = self.run_trial(k);
                self.trials.push(report);
                match winner {
                    Some(colors) => {
                        self.best_known = Some((k, colors));
                        TrialState::TrialSucceeded(k)
                    },
                    None => TrialState::TrialFailed(k),
                }
            },
            TrialState::TrialSucceeded(k) => {
                if k <= 1 {
                    TrialState::Done
                } else if self.stopping.is_finished() {
                    info!("time limit reached, stopping at {} colors", k);
                    TrialState::Done
                } else {
                    TrialState::Trialing(k-1)
                }
            },
            TrialState::TrialFailed(_) | TrialState::Done => TrialState::Done,
        };
        self.state
    }

    /// runs the state machine until Done
    pub fn run(mut self) -> SearchReport {
        while self.step() != TrialState::Done {}
        let outcome = match self.best_known {
            Some((nb_colors, colors)) => SearchOutcome::Colored { nb_colors, colors },
            None => {
                info!("no proper coloring found with {} colors", self.upper_bound);
                SearchOutcome::NoImprovementFound { upper_bound: self.upper_bound }
            }
        };
        SearchReport { outcome, trials: self.trials }
    }

    /// searches a proper coloring with k colors. Returns the statistics and the coloring if found.
    fn run_trial(&mut self, k:usize) -> (TrialReport, Option<Vec<usize>>) {
        let time_start = Instant::now();
        let graph = self.graph;
        let nb_survivors = self.params.nb_survivors();
        let mut pop = Population::initialize(graph, self.params.population_size, k, &mut self.rng);
        let mut scores = pop.evaluate();
        let mut elite = Population::best_index(&scores);
        let mut best_conflicts = scores[elite];
        let mut generations = 0;
        while best_conflicts > 0 && generations < self.params.generations {
            if self.stopping.is_finished() {
                info!("time limit reached during the trial with {} colors", k);
                break;
            }
            pop.perturb(&self.perturbation, elite, &mut self.rng);
            scores = pop.evaluate();
            pop.record_progress(&scores);
            generations += 1;
            elite = Population::best_index(&scores);
            if scores[elite] < best_conflicts {
                best_conflicts = scores[elite];
                debug!("k={:<5} gen={:<8} conflicts={}", k, generations, best_conflicts);
            }
            if best_conflicts == 0 { break; }
            pop = pop.select_survivors(&scores, nb_survivors);
            elite = 0;
        }
        let time = time_start.elapsed().as_secs_f32();
        let winner = if best_conflicts == 0 {
            info!("k={:<5} proper coloring found after {} generations ({:.3} seconds)", k, generations, time);
            Some(pop.members()[elite].colors().to_vec())
        } else {
            info!("k={:<5} {} conflicts left after {} generations ({:.3} seconds)", k, best_conflicts, generations, time);
            None
        };
        let report = TrialReport {
            nb_colors: k,
            success: winner.is_some(),
            generations,
            best_conflicts,
            time,
        };
        (report, winner)
    }
}


/**
Runs the Lévy flight search on a graph with a seeded random number generator,
until a trial fails or the stopping criterion is reached.
*/
pub fn levy_coloring<Stopping:StoppingCriterion>(
    graph:&Graph,
    params:Parameters,
    start:StartingBound,
    seed:u64,
    stopping:Stopping
) -> Result<SearchReport, ColorError> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let driver = SearchDriver::new(graph, params, start, rng, stopping)?;
    Ok(driver.run())
}

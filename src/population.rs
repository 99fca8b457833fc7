use rand::Rng;
use rand::seq::{index, SliceRandom};

use crate::color::Graph;
use crate::coloring::Coloring;
use crate::conflicts::{count_conflicts, conflicting_vertices};
use crate::levy::LevySampler;
use crate::params::Parameters;


/**
Lévy-driven perturbation of a coloring. Two moves:
 - local (probability 1-p): pick a conflicting vertex (any vertex if none conflicts), sample a
   step s and move it from color c to (c + 1 + round(s) mod (k-1)) mod k. The new color always
   differs from the previous one. Does nothing if k = 1.
 - global (probability p): sample a step s and copy the elite color of round(s) distinct random
   vertices (bounded by the number of vertices).

A member that did not improve for `lifetime_limit` generations is re-initialized instead.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    /// step sampler
    sampler: LevySampler,
    /// probability of a global move
    switch_probability: f64,
    /// generations without improvement before a restart
    lifetime_limit: usize,
}

impl Perturbation {
    /** creates a perturbation operator.

    # Panics
    - if switch_probability is not in [0,1]
    - if lifetime_limit is 0
    */
    pub fn new(sampler:LevySampler, switch_probability:f64, lifetime_limit:usize) -> Self {
        assert!((0. ..=1.).contains(&switch_probability));
        assert!(lifetime_limit >= 1);
        Self { sampler, switch_probability, lifetime_limit }
    }

    /// builds the operator described by the search parameters
    pub fn from_parameters(params:&Parameters) -> Self {
        Self::new(
            LevySampler::new(params.lambda, params.max_step),
            params.switch_probability,
            params.lifetime_limit
        )
    }

    /// generations without improvement before a restart
    pub fn lifetime_limit(&self) -> usize { self.lifetime_limit }

    /// perturbs a coloring (elite: best coloring of the population)
    pub fn apply<R:Rng>(&self, coloring:&mut Coloring, elite:&Coloring, rng:&mut R) {
        if rng.gen_bool(self.switch_probability) {
            self.pollinate(coloring, elite, rng);
        } else {
            self.local_move(coloring, rng);
        }
    }

    /// copies the elite color on a Lévy-sized random subset of vertices
    pub fn pollinate<R:Rng>(&self, coloring:&mut Coloring, elite:&Coloring, rng:&mut R) {
        let n = coloring.graph().nb_vertices();
        if n == 0 { return; }
        let nb_copied = self.sampler.sample_count(rng, n);
        for v in index::sample(rng, n, nb_copied).iter() {
            coloring.set_color(v, elite.color_of(v));
        }
    }

    /// recolors one (preferably conflicting) vertex by a Lévy step
    pub fn local_move<R:Rng>(&self, coloring:&mut Coloring, rng:&mut R) {
        let n = coloring.graph().nb_vertices();
        let k = coloring.nb_colors();
        if n == 0 || k < 2 { return; }
        let candidates = conflicting_vertices(coloring);
        let v = match candidates.choose(rng) {
            Some(v) => *v,
            None => rng.gen_range(0..n),
        };
        let step = self.sampler.sample(rng).round() as usize;
        let new_color = (coloring.color_of(v) + 1 + step % (k-1)) % k;
        coloring.set_color(v, new_color);
    }
}


/** fixed-size set of colorings sharing the same number of colors. */
#[derive(Debug, Clone)]
pub struct Population<'a> {
    /// colorings
    members: Vec<Coloring<'a>>,
    /// conflicts of each member at its last evaluation
    last_scores: Vec<usize>,
    /// lifetimes[i]: generations since member i last improved
    lifetimes: Vec<usize>,
}

impl<'a> Population<'a> {

    /// creates n colorings with k colors, each independently randomized
    pub fn initialize<R:Rng>(graph:&'a Graph, n:usize, k:usize, rng:&mut R) -> Self {
        let members:Vec<Coloring<'a>> = (0..n).map(|_| Coloring::random(graph, k, rng)).collect();
        let last_scores = members.iter().map(count_conflicts).collect();
        Self { members, last_scores, lifetimes: vec![0 ; n] }
    }

    /// number of colorings
    pub fn len(&self) -> usize { self.members.len() }

    /// true if the population contains no coloring
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// colorings of the population
    pub fn members(&self) -> &[Coloring<'a>] { &self.members }

    /// generations since the last improvement of each member
    pub fn lifetimes(&self) -> &[usize] { &self.lifetimes }

    /// number of conflicts of each member (recomputed)
    pub fn evaluate(&self) -> Vec<usize> {
        self.members.iter().map(count_conflicts).collect()
    }

    /// ages the members that did not improve since their last evaluation, resets the others
    pub fn record_progress(&mut self, scores:&[usize]) {
        assert_eq!(scores.len(), self.members.len());
        for (i,score) in scores.iter().enumerate() {
            if *score < self.last_scores[i] {
                self.lifetimes[i] = 0;
            } else {
                self.lifetimes[i] += 1;
            }
            self.last_scores[i] = *score;
        }
    }

    /// index of the first member with the fewest conflicts
    pub fn best_index(scores:&[usize]) -> usize {
        scores.iter().enumerate()
            .min_by_key(|(_,s)| **s)
            .map(|(i,_)| i)
            .unwrap_or(0)
    }

    /// perturbs every member but the elite. Stagnant members are re-initialized instead.
    pub fn perturb<R:Rng>(&mut self, perturbation:&Perturbation, elite:usize, rng:&mut R) {
        let elite_coloring = self.members[elite].clone();
        for (i,member) in self.members.iter_mut().enumerate() {
            if i == elite { continue; }
            if self.lifetimes[i] >= perturbation.lifetime_limit() {
                let k = member.nb_colors();
                member.randomize(k, rng);
                self.lifetimes[i] = 0;
                self.last_scores[i] = count_conflicts(member);
            } else {
                perturbation.apply(member, &elite_coloring, rng);
            }
        }
    }

    /**
    keeps the nb_survivors best members (stable on ties: the earlier member wins) and refills
    the population with copies of the survivors: slot j receives survivor j mod nb_survivors.
    The best member ends up in slot 0. Copies keep the lifetime of their survivor.
    */
    pub fn select_survivors(self, scores:&[usize], nb_survivors:usize) -> Self {
        assert_eq!(scores.len(), self.members.len());
        let n = self.members.len();
        let nb_survivors = nb_survivors.max(1).min(n);
        let mut order:Vec<usize> = (0..n).collect();
        order.sort_by_key(|i| scores[*i]);
        let survivors = &order[..nb_survivors];
        let pick = |j:usize| survivors[j % nb_survivors];
        Self {
            members: (0..n).map(|j| self.members[pick(j)].clone()).collect(),
            last_scores: (0..n).map(|j| self.last_scores[pick(j)]).collect(),
            lifetimes: (0..n).map(|j| self.lifetimes[pick(j)]).collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn perturbation(switch_probability:f64) -> Perturbation {
        Perturbation::new(LevySampler::new(2., 1000.), switch_probability, 30)
    }

    fn population<'a>(members:Vec<Coloring<'a>>) -> Population<'a> {
        let n = members.len();
        let last_scores = members.iter().map(count_conflicts).collect();
        Population { members, last_scores, lifetimes: vec![0 ; n] }
    }

    #[test]
    fn test_initialize() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let pop = Population::initialize(&graph, 10, 3, &mut rng);
        assert_eq!(pop.len(), 10);
        for m in pop.members() {
            assert_eq!(m.nb_colors(), 3);
            assert!(m.colors().iter().all(|c| *c < 3));
        }
        let scores = pop.evaluate();
        for (m,s) in pop.members().iter().zip(scores.iter()) {
            assert_eq!(count_conflicts(m), *s);
        }
    }

    #[test]
    fn test_best_index_first_minimum() {
        assert_eq!(Population::best_index(&[3,1,2,1]), 1);
        assert_eq!(Population::best_index(&[0,0]), 0);
    }

    #[test]
    fn test_local_move_changes_one_vertex() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let op = perturbation(0.);
        for _ in 0..200 {
            let before = Coloring::random(&graph, 4, &mut rng);
            let conflicting = conflicting_vertices(&before);
            let mut after = before.clone();
            op.local_move(&mut after, &mut rng);
            let changed:Vec<usize> = graph.vertices()
                .filter(|v| before.color_of(*v) != after.color_of(*v))
                .collect();
            assert_eq!(changed.len(), 1);
            assert!(after.color_of(changed[0]) < 4);
            if !conflicting.is_empty() {
                assert!(conflicting.contains(&changed[0]));
            }
        }
    }

    #[test]
    fn test_local_move_single_color() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut coloring = Coloring::random(&graph, 1, &mut rng);
        perturbation(0.).local_move(&mut coloring, &mut rng);
        assert_eq!(coloring.colors(), &[0,0,0,0]);
    }

    #[test]
    fn test_pollinate_copies_elite() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let elite = Coloring::random(&graph, 5, &mut rng);
        for _ in 0..100 {
            let before = Coloring::random(&graph, 5, &mut rng);
            let mut after = before.clone();
            perturbation(1.).apply(&mut after, &elite, &mut rng);
            for v in graph.vertices() {
                if after.color_of(v) != before.color_of(v) {
                    assert_eq!(after.color_of(v), elite.color_of(v));
                }
            }
        }
    }

    #[test]
    fn test_perturb_keeps_elite_and_range() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut pop = Population::initialize(&graph, 8, 3, &mut rng);
        let op = perturbation(0.3);
        for _ in 0..100 {
            let elite = Population::best_index(&pop.evaluate());
            let elite_colors = pop.members()[elite].colors().to_vec();
            pop.perturb(&op, elite, &mut rng);
            assert_eq!(pop.members()[elite].colors(), elite_colors.as_slice());
            for m in pop.members() {
                assert!(m.colors().iter().all(|c| *c < 3));
            }
        }
    }

    #[test]
    fn test_select_survivors_stable_round_robin() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let members = vec![
            Coloring::from_colors(&graph, vec![0,0,0,0], 2), // 4 conflicts
            Coloring::from_colors(&graph, vec![0,0,1,1], 2), // 2 conflicts
            Coloring::from_colors(&graph, vec![1,1,0,0], 2), // 2 conflicts
            Coloring::from_colors(&graph, vec![0,1,1,1], 2), // 2 conflicts
            Coloring::from_colors(&graph, vec![1,1,1,1], 2), // 4 conflicts
        ];
        let pop = population(members);
        let scores = pop.evaluate();
        assert_eq!(scores, vec![4,2,2,2,4]);
        let selected = pop.select_survivors(&scores, 2);
        assert_eq!(selected.len(), 5);
        let colors:Vec<Vec<usize>> = selected.members().iter().map(|m| m.colors().to_vec()).collect();
        let expected:Vec<Vec<usize>> = vec![
            vec![0,0,1,1], vec![1,1,0,0], vec![0,0,1,1], vec![1,1,0,0], vec![0,0,1,1]
        ];
        assert_eq!(colors, expected);
    }

    #[test]
    fn test_record_progress() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let mut pop = population(vec![
            Coloring::from_colors(&graph, vec![0,0,0,0], 2),
            Coloring::from_colors(&graph, vec![0,0,1,1], 2),
        ]);
        pop.record_progress(&[2,2]);
        assert_eq!(pop.lifetimes(), &[0,1]);
        pop.record_progress(&[2,0]);
        assert_eq!(pop.lifetimes(), &[1,0]);
        pop.record_progress(&[3,0]);
        assert_eq!(pop.lifetimes(), &[2,1]);
    }

    #[test]
    fn test_stagnant_member_restarts() {
        let graph = Graph::from_dimacs_file("insts/myciel3.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let op = Perturbation::new(LevySampler::new(2., 1000.), 0., 3);
        let mut pop = population(vec![
            Coloring::from_colors(&graph, vec![0 ; 11], 5),
            Coloring::from_colors(&graph, vec![0 ; 11], 5),
            Coloring::from_colors(&graph, vec![0 ; 11], 5),
        ]);
        pop.lifetimes = vec![3, 3, 2];
        pop.perturb(&op, 0, &mut rng);
        // the elite is never restarted
        assert_eq!(pop.members()[0].colors(), &[0 ; 11]);
        assert_eq!(pop.lifetimes()[0], 3);
        // member 1 reached the limit: fully re-randomized
        let nb_changed = pop.members()[1].colors().iter().filter(|c| **c != 0).count();
        assert!(nb_changed > 1);
        assert!(pop.members()[1].colors().iter().all(|c| *c < 5));
        assert_eq!(pop.lifetimes()[1], 0);
        // member 2 is below the limit: a single local move
        let nb_changed = pop.members()[2].colors().iter().filter(|c| **c != 0).count();
        assert_eq!(nb_changed, 1);
        assert_eq!(pop.lifetimes()[2], 2);
    }

    #[test]
    fn test_selection_carries_lifetimes() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let mut pop = population(vec![
            Coloring::from_colors(&graph, vec![0,0,0,0], 2),
            Coloring::from_colors(&graph, vec![0,1,0,1], 2),
            Coloring::from_colors(&graph, vec![1,1,1,1], 2),
        ]);
        pop.lifetimes = vec![4, 7, 1];
        let scores = pop.evaluate();
        let selected = pop.select_survivors(&scores, 1);
        assert_eq!(selected.lifetimes(), &[7,7,7]);
    }

    #[test]
    fn test_select_single_survivor() {
        let graph = Graph::from_dimacs_file("insts/c4.col").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pop = Population::initialize(&graph, 6, 2, &mut rng);
        let scores = pop.evaluate();
        let best = pop.members()[Population::best_index(&scores)].colors().to_vec();
        let selected = pop.select_survivors(&scores, 0);
        for m in selected.members() {
            assert_eq!(m.colors(), best.as_slice());
        }
    }
}

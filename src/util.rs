use std::convert::TryFrom;
use std::str::FromStr;

use clap::ArgMatches;
use log::{info, warn};
use serde_json::Value;

use crate::{
    color::{Graph, VertexId, checker, CheckerResult},
    error::ColorError,
    params::{Parameters, RawParameters},
    search::StartingBound,
};

/// options of a run that are not search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// time limit (seconds)
    pub time: Option<f32>,
    /// random seed
    pub seed: Option<u64>,
    /// starting number of colors ("maxdeg", "dsatur" or an integer)
    pub start: String,
    /// file where the solution is written
    pub sol_file: Option<String>,
    /// file where the statistics are written
    pub perf_file: Option<String>,
}

/// parses an optional command line value
fn parse_value<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>, ColorError> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_|
            ColorError::config(format!("unable to parse --{} value '{}'", name, s))
        ),
    }
}

/** reads command line input and returns the instance name, the graph, the search parameters
and the run options. Values given on the command line override the parameter file.
*/
pub fn read_params(main_args:&ArgMatches) -> Result<(String, Graph, Parameters, RunOptions), ColorError> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| ColorError::config("missing instance file"))?;
    // read parameters (file first, then command line)
    let from_file = match main_args.value_of("params") {
        None => RawParameters::default(),
        Some(filename) => {
            info!("reading parameters in: {}", filename);
            RawParameters::from_json_file(filename)?
        }
    };
    let from_cli = RawParameters {
        population_size: parse_value(main_args, "population")?,
        generations: parse_value(main_args, "generations")?,
        lambda: parse_value(main_args, "lambda")?,
        gamma: parse_value(main_args, "gamma")?,
        switch_probability: parse_value(main_args, "switch")?,
        max_step: parse_value(main_args, "max_step")?,
        lifetime_limit: parse_value(main_args, "lifetime")?,
    };
    let params = Parameters::try_from(from_file.overridden_by(from_cli))?;
    let options = RunOptions {
        time: parse_value(main_args, "time")?,
        seed: parse_value(main_args, "seed")?,
        start: main_args.value_of("start").unwrap_or("maxdeg").to_string(),
        sol_file: main_args.value_of("solution").map(|s| s.to_string()),
        perf_file: main_args.value_of("perf").map(|s| s.to_string()),
    };
    if let Some(e) = &options.sol_file { info!("printing solutions in: {}", e); }
    if let Some(e) = &options.perf_file { info!("printing perfs in: {}", e); }
    // read instance file
    info!("reading instance: {}...", inst_filename);
    let graph = Graph::from_dimacs_file(inst_filename)?;
    graph.display_statistics();
    info!("=======================");
    Ok((inst_filename.to_string(), graph, params, options))
}

/// converts the --start option ("maxdeg", "dsatur" or a number of colors)
pub fn resolve_start(start:&str, dsatur_nb_colors:usize) -> Result<StartingBound, ColorError> {
    match start {
        "maxdeg" => Ok(StartingBound::MaxDegree),
        "dsatur" => Ok(StartingBound::Fixed(dsatur_nb_colors.max(1))),
        _ => match start.parse::<usize>() {
            Ok(k) if k >= 1 => Ok(StartingBound::Fixed(k)),
            _ => Err(ColorError::config(format!(
                "invalid --start value '{}' (valid: 'maxdeg', 'dsatur' or a positive integer)", start
            ))),
        }
    }
}

/// exports search results to files
pub fn export_results(
    graph:&Graph,
    solution:Option<&[Vec<VertexId>]>,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
    check_result:bool,
) -> Result<(), ColorError> {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename, serde_json::to_string(stats)?)?;
    }
    // export solution
    match (sol_file, solution) {
        (None, _) => {},
        (Some(filename), None) => {
            warn!("no solution to write in {}", filename);
        },
        (Some(filename), Some(solution)) => {
            if check_result {
                match checker(graph, solution) {
                    CheckerResult::Ok(_) => {},
                    res => { warn!("invalid solution (reason: {:?})", res) }
                };
            }
            graph.write_solution(filename, solution)?;
        }
    }
    Ok(())
}

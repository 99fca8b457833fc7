use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use dogs::search_algorithm::{NeverStoppingCriterion, TimeStoppingCriterion};
use log::{error, info, warn};
use serde_json::json;

use levy_color::coloring::Coloring;
use levy_color::error::ColorError;
use levy_color::greedy::greedy_dsatur;
use levy_color::search::{levy_coloring, SearchOutcome};
use levy_color::util::{read_params, resolve_start, export_results};


/** solves a coloring instance using the Lévy flight population search */
pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // parse arguments
    let yaml = load_yaml!("levy_color.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), ColorError> {
    let (inst_filename, graph, params, options) = read_params(main_args)?;
    let time_init = Instant::now();
    // reference greedy solution
    let sol_greedy = greedy_dsatur(&graph);
    info!("greedy found {} colors in {:.3} seconds", sol_greedy.len(), time_init.elapsed().as_secs_f32());
    let start = resolve_start(&options.start, sol_greedy.len())?;
    let seed = options.seed.unwrap_or_else(rand::random);
    info!("seed: {}", seed);
    // solve it
    let report = match options.time {
        Some(t) => levy_coloring(&graph, params, start, seed, TimeStoppingCriterion::new(t))?,
        None => levy_coloring(&graph, params, start, seed, NeverStoppingCriterion::default())?,
    };
    let solution = match &report.outcome {
        SearchOutcome::Colored { nb_colors, colors } => {
            info!("best coloring found: {} colors", nb_colors);
            Some(Coloring::from_colors(&graph, colors.clone(), *nb_colors).to_solution())
        },
        SearchOutcome::NoImprovementFound { upper_bound } => {
            warn!("no proper coloring found, even with the starting bound of {} colors", upper_bound);
            None
        }
    };
    let stats = json!({
        "inst_name": inst_filename,
        "seed": seed,
        "params": params,
        "greedy_nb_colors": sol_greedy.len(),
        "nb_colors": report.outcome.nb_colors(),
        "improvement_found": solution.is_some(),
        "trials": report.trials,
        "time_searched": time_init.elapsed().as_secs_f32(),
    });
    // export results
    export_results(
        &graph,
        solution.as_deref(),
        &stats,
        options.perf_file.as_deref(),
        options.sol_file.as_deref(),
        true
    )?;
    println!("{}", report.outcome.nb_colors());
    Ok(())
}

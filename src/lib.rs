//! Lévy flight population search for the Graph Coloring problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// graph model, solutions and checker
pub mod color;

/// read DIMACS formats
pub mod dimacs;

/// error type shared by the crate
pub mod error;

/// color assignment of the vertices
pub mod coloring;

/// conflict evaluation (fitness of a coloring)
pub mod conflicts;

/// Lévy step sampler
pub mod levy;

/// population and perturbation operator
pub mod population;

/// search parameters
pub mod params;

/// search driver (decreasing number of colors)
pub mod search;

/// greedy DSATUR algorithm
pub mod greedy;

/// helper and utility methods for executables
pub mod util;

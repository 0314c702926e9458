//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod download;
pub mod make_lookup;
pub mod reformat;
pub mod revigo;
pub mod run;

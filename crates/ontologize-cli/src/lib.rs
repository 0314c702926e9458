//! Ontologize CLI Library
//!
//! Command-line front end for Gene Ontology enrichment with Ontologizer.
//!
//! # Overview
//!
//! - **Lookup table**: build the GO id -> term JSON table from an OBO file (`ontologize make-lookup`)
//! - **Source data**: fetch the jar, association file and ontology (`ontologize download`)
//! - **Enrichment**: run Ontologizer on a study set (`ontologize run`)
//! - **Reports**: annotate the results table (`ontologize reformat`) and submit
//!   significant terms to REVIGO (`ontologize revigo`)
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod ontologizer;
pub mod progress;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use ontologizer::{Ontologizer, OutputFiles};

use clap::{ArgGroup, Args, Parser, Subcommand};
use ontologize_common::Organism;
use ontologize_go::report::revigo::DEFAULT_GO_SIZES;
use ontologize_go::{Calculation, MultipleTestingCorrection};
use ontologizer::{DEFAULT_DOT_THRESHOLD, DEFAULT_OUTDIR, DEFAULT_RESAMPLING_STEPS};
use std::path::PathBuf;

/// Ontologize - Gene Ontology enrichment with Ontologizer
#[derive(Parser, Debug)]
#[command(name = "ontologize")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for downloaded data and the lookup table
    #[arg(long, env = "ONTOLOGIZE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the GO lookup table (JSON) from an OBO file
    MakeLookup {
        /// OBO file (defaults to the one in the data directory)
        #[arg(long)]
        obo: Option<PathBuf>,

        /// Output JSON file (defaults to go_lookup.json in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on duplicate term ids instead of keeping the last one
        #[arg(long)]
        strict: bool,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Download Ontologizer, an association file and the ontology, then build the lookup table
    #[command(group(ArgGroup::new("associations").required(true).args(["organism", "file"])))]
    Download {
        /// Organism whose association file to fetch (mmusculus, dmelanogaster, hsapiens)
        #[arg(long)]
        organism: Option<Organism>,

        /// Association file name under the associations directory
        #[arg(long)]
        file: Option<String>,

        /// Re-download files that already exist
        #[arg(short, long)]
        force: bool,

        /// Do not build the lookup table afterwards
        #[arg(long)]
        skip_lookup: bool,
    },

    /// Run Ontologizer on a study set
    Run(RunArgs),

    /// Add term names, definitions and genes to a results table
    Reformat {
        #[command(flatten)]
        target: TargetArgs,

        /// Keep only rows whose score passes this threshold
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Lookup table (defaults to go_lookup.json in the data directory)
        #[arg(long)]
        lookup: Option<PathBuf>,
    },

    /// Submit significant terms to REVIGO
    Revigo {
        #[command(flatten)]
        target: TargetArgs,

        /// Significance threshold
        #[arg(short, long, default_value_t = 0.05)]
        threshold: f64,

        /// Species whose GO term sizes REVIGO uses
        #[arg(long, default_value = DEFAULT_GO_SIZES)]
        go_sizes: String,

        /// Only write the REVIGO URL, do not open a browser
        #[arg(long)]
        no_browser: bool,
    },
}

/// Identifies one Ontologizer run and its output files
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Study set file, one gene id per line
    #[arg(short, long)]
    pub genes: PathBuf,

    /// Enrichment calculation
    #[arg(short, long, default_value_t = Calculation::default())]
    pub calculation: Calculation,

    /// Multiple testing correction
    #[arg(short, long, default_value_t = MultipleTestingCorrection::default())]
    pub mtc: MultipleTestingCorrection,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,
}

impl TargetArgs {
    pub fn output(&self) -> OutputFiles {
        OutputFiles::new(&self.genes, self.calculation, self.mtc, &self.outdir)
    }
}

/// Arguments for `ontologize run`
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("associations").required(true).args(["organism", "association"])))]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Population set file
    #[arg(short, long)]
    pub population: PathBuf,

    /// Organism whose downloaded association file to use
    #[arg(long)]
    pub organism: Option<Organism>,

    /// Association file
    #[arg(short, long)]
    pub association: Option<PathBuf>,

    /// Ontologizer jar (defaults to the one in the data directory)
    #[arg(long)]
    pub jar: Option<PathBuf>,

    /// OBO file (defaults to the one in the data directory)
    #[arg(long)]
    pub ontology: Option<PathBuf>,

    /// Include terms at or below this score in the graph
    #[arg(short, long, default_value_t = DEFAULT_DOT_THRESHOLD)]
    pub dot: f64,

    /// Number of resampling steps
    #[arg(short, long, default_value_t = DEFAULT_RESAMPLING_STEPS)]
    pub resampling_steps: u32,

    /// Render the results graph with Graphviz afterwards
    #[arg(long)]
    pub graph: bool,

    /// Reformat the results table afterwards
    #[arg(long)]
    pub reformat: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "ontologize",
            "run",
            "-g",
            "genes.txt",
            "-p",
            "population.txt",
            "--organism",
            "dmelanogaster",
            "-c",
            "mgsa",
            "--graph",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.target.calculation, Calculation::Mgsa);
        assert_eq!(args.target.mtc, MultipleTestingCorrection::WestfallYoungSingleStep);
        assert_eq!(args.organism, Some(Organism::Dmelanogaster));
        assert_eq!(args.resampling_steps, 100);
        assert!(args.graph);
    }

    #[test]
    fn test_association_choice_is_required_and_exclusive() {
        let neither = Cli::try_parse_from(["ontologize", "run", "-g", "g.txt", "-p", "p.txt"]);
        assert!(neither.is_err());

        let both = Cli::try_parse_from([
            "ontologize",
            "run",
            "-g",
            "g.txt",
            "-p",
            "p.txt",
            "--organism",
            "hsapiens",
            "-a",
            "assoc.gz",
        ]);
        assert!(both.is_err());

        let download = Cli::try_parse_from(["ontologize", "download", "--organism", "mmusculus", "--file", "x.gz"]);
        assert!(download.is_err());
    }

    #[test]
    fn test_unknown_organism_rejected() {
        let result = Cli::try_parse_from(["ontologize", "download", "--organism", "scerevisiae"]);

        assert!(result.is_err());
    }
}

//! `ontologize run` command implementation
//!
//! Runs Ontologizer on a study set, optionally rendering the results graph and
//! reformatting the results table.

use crate::commands::reformat::reformat;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ontologizer::Ontologizer;
use crate::RunArgs;
use colored::Colorize;
use ontologize_common::files::DataFiles;

/// Run Ontologizer
pub async fn run(config: &Config, args: &RunArgs) -> Result<()> {
    let ontologizer = configure(config, args)?;

    for input in [
        &ontologizer.genes,
        &ontologizer.population,
        &ontologizer.jar,
        &ontologizer.association,
        &ontologizer.ontology,
    ] {
        if !input.exists() {
            return Err(CliError::FileNotFound(input.clone()));
        }
    }

    println!("{} Running Ontologizer ({})", "→".cyan(), ontologizer.output().name());
    let output = ontologizer.run().await?;
    println!("{} Wrote {}", "✓".green(), output.table().display());

    if args.graph {
        for image in ontologizer.render_graph().await? {
            println!("{} Wrote {}", "✓".green(), image.display());
        }
    }

    if args.reformat {
        let lookup = DataFiles::new(&config.data_dir).lookup();
        let written = reformat(&output, &lookup, ontologizer.calculation, None)?;
        println!("{} Wrote {}", "✓".green(), written.display());
    }

    Ok(())
}

/// Turn command-line arguments into a run descriptor
pub fn configure(config: &Config, args: &RunArgs) -> Result<Ontologizer> {
    let mut builder = Ontologizer::builder(&args.target.genes, &args.population)
        .config(config)
        .calculation(args.target.calculation)
        .mtc(args.target.mtc)
        .dot_threshold(args.dot)
        .resampling_steps(args.resampling_steps)
        .outdir(&args.target.outdir);

    if let Some(organism) = args.organism {
        builder = builder.organism(organism);
    }
    if let Some(ref association) = args.association {
        builder = builder.association(association);
    }
    if let Some(ref jar) = args.jar {
        builder = builder.jar(jar);
    }
    if let Some(ref ontology) = args.ontology {
        builder = builder.ontology(ontology);
    }

    builder.build()
}

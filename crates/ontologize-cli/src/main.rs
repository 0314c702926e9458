//! Ontologize CLI - Main entry point

use clap::Parser;
use ontologize_cli::download::AssociationSource;
use ontologize_cli::{Cli, CliError, Commands, Config};
use ontologize_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Values from .env are read before the environment is consulted
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Verbose mode logs debug to the console, otherwise only warnings
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("ontologize")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> ontologize_cli::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(ref dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    match &cli.command {
        Commands::MakeLookup {
            obo,
            output,
            strict,
            pretty,
        } => {
            ontologize_cli::commands::make_lookup::run(
                &config,
                obo.clone(),
                output.clone(),
                *strict,
                *pretty,
            )
            .await
        },

        Commands::Download {
            organism,
            file,
            force,
            skip_lookup,
        } => {
            let source = match (organism, file) {
                (Some(organism), None) => AssociationSource::Organism(*organism),
                (None, Some(file)) => AssociationSource::File(file.clone()),
                _ => {
                    return Err(CliError::invalid_arguments(
                        "provide exactly one of --organism or --file",
                    ))
                },
            };
            ontologize_cli::commands::download::run(&config, source, *force, *skip_lookup).await
        },

        Commands::Run(args) => ontologize_cli::commands::run::run(&config, args).await,

        Commands::Reformat {
            target,
            threshold,
            lookup,
        } => {
            ontologize_cli::commands::reformat::run(&config, target, *threshold, lookup.clone())
                .await
        },

        Commands::Revigo {
            target,
            threshold,
            go_sizes,
            no_browser,
        } => {
            ontologize_cli::commands::revigo::run(&config, target, *threshold, go_sizes, *no_browser)
                .await
        },
    }
}

//! `ontologize revigo` command implementation
//!
//! Submits the significant terms of a results table to REVIGO and records the
//! resulting page URL in the output directory.

use crate::config::Config;
use crate::download::http_client;
use crate::error::{CliError, Result};
use crate::ontologizer::OutputFiles;
use crate::TargetArgs;
use colored::Colorize;
use ontologize_go::report::{ResultsTable, RevigoRequest};
use ontologize_go::Calculation;
use std::path::PathBuf;
use tracing::{info, warn};

/// Submit to REVIGO and optionally open the result in a browser
pub async fn run(
    config: &Config,
    target: &TargetArgs,
    threshold: f64,
    go_sizes: &str,
    no_browser: bool,
) -> Result<()> {
    let (path, url) = submit(config, &target.output(), target.calculation, threshold, go_sizes).await?;

    println!("{} {}", "✓".green(), url);
    println!("{} Wrote {}", "✓".green(), path.display());

    if !no_browser {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "Could not open a browser");
        }
    }
    Ok(())
}

/// POST the selected terms and write the final URL to the REVIGO file
pub async fn submit(
    config: &Config,
    output: &OutputFiles,
    calculation: Calculation,
    threshold: f64,
    go_sizes: &str,
) -> Result<(PathBuf, String)> {
    let table_path = output.table();
    if !table_path.exists() {
        return Err(CliError::FileNotFound(table_path));
    }

    let table = ResultsTable::read(&table_path)?;
    let request = RevigoRequest::from_table(&table, calculation, threshold)?.with_go_sizes(go_sizes);
    if request.terms.is_empty() {
        warn!(threshold, "No terms pass the threshold");
    }

    let request_url = request.url(&config.revigo_url)?;
    let client = http_client(config)?;
    let response = client.post(request_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::HttpStatus {
            url: config.revigo_url.clone(),
            status: status.as_u16(),
        });
    }
    let url = response.url().to_string();

    let path = output.revigo(threshold);
    tokio::fs::write(&path, format!("{}\n", url))
        .await
        .map_err(|e| CliError::io(&path, e))?;
    info!(path = %path.display(), terms = request.terms.len(), "Wrote REVIGO URL");

    Ok((path, url))
}

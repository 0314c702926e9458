// Source data downloader (HTTP)

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::{create_download_progress, format_bytes};
use ontologize_common::files::DataFiles;
use ontologize_common::Organism;
use indicatif::ProgressBar;
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

pub const USER_AGENT: &str = concat!("ontologize/", env!("CARGO_PKG_VERSION"));

/// HTTP client with the configured timeout and user agent
pub fn http_client(config: &Config) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(USER_AGENT)
        .build()?)
}

/// What [`Downloader::download_to`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Fetched this many bytes
    Downloaded(u64),
    /// Destination already existed
    Skipped,
}

/// Which gene association file to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationSource {
    Organism(Organism),
    /// File name under the associations directory
    File(String),
}

impl AssociationSource {
    pub fn file_name(&self) -> &str {
        match self {
            AssociationSource::Organism(organism) => organism.association_file_name(),
            AssociationSource::File(name) => name,
        }
    }
}

/// HTTP client for the jar, association and ontology files
pub struct Downloader {
    client: Client,
    config: Config,
    files: DataFiles,
    show_progress: bool,
}

impl Downloader {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = http_client(&config)?;

        Ok(Self {
            client,
            files: DataFiles::new(&config.data_dir),
            config,
            show_progress: true,
        })
    }

    /// Disable progress bars
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    /// Fetch `url` into `dest` unless it already exists
    ///
    /// The body is streamed to `<dest>.part` and renamed into place once
    /// complete, so an interrupted download never leaves a truncated `dest`.
    /// On any failure after the request succeeds, `<dest>.part` is removed.
    pub async fn download_to(&self, url: &str, dest: &Path, force: bool) -> Result<DownloadOutcome> {
        if !force && tokio::fs::try_exists(dest).await.unwrap_or(false) {
            info!(path = %dest.display(), "File exists, skipping download");
            return Ok(DownloadOutcome::Skipped);
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CliError::io(parent, e))?;
        }

        info!(url, path = %dest.display(), "Downloading");
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CliError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());
        let progress = self
            .show_progress
            .then(|| create_download_progress(response.content_length(), &name));

        let partial = partial_path(dest);
        let written = match stream_to_file(&mut response, &partial, dest, progress.as_ref()).await {
            Ok(written) => written,
            Err(e) => {
                // Never leave a half-written file behind
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    debug!(path = %partial.display(), error = %cleanup, "No partial file to remove");
                }
                if let Some(pb) = progress {
                    pb.abandon();
                }
                return Err(e);
            },
        };

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        info!(path = %dest.display(), size = %format_bytes(written), "Download complete");

        Ok(DownloadOutcome::Downloaded(written))
    }

    /// Fetch the Ontologizer jar
    pub async fn download_jar(&self, force: bool) -> Result<(PathBuf, DownloadOutcome)> {
        let dest = self.files.ontologizer();
        let outcome = self.download_to(&self.config.jar_url, &dest, force).await?;
        Ok((dest, outcome))
    }

    /// Fetch the Gene Ontology OBO file
    pub async fn download_obo(&self, force: bool) -> Result<(PathBuf, DownloadOutcome)> {
        let dest = self.files.obo();
        let outcome = self.download_to(&self.config.obo_url, &dest, force).await?;
        Ok((dest, outcome))
    }

    /// Fetch one gene association file
    pub async fn download_associations(
        &self,
        source: &AssociationSource,
        force: bool,
    ) -> Result<(PathBuf, DownloadOutcome)> {
        let file_name = source.file_name();
        let dest = self.files.association_file(file_name);
        let url = self.config.association_url(file_name);
        debug!(?source, %url, "Resolved association file");

        let outcome = self.download_to(&url, &dest, force).await?;
        Ok((dest, outcome))
    }
}

/// Write the body to `partial`, then move it to `dest`
async fn stream_to_file(
    response: &mut Response,
    partial: &Path,
    dest: &Path,
    progress: Option<&ProgressBar>,
) -> Result<u64> {
    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| CliError::io(partial, e))?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| CliError::io(partial, e))?;
        written += chunk.len() as u64;
        if let Some(pb) = progress {
            pb.set_position(written);
        }
    }
    file.flush().await.map_err(|e| CliError::io(partial, e))?;
    drop(file);

    tokio::fs::rename(partial, dest)
        .await
        .map_err(|e| CliError::io(dest, e))?;
    Ok(written)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("data/go.obo")),
            PathBuf::from("data/go.obo.part")
        );
    }

    #[test]
    fn test_association_source_file_name() {
        assert_eq!(
            AssociationSource::Organism(Organism::Hsapiens).file_name(),
            "gene_association.goa_human.gz"
        );
        assert_eq!(
            AssociationSource::File("gene_association.sgd.gz".to_string()).file_name(),
            "gene_association.sgd.gz"
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = Config {
            http_timeout_secs: 0,
            ..Config::default()
        };

        assert!(matches!(Downloader::new(config), Err(CliError::Config(_))));
    }
}

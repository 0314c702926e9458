//! Configuration management for the ontologize CLI
//!
//! Data directory, remote locations, external program names and the HTTP
//! timeout. Every value has a default and can be overridden through the
//! environment (or a `.env` file loaded by `main`).

use crate::error::{CliError, Result};
use ontologize_common::files::{ASSOCIATIONS_URL, OBO_URL, ONTOLOGIZER_URL};
use ontologize_go::report::revigo::REVIGO_URL;
use std::path::PathBuf;
use url::Url;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default directory for downloaded data and the lookup table.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default Java executable used to run the Ontologizer jar.
pub const DEFAULT_JAVA: &str = "java";

/// Default Graphviz executable used to render the results graph.
pub const DEFAULT_DOT: &str = "dot";

/// Default HTTP timeout for downloads and REVIGO submissions.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// CLI configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub obo_url: String,
    /// Directory URL; association file names are appended to it
    pub associations_url: String,
    pub jar_url: String,
    pub revigo_url: String,
    pub java: String,
    pub dot: String,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            obo_url: OBO_URL.to_string(),
            associations_url: ASSOCIATIONS_URL.to_string(),
            jar_url: ONTOLOGIZER_URL.to_string(),
            revigo_url: REVIGO_URL.to_string(),
            java: DEFAULT_JAVA.to_string(),
            dot: DEFAULT_DOT.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from environment variables
    ///
    /// - `ONTOLOGIZE_DATA_DIR`
    /// - `ONTOLOGIZE_OBO_URL`, `ONTOLOGIZE_ASSOCIATIONS_URL`, `ONTOLOGIZE_JAR_URL`,
    ///   `ONTOLOGIZE_REVIGO_URL`
    /// - `ONTOLOGIZE_JAVA`, `ONTOLOGIZE_DOT`
    /// - `ONTOLOGIZE_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ONTOLOGIZE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("ONTOLOGIZE_OBO_URL") {
            config.obo_url = url;
        }
        if let Ok(url) = std::env::var("ONTOLOGIZE_ASSOCIATIONS_URL") {
            config.associations_url = url;
        }
        if let Ok(url) = std::env::var("ONTOLOGIZE_JAR_URL") {
            config.jar_url = url;
        }
        if let Ok(url) = std::env::var("ONTOLOGIZE_REVIGO_URL") {
            config.revigo_url = url;
        }
        if let Ok(java) = std::env::var("ONTOLOGIZE_JAVA") {
            config.java = java;
        }
        if let Ok(dot) = std::env::var("ONTOLOGIZE_DOT") {
            config.dot = dot;
        }
        if let Ok(secs) = std::env::var("ONTOLOGIZE_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = secs.parse().map_err(|_| {
                CliError::config(format!(
                    "ONTOLOGIZE_HTTP_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    secs
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("OBO URL", &self.obo_url),
            ("associations URL", &self.associations_url),
            ("Ontologizer jar URL", &self.jar_url),
            ("REVIGO URL", &self.revigo_url),
        ] {
            Url::parse(value)
                .map_err(|e| CliError::config(format!("Invalid {} '{}': {}", name, value, e)))?;
        }

        if self.http_timeout_secs == 0 {
            return Err(CliError::config("HTTP timeout must be greater than 0"));
        }
        if self.java.trim().is_empty() || self.dot.trim().is_empty() {
            return Err(CliError::config("Java and dot executables cannot be empty"));
        }

        Ok(())
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Remote location of an association file
    pub fn association_url(&self, file_name: &str) -> String {
        let base = self.associations_url.trim_end_matches('/');
        format!("{}/{}?rev=HEAD", base, file_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "ONTOLOGIZE_DATA_DIR",
        "ONTOLOGIZE_OBO_URL",
        "ONTOLOGIZE_ASSOCIATIONS_URL",
        "ONTOLOGIZE_JAR_URL",
        "ONTOLOGIZE_REVIGO_URL",
        "ONTOLOGIZE_JAVA",
        "ONTOLOGIZE_DOT",
        "ONTOLOGIZE_HTTP_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.java, "java");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("ONTOLOGIZE_DATA_DIR", "/tmp/go-data");
        std::env::set_var("ONTOLOGIZE_OBO_URL", "http://localhost:9000/go.obo");
        std::env::set_var("ONTOLOGIZE_HTTP_TIMEOUT_SECS", "5");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/go-data"));
        assert_eq!(config.obo_url, "http://localhost:9000/go.obo");
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_invalid_env_values() {
        clear_env();
        std::env::set_var("ONTOLOGIZE_HTTP_TIMEOUT_SECS", "soon");
        assert!(Config::from_env().is_err());

        clear_env();
        std::env::set_var("ONTOLOGIZE_JAR_URL", "not a url");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_association_url() {
        let config = Config::default();

        assert_eq!(
            config.association_url("gene_association.fb.gz"),
            "http://cvsweb.geneontology.org/cgi-bin/cvsweb.cgi/go/gene-associations/gene_association.fb.gz?rev=HEAD"
        );
    }
}

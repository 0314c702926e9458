// Ontologizer run descriptor and external process execution

use crate::config::{Config, DEFAULT_DOT, DEFAULT_JAVA};
use crate::error::{CliError, Result};
use ontologize_common::files::DataFiles;
use ontologize_common::Organism;
use ontologize_go::{Calculation, MultipleTestingCorrection};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const DEFAULT_OUTDIR: &str = "ontologizer-output";
pub const DEFAULT_DOT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_RESAMPLING_STEPS: u32 = 100;

/// Graph formats written by [`Ontologizer::render_graph`]
pub const GRAPH_FORMATS: [&str; 2] = ["png", "svg"];

// ============================================================================
// Output Files
// ============================================================================

/// Names of everything one Ontologizer run writes to its output directory
///
/// Derived from the study set file name, the calculation and the correction,
/// the same way Ontologizer names its own output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFiles {
    outdir: PathBuf,
    name: String,
}

impl OutputFiles {
    pub fn new(
        genes: &Path,
        calculation: Calculation,
        mtc: MultipleTestingCorrection,
        outdir: impl Into<PathBuf>,
    ) -> Self {
        let stem = genes
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            outdir: outdir.into(),
            name: format!("{}-{}-{}", stem, calculation.as_str(), mtc.as_str()),
        }
    }

    /// `<genes stem>-<calculation>-<mtc>`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Results table, `table-<name>.txt`
    pub fn table(&self) -> PathBuf {
        self.outdir.join(format!("table-{}.txt", self.name))
    }

    /// Gene annotations, `anno-<name>.txt`
    pub fn annotations(&self) -> PathBuf {
        self.outdir.join(format!("anno-{}.txt", self.name))
    }

    /// Graphviz graph, `view-<name>.dot`
    pub fn dot(&self) -> PathBuf {
        self.outdir.join(format!("view-{}.dot", self.name))
    }

    pub fn reformatted_table(&self) -> PathBuf {
        let mut path = self.table().into_os_string();
        path.push(".reformatted");
        PathBuf::from(path)
    }

    pub fn network(&self, ext: &str) -> PathBuf {
        self.outdir.join(format!("network.{}", ext))
    }

    /// File holding the REVIGO URL for a threshold
    pub fn revigo(&self, threshold: f64) -> PathBuf {
        self.outdir
            .join(format!("{}_revigo_thresh_{}", self.name, threshold))
    }

    pub fn ontologizer_log(&self) -> PathBuf {
        self.outdir.join(".ontologizer.log")
    }

    pub fn dot_log(&self) -> PathBuf {
        self.outdir.join(".dot.log")
    }
}

// ============================================================================
// Run Descriptor
// ============================================================================

/// Everything needed to run `Ontologizer.jar` once
#[derive(Debug, Clone, PartialEq)]
pub struct Ontologizer {
    /// Study set, one gene per line
    pub genes: PathBuf,
    /// Population set
    pub population: PathBuf,
    pub jar: PathBuf,
    pub association: PathBuf,
    /// Gene Ontology OBO file
    pub ontology: PathBuf,
    pub calculation: Calculation,
    pub mtc: MultipleTestingCorrection,
    /// Terms at or below this score go into the `.dot` graph
    pub dot_threshold: f64,
    pub resampling_steps: u32,
    pub outdir: PathBuf,
    pub java: String,
    pub dot: String,
}

impl Ontologizer {
    pub fn builder(genes: impl Into<PathBuf>, population: impl Into<PathBuf>) -> OntologizerBuilder {
        OntologizerBuilder::new(genes.into(), population.into())
    }

    pub fn output(&self) -> OutputFiles {
        OutputFiles::new(&self.genes, self.calculation, self.mtc, &self.outdir)
    }

    /// Arguments passed to the Java executable
    pub fn args(&self) -> Vec<String> {
        let path = |p: &Path| p.display().to_string();

        vec![
            "-jar".to_string(),
            path(&self.jar),
            "-a".to_string(),
            path(&self.association),
            "-g".to_string(),
            path(&self.ontology),
            "-s".to_string(),
            path(&self.genes),
            "-p".to_string(),
            path(&self.population),
            "-c".to_string(),
            self.calculation.to_string(),
            "-d".to_string(),
            self.dot_threshold.to_string(),
            "-m".to_string(),
            self.mtc.to_string(),
            "-r".to_string(),
            self.resampling_steps.to_string(),
            "-n".to_string(),
            "--outdir".to_string(),
            path(&self.outdir),
        ]
    }

    /// Full command line, program first
    pub fn command(&self) -> Vec<String> {
        let mut argv = vec![self.java.clone()];
        argv.extend(self.args());
        argv
    }

    /// Run Ontologizer, writing its output to the output directory
    ///
    /// Standard output and error go to `<outdir>/.ontologizer.log`. A failing
    /// exit status is an error that names the log.
    pub async fn run(&self) -> Result<OutputFiles> {
        let output = self.output();
        tokio::fs::create_dir_all(&self.outdir)
            .await
            .map_err(|e| CliError::io(&self.outdir, e))?;

        let log_path = output.ontologizer_log();
        let (stdout, stderr) = log_handles(&log_path)?;

        info!(command = %self.command().join(" "), log = %log_path.display(), "Running Ontologizer");

        let status = Command::new(&self.java)
            .args(self.args())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .await
            .map_err(|source| CliError::Spawn {
                program: self.java.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CliError::ProcessFailed {
                program: self.java.clone(),
                status: status.to_string(),
                log: log_path,
            });
        }

        info!(table = %output.table().display(), "Ontologizer finished");
        Ok(output)
    }

    /// Render the `.dot` graph as PNG and SVG with Graphviz
    ///
    /// Graphviz failures are logged and skipped; only the log file itself can
    /// fail this call. Returns the images that were written.
    pub async fn render_graph(&self) -> Result<Vec<PathBuf>> {
        let output = self.output();
        tokio::fs::create_dir_all(&self.outdir)
            .await
            .map_err(|e| CliError::io(&self.outdir, e))?;

        let log_path = output.dot_log();
        let log = File::create(&log_path).map_err(|e| CliError::io(&log_path, e))?;
        let dotfile = output.dot();

        let mut written = Vec::new();
        for ext in GRAPH_FORMATS {
            let image = output.network(ext);
            let (stdout, stderr) = (clone_handle(&log, &log_path)?, clone_handle(&log, &log_path)?);

            let result = Command::new(&self.dot)
                .arg("-T")
                .arg(ext)
                .arg(&dotfile)
                .arg("-o")
                .arg(&image)
                .stdout(stdout)
                .stderr(stderr)
                .status()
                .await;

            match result {
                Ok(status) if status.success() => {
                    info!(path = %image.display(), "Wrote graph");
                    written.push(image);
                },
                Ok(status) => {
                    warn!(%status, log = %log_path.display(), "dot failed");
                },
                Err(e) => {
                    warn!(program = %self.dot, error = %e, "Could not run dot");
                },
            }
        }

        Ok(written)
    }
}

fn log_handles(path: &Path) -> Result<(Stdio, Stdio)> {
    let log = File::create(path).map_err(|e| CliError::io(path, e))?;
    let stderr = clone_handle(&log, path)?;
    Ok((Stdio::from(log), stderr))
}

fn clone_handle(file: &File, path: &Path) -> Result<Stdio> {
    file.try_clone()
        .map(Stdio::from)
        .map_err(|e| CliError::io(path, e))
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Ontologizer`]
#[derive(Debug, Clone)]
pub struct OntologizerBuilder {
    genes: PathBuf,
    population: PathBuf,
    files: DataFiles,
    jar: Option<PathBuf>,
    ontology: Option<PathBuf>,
    association: Option<PathBuf>,
    organism: Option<Organism>,
    calculation: Calculation,
    mtc: MultipleTestingCorrection,
    dot_threshold: f64,
    resampling_steps: u32,
    outdir: PathBuf,
    java: String,
    dot: String,
}

impl OntologizerBuilder {
    fn new(genes: PathBuf, population: PathBuf) -> Self {
        Self {
            genes,
            population,
            files: DataFiles::new(crate::config::DEFAULT_DATA_DIR),
            jar: None,
            ontology: None,
            association: None,
            organism: None,
            calculation: Calculation::default(),
            mtc: MultipleTestingCorrection::default(),
            dot_threshold: DEFAULT_DOT_THRESHOLD,
            resampling_steps: DEFAULT_RESAMPLING_STEPS,
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            java: DEFAULT_JAVA.to_string(),
            dot: DEFAULT_DOT.to_string(),
        }
    }

    /// Take the data directory and program names from the CLI configuration
    pub fn config(mut self, config: &Config) -> Self {
        self.files = DataFiles::new(&config.data_dir);
        self.java = config.java.clone();
        self.dot = config.dot.clone();
        self
    }

    pub fn jar(mut self, jar: impl Into<PathBuf>) -> Self {
        self.jar = Some(jar.into());
        self
    }

    pub fn ontology(mut self, ontology: impl Into<PathBuf>) -> Self {
        self.ontology = Some(ontology.into());
        self
    }

    pub fn association(mut self, association: impl Into<PathBuf>) -> Self {
        self.association = Some(association.into());
        self
    }

    pub fn organism(mut self, organism: Organism) -> Self {
        self.organism = Some(organism);
        self
    }

    pub fn calculation(mut self, calculation: Calculation) -> Self {
        self.calculation = calculation;
        self
    }

    pub fn mtc(mut self, mtc: MultipleTestingCorrection) -> Self {
        self.mtc = mtc;
        self
    }

    pub fn dot_threshold(mut self, threshold: f64) -> Self {
        self.dot_threshold = threshold;
        self
    }

    pub fn resampling_steps(mut self, steps: u32) -> Self {
        self.resampling_steps = steps;
        self
    }

    pub fn outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = outdir.into();
        self
    }

    pub fn build(self) -> Result<Ontologizer> {
        let association = match (self.association, self.organism) {
            (Some(_), Some(_)) => {
                return Err(CliError::invalid_arguments(
                    "provide either an organism or an association file, not both",
                ))
            },
            (Some(path), None) => path,
            (None, Some(organism)) => self.files.association_for(organism),
            (None, None) => {
                return Err(CliError::invalid_arguments(
                    "an organism or an association file is required",
                ))
            },
        };

        if !(0.0..=1.0).contains(&self.dot_threshold) {
            return Err(CliError::invalid_arguments(format!(
                "dot threshold must be between 0 and 1, got {}",
                self.dot_threshold
            )));
        }

        let ontologizer = Ontologizer {
            jar: self.jar.unwrap_or_else(|| self.files.ontologizer()),
            ontology: self.ontology.unwrap_or_else(|| self.files.obo()),
            genes: self.genes,
            population: self.population,
            association,
            calculation: self.calculation,
            mtc: self.mtc,
            dot_threshold: self.dot_threshold,
            resampling_steps: self.resampling_steps,
            outdir: self.outdir,
            java: self.java,
            dot: self.dot,
        };
        debug!(?ontologizer, "Configured Ontologizer run");
        Ok(ontologizer)
    }
}

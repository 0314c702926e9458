//! Source data file catalogue
//!
//! Knows where the Gene Ontology inputs come from and where they live on disk:
//! the ontology in OBO format, per-organism gene association files, the
//! Ontologizer jar and the JSON lookup table built from the ontology.

use crate::error::{CommonError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Remote Locations
// ============================================================================

/// Ontologizer command-line jar.
pub const ONTOLOGIZER_URL: &str = "http://compbio.charite.de/contao/index.php/cmdline\
Ontologizer.html?file=tl_files/ontologizer/cmdline/Ontologizer.jar";

/// Directory holding the gene association files.
pub const ASSOCIATIONS_URL: &str =
    "http://cvsweb.geneontology.org/cgi-bin/cvsweb.cgi/go/gene-associations/";

/// Gene Ontology in OBO 1.2 format.
pub const OBO_URL: &str = "http://www.geneontology.org/ontology/gene_ontology_edit.obo";

// ============================================================================
// Local File Names
// ============================================================================

pub const OBO_FILE_NAME: &str = "gene_ontology_edit.obo";
pub const LOOKUP_FILE_NAME: &str = "go_lookup.json";
pub const ONTOLOGIZER_FILE_NAME: &str = "Ontologizer.jar";

/// Organisms with a known gene association file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organism {
    Mmusculus,
    Dmelanogaster,
    Hsapiens,
}

impl Organism {
    pub const ALL: [Organism; 3] = [Organism::Mmusculus, Organism::Dmelanogaster, Organism::Hsapiens];

    /// Name of the gene association file for this organism
    pub fn association_file_name(self) -> &'static str {
        match self {
            Organism::Mmusculus => "gene_association.goa_mouse.gz",
            Organism::Dmelanogaster => "gene_association.fb.gz",
            Organism::Hsapiens => "gene_association.goa_human.gz",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Organism::Mmusculus => "mmusculus",
            Organism::Dmelanogaster => "dmelanogaster",
            Organism::Hsapiens => "hsapiens",
        }
    }

    fn supported() -> String {
        Self::ALL.iter().map(|o| o.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl std::str::FromStr for Organism {
    type Err = CommonError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mmusculus" => Ok(Organism::Mmusculus),
            "dmelanogaster" => Ok(Organism::Dmelanogaster),
            "hsapiens" => Ok(Organism::Hsapiens),
            _ => Err(CommonError::UnsupportedOrganism(s.to_string(), Self::supported())),
        }
    }
}

impl std::fmt::Display for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the local paths of every data file under one data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    data_dir: PathBuf,
}

impl DataFiles {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the ontology OBO file
    pub fn obo(&self) -> PathBuf {
        self.data_dir.join(OBO_FILE_NAME)
    }

    /// Path of the JSON lookup table built from the ontology
    pub fn lookup(&self) -> PathBuf {
        self.data_dir.join(LOOKUP_FILE_NAME)
    }

    /// Path of the Ontologizer jar
    pub fn ontologizer(&self) -> PathBuf {
        self.data_dir.join(ONTOLOGIZER_FILE_NAME)
    }

    /// Path of the association file for an organism given by name
    pub fn association(&self, organism: &str) -> Result<PathBuf> {
        let organism: Organism = organism.parse()?;
        Ok(self.association_for(organism))
    }

    pub fn association_for(&self, organism: Organism) -> PathBuf {
        self.data_dir.join(organism.association_file_name())
    }

    /// Path for an arbitrary association file name from the associations directory
    pub fn association_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_organism_from_str() {
        assert_eq!("dmelanogaster".parse::<Organism>().unwrap(), Organism::Dmelanogaster);
        assert_eq!("HSapiens".parse::<Organism>().unwrap(), Organism::Hsapiens);

        let err = "scerevisiae".parse::<Organism>().unwrap_err();
        assert!(err.to_string().contains("scerevisiae"));
        assert!(err.to_string().contains("mmusculus"));
    }

    #[test]
    fn test_data_file_paths() {
        let files = DataFiles::new("/srv/go");

        assert_eq!(files.obo(), PathBuf::from("/srv/go/gene_ontology_edit.obo"));
        assert_eq!(files.lookup(), PathBuf::from("/srv/go/go_lookup.json"));
        assert_eq!(files.ontologizer(), PathBuf::from("/srv/go/Ontologizer.jar"));
        assert_eq!(
            files.association("mmusculus").unwrap(),
            PathBuf::from("/srv/go/gene_association.goa_mouse.gz")
        );
        assert!(files.association("unknown").is_err());
    }
}

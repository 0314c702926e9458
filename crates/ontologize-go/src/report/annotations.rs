// Gene <-> GO term lookups from an Ontologizer annotation file
//
// Each line of `anno-<name>.txt` is tab-separated:
//   <gene id> \t <ignored> \t <label>={GO:1,GO:2} <label>={GO:3} ...

use crate::{GoError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

type LabelMap = HashMap<String, Vec<String>>;

/// Forward (gene -> label -> GO ids) and reverse (GO id -> label -> genes)
/// annotation maps
#[derive(Debug, Clone, Default)]
pub struct AnnotationLookups {
    forward: HashMap<String, LabelMap>,
    reverse: HashMap<String, LabelMap>,
    labels: Vec<String>,
}

impl AnnotationLookups {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lookups = AnnotationLookups::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            lookups.add_line(line, index + 1)?;
        }

        Ok(lookups)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GoError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            GoError::Stream(source) => GoError::io(path, source),
            GoError::InvalidAnnotation(msg) => {
                GoError::InvalidAnnotation(format!("{}: {}", path.display(), msg))
            },
            other => other,
        })
    }

    fn add_line(&mut self, line: &str, line_number: usize) -> Result<()> {
        let columns: Vec<&str> = line.split('\t').collect();
        let &[gene, _, terms] = columns.as_slice() else {
            return Err(GoError::InvalidAnnotation(format!(
                "line {}: expected 3 tab-separated columns, got {}",
                line_number,
                columns.len()
            )));
        };

        let mut by_label = LabelMap::new();
        for item in terms.split_whitespace() {
            let (label, ids) = item.split_once('=').ok_or_else(|| {
                GoError::InvalidAnnotation(format!(
                    "line {}: '{}' is not label={{ids}}",
                    line_number, item
                ))
            })?;

            let ids: Vec<String> = ids
                .trim_start_matches('{')
                .trim_end_matches('}')
                .split(',')
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();

            if !self.labels.iter().any(|l| l == label) {
                self.labels.push(label.to_string());
            }
            for id in &ids {
                self.reverse
                    .entry(id.clone())
                    .or_default()
                    .entry(label.to_string())
                    .or_default()
                    .push(gene.to_string());
            }
            by_label.insert(label.to_string(), ids);
        }

        self.forward.insert(gene.to_string(), by_label);
        Ok(())
    }

    /// Annotation labels in the order first seen
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// GO ids annotated to `gene` under `label`
    pub fn terms_for(&self, gene: &str, label: &str) -> Option<&[String]> {
        self.forward.get(gene)?.get(label).map(Vec::as_slice)
    }

    /// Genes annotated to `go_id` under `label`, in file order
    pub fn genes_for(&self, go_id: &str, label: &str) -> Option<&[String]> {
        self.reverse.get(go_id)?.get(label).map(Vec::as_slice)
    }

    pub fn gene_count(&self) -> usize {
        self.forward.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const ANNO: &str = "\
FBgn0000008\tgene a\tannotated={GO:0008150,GO:0003674} related={GO:0005575}
FBgn0000014\tgene b\tannotated={GO:0008150}

FBgn0000015\tgene c\trelated={GO:0008150}
";

    #[test]
    fn test_forward_and_reverse() {
        let lookups = AnnotationLookups::from_reader(ANNO.as_bytes()).unwrap();

        assert_eq!(lookups.gene_count(), 3);
        assert_eq!(lookups.labels(), ["annotated", "related"]);
        assert_eq!(
            lookups.terms_for("FBgn0000008", "annotated").unwrap(),
            ["GO:0008150", "GO:0003674"]
        );
        assert_eq!(
            lookups.genes_for("GO:0008150", "annotated").unwrap(),
            ["FBgn0000008", "FBgn0000014"]
        );
        assert_eq!(lookups.genes_for("GO:0008150", "related").unwrap(), ["FBgn0000015"]);
        assert!(lookups.genes_for("GO:0003674", "related").is_none());
    }

    #[test]
    fn test_wrong_column_count() {
        let err = AnnotationLookups::from_reader("FBgn1\tGO:1\n".as_bytes()).unwrap_err();

        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_item_without_label() {
        let err = AnnotationLookups::from_reader("FBgn1\tx\t{GO:1}\n".as_bytes()).unwrap_err();

        assert!(matches!(err, GoError::InvalidAnnotation(_)));
    }
}

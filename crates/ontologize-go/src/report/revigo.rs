// REVIGO submission of significant GO terms

use crate::models::Calculation;
use crate::report::ResultsTable;
use crate::{GoError, Result};
use tracing::info;
use url::Url;

pub const REVIGO_URL: &str = "http://revigo.irb.hr/";

/// REVIGO accepts at most this many terms per submission
pub const REVIGO_TERM_LIMIT: usize = 100;

pub const DEFAULT_GO_SIZES: &str = "Drosophila melanogaster";

/// Significant terms and display options for one REVIGO submission
#[derive(Debug, Clone, PartialEq)]
pub struct RevigoRequest {
    /// (GO id, score) pairs, best first
    pub terms: Vec<(String, String)>,
    pub calculation: Calculation,
    pub threshold: f64,
    /// Species whose GO term sizes REVIGO uses
    pub go_sizes: String,
}

impl RevigoRequest {
    /// Select terms from an Ontologizer results table
    ///
    /// Scores must beat `threshold` strictly: above it for MGSA, below it for
    /// p-value calculations. Only the best [`REVIGO_TERM_LIMIT`] terms are kept.
    pub fn from_table(table: &ResultsTable, calculation: Calculation, threshold: f64) -> Result<Self> {
        let id_column = table.column("ID")?;
        let score_column = table.column(calculation.score_column())?;

        let mut selected = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            let score = table.score(row, score_column, index + 1)?;
            let keep = if calculation.higher_is_better() {
                score > threshold
            } else {
                score < threshold
            };
            if !keep {
                continue;
            }

            let id = row.get(id_column).ok_or_else(|| {
                GoError::InvalidTable(format!("row {} has no ID column", index + 1))
            })?;
            selected.push((score, id.clone(), row[score_column].clone()));
        }

        if calculation.higher_is_better() {
            selected.sort_by(|(a, ..), (b, ..)| b.total_cmp(a));
        } else {
            selected.sort_by(|(a, ..), (b, ..)| a.total_cmp(b));
        }

        if selected.len() > REVIGO_TERM_LIMIT {
            info!(
                terms = selected.len(),
                threshold,
                limit = REVIGO_TERM_LIMIT,
                "Too many significant terms, truncating"
            );
            selected.truncate(REVIGO_TERM_LIMIT);
        }

        Ok(RevigoRequest {
            terms: selected.into_iter().map(|(_, id, score)| (id, score)).collect(),
            calculation,
            threshold,
            go_sizes: DEFAULT_GO_SIZES.to_string(),
        })
    }

    pub fn with_go_sizes(mut self, species: impl Into<String>) -> Self {
        self.go_sizes = species.into();
        self
    }

    /// One `<id>\t<score>` line per term
    pub fn input_go_list(&self) -> String {
        self.terms
            .iter()
            .map(|(id, score)| format!("{}\t{}", id, score))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Form parameters understood by REVIGO
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let (is_p_value, what_is_better) = if self.calculation.higher_is_better() {
            ("no", "higher")
        } else {
            ("yes", "lower")
        };

        vec![
            ("inputGoList", self.input_go_list()),
            ("isPValue", is_p_value.to_string()),
            ("whatIsBetter", what_is_better.to_string()),
            ("outputListSize", "medium".to_string()),
            ("goSizes", self.go_sizes.clone()),
            ("measure", "SIMREL".to_string()),
        ]
    }

    /// Submission URL with the parameters query-encoded
    pub fn url(&self, base: &str) -> Result<Url> {
        Url::parse_with_params(base, self.params())
            .map_err(|e| GoError::Parse(format!("Invalid REVIGO URL '{}': {}", base, e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn table(score_column: &str, rows: &[(&str, &str)]) -> ResultsTable {
        ResultsTable {
            header: vec!["ID".to_string(), "Pop.total".to_string(), score_column.to_string()],
            rows: rows
                .iter()
                .map(|(id, score)| vec![id.to_string(), "1".to_string(), score.to_string()])
                .collect(),
        }
    }

    #[test]
    fn test_selects_and_sorts_p_values() {
        let results = table(
            "p.adjusted",
            &[("GO:1", "0.04"), ("GO:2", "0.001"), ("GO:3", "0.1"), ("GO:4", "0.05")],
        );

        let request = RevigoRequest::from_table(&results, Calculation::ParentChildUnion, 0.05).unwrap();

        assert_eq!(request.input_go_list(), "GO:2\t0.001\nGO:1\t0.04");
    }

    #[test]
    fn test_mgsa_prefers_high_marginals() {
        let results = table("marg", &[("GO:1", "0.2"), ("GO:2", "0.9"), ("GO:3", "0.6")]);

        let request = RevigoRequest::from_table(&results, Calculation::Mgsa, 0.5).unwrap();

        assert_eq!(request.terms, [("GO:2".to_string(), "0.9".to_string()), ("GO:3".to_string(), "0.6".to_string())]);
        let params = request.params();
        assert!(params.contains(&("isPValue", "no".to_string())));
        assert!(params.contains(&("whatIsBetter", "higher".to_string())));
    }

    #[test]
    fn test_truncates_to_limit() {
        let rows: Vec<(String, String)> = (0..150)
            .map(|i| (format!("GO:{:07}", i), format!("0.{:04}", i + 1)))
            .collect();
        let borrowed: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();

        let request =
            RevigoRequest::from_table(&table("p.adjusted", &borrowed), Calculation::TermForTerm, 0.5).unwrap();

        assert_eq!(request.terms.len(), REVIGO_TERM_LIMIT);
        assert_eq!(request.terms[0].0, "GO:0000000");
    }

    #[test]
    fn test_url_encodes_parameters() {
        let results = table("p.adjusted", &[("GO:0008150", "0.01")]);
        let request = RevigoRequest::from_table(&results, Calculation::ParentChildUnion, 0.05)
            .unwrap()
            .with_go_sizes("Homo sapiens");

        let url = request.url(REVIGO_URL).unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("revigo.irb.hr"));
        assert!(query.contains(&("inputGoList".to_string(), "GO:0008150\t0.01".to_string())));
        assert!(query.contains(&("goSizes".to_string(), "Homo sapiens".to_string())));
        assert!(query.contains(&("measure".to_string(), "SIMREL".to_string())));
    }
}

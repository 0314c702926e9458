// Results table enriched with term names, definitions and annotated genes

use crate::lookup::LookupTable;
use crate::models::Calculation;
use crate::report::{AnnotationLookups, ResultsTable};
use crate::Result;
use tracing::{debug, info};

/// Build the reformatted results table
///
/// Output columns are `name`, `definition`, one column per annotation label
/// holding comma-joined genes, then the original columns. The GO id is the
/// first column of each input row. Ids absent from `lookup` get empty name and
/// definition.
///
/// With a `threshold`, rows failing [`Calculation::passes`] are dropped. Rows
/// are sorted by ascending score.
pub fn reformat_table(
    results: &ResultsTable,
    lookup: &LookupTable,
    annotations: &AnnotationLookups,
    calculation: Calculation,
    threshold: Option<f64>,
) -> Result<ResultsTable> {
    let score_column = results.column(calculation.score_column())?;
    let labels = annotations.labels();

    let mut header = vec!["name".to_string(), "definition".to_string()];
    header.extend(labels.iter().cloned());
    header.extend(results.header.iter().cloned());

    let mut scored = Vec::with_capacity(results.rows.len());
    let mut missing = 0usize;

    for (index, row) in results.rows.iter().enumerate() {
        let score = results.score(row, score_column, index + 1)?;
        if let Some(threshold) = threshold {
            if !calculation.passes(score, threshold) {
                continue;
            }
        }

        let id = row.first().map(String::as_str).unwrap_or_default();
        if !lookup.contains(id) {
            missing += 1;
        }
        let name = lookup.name_of(id).unwrap_or_default();
        let definition = lookup.definition_of(id).unwrap_or_default();

        let mut out = Vec::with_capacity(header.len());
        out.push(name);
        out.push(definition);
        for label in labels {
            out.push(
                annotations
                    .genes_for(id, label)
                    .map(|genes| genes.join(","))
                    .unwrap_or_default(),
            );
        }
        out.extend(row.iter().cloned());

        scored.push((score, out));
    }

    scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    if missing > 0 {
        debug!(missing, "Result terms not found in GO lookup table");
    }
    info!(
        rows = scored.len(),
        dropped = results.rows.len() - scored.len(),
        "Reformatted results table"
    );

    Ok(ResultsTable {
        header,
        rows: scored.into_iter().map(|(_, row)| row).collect(),
    })
}

// Tab-separated results table

use crate::{GoError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Header plus rows of a tab-separated table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultsTable {
    /// Read a table whose first line is the header
    ///
    /// Line terminators are stripped and blank lines skipped; empty trailing
    /// cells are kept.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => split_row(&line?),
            None => return Err(GoError::InvalidTable("table is empty".to_string())),
        };

        let mut rows = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(split_row(&line));
        }

        Ok(ResultsTable { header, rows })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GoError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            GoError::Stream(source) => GoError::io(path, source),
            GoError::InvalidTable(msg) => {
                GoError::InvalidTable(format!("{}: {}", path.display(), msg))
            },
            other => other,
        })
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self.header.join("\t"))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| GoError::io(path, e))?;
        self.to_writer(BufWriter::new(file)).map_err(|e| match e {
            GoError::Stream(source) => GoError::io(path, source),
            other => other,
        })
    }

    /// Index of a header column
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| GoError::InvalidTable(format!("missing column '{}'", name)))
    }

    /// Numeric value of `column` in `row`; `row_number` is 1-based, header excluded
    pub fn score(&self, row: &[String], column: usize, row_number: usize) -> Result<f64> {
        let cell = row.get(column).ok_or_else(|| {
            GoError::InvalidTable(format!(
                "row {} has {} columns, expected at least {}",
                row_number,
                row.len(),
                column + 1
            ))
        })?;

        cell.trim().parse::<f64>().map_err(|e| {
            GoError::InvalidTable(format!(
                "row {} column '{}': '{}' is not a number ({})",
                row_number, self.header[column], cell, e
            ))
        })
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TABLE: &str = "ID\tPop.total\tp\tp.adjusted\nGO:0008150\t100\t0.001\t0.01\n\nGO:0003674\t80\t0.2\t0.5\n";

    #[test]
    fn test_read_table() {
        let table = ResultsTable::from_reader(TABLE.as_bytes()).unwrap();

        assert_eq!(table.header, ["ID", "Pop.total", "p", "p.adjusted"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column("p.adjusted").unwrap(), 3);
        assert!(table.column("marg").is_err());
    }

    #[test]
    fn test_score_parsing() {
        let table = ResultsTable::from_reader(TABLE.as_bytes()).unwrap();
        let column = table.column("p.adjusted").unwrap();

        assert_eq!(table.score(&table.rows[1], column, 2).unwrap(), 0.5);

        let bad = vec!["GO:1".to_string(), "x".to_string(), "y".to_string(), "n/a".to_string()];
        let err = table.score(&bad, column, 3).unwrap_err();
        assert!(err.to_string().contains("row 3"));

        let short = vec!["GO:1".to_string()];
        assert!(table.score(&short, column, 4).is_err());
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(matches!(
            ResultsTable::from_reader("".as_bytes()),
            Err(GoError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_write_round_trip() {
        let table = ResultsTable::from_reader(TABLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("ID\tPop.total\tp\tp.adjusted\n"));
    }
}

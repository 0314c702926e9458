// Streaming OBO parser (term stanzas only)

use crate::obo::fields::FieldMap;
use crate::obo::record::{split_field, TermRecord};
use crate::{GoError, Result};
use std::io::{BufRead, Lines};
use tracing::{debug, trace};

/// Opens a term stanza
pub const TERM_MARKER: &str = "[Term]";

/// Opens a typedef stanza; the first one ends term parsing
pub const TYPEDEF_MARKER: &str = "[Typedef]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping header lines until the first `[Term]`
    Header,
    /// Inside the term section
    Terms,
    Done,
}

/// Lines of the term block being accumulated
#[derive(Debug, Default)]
struct Block {
    first_line: usize,
    fields: FieldMap,
    raw: Vec<String>,
}

impl Block {
    fn starting_at(first_line: usize) -> Self {
        Block {
            first_line,
            ..Default::default()
        }
    }

    fn push(&mut self, line: &str, line_number: usize) -> Result<()> {
        let (key, value) = split_field(line).ok_or_else(|| GoError::MalformedLine {
            line_number,
            line: line.to_string(),
        })?;

        self.fields.push(key, value);
        self.raw.push(line.to_string());
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn finish(self) -> Result<TermRecord> {
        TermRecord::assemble(self.fields, self.raw, self.first_line)
    }
}

/// Lazy, single-pass parser yielding one [`TermRecord`] per `[Term]` block
///
/// - Everything before the first line equal to `[Term]` is header and skipped.
///   A stream without that line yields nothing.
/// - Blank lines are dropped; they do not end a block.
/// - A line starting with `[Term]` closes the current block.
/// - A line starting with `[Typedef]` closes the current block and ends
///   parsing. Term stanzas after it are never read.
/// - End of input closes the current block, so a trailing block is emitted.
/// - Empty blocks (two markers in a row) produce no record.
///
/// The iterator stops for good after yielding an error.
pub struct OboParser<R> {
    lines: Lines<R>,
    line_number: usize,
    state: State,
    block: Block,
}

impl<R: BufRead> OboParser<R> {
    pub fn new(reader: R) -> Self {
        OboParser {
            lines: reader.lines(),
            line_number: 0,
            state: State::Header,
            block: Block::default(),
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Emit the current block, if it has content, and open a fresh one
    fn close_block(&mut self) -> Option<Result<TermRecord>> {
        let block = std::mem::replace(&mut self.block, Block::starting_at(self.line_number + 1));
        if block.is_empty() {
            return None;
        }
        Some(block.finish())
    }

    fn advance(&mut self) -> Option<Result<TermRecord>> {
        while self.state != State::Done {
            let Some(line) = self.lines.next() else {
                debug!(lines = self.line_number, "Reached end of OBO input");
                self.state = State::Done;
                return self.close_block();
            };
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(GoError::Read {
                        line_number: self.line_number,
                        source,
                    }))
                },
            };

            match self.state {
                State::Header => {
                    if line == TERM_MARKER {
                        trace!(line = self.line_number, "Header ends");
                        self.state = State::Terms;
                        self.block = Block::starting_at(self.line_number + 1);
                    }
                },
                State::Terms => {
                    if line.starts_with(TYPEDEF_MARKER) {
                        debug!(line = self.line_number, "Typedef section reached, stopping");
                        self.state = State::Done;
                        return self.close_block();
                    }

                    if line.starts_with(TERM_MARKER) {
                        if let Some(record) = self.close_block() {
                            return Some(record);
                        }
                        continue;
                    }

                    let content = line.trim();
                    if content.is_empty() {
                        continue;
                    }

                    if let Err(e) = self.block.push(content, self.line_number) {
                        return Some(Err(e));
                    }
                },
                State::Done => break,
            }
        }

        None
    }
}

impl<R: BufRead> Iterator for OboParser<R> {
    type Item = Result<TermRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.advance();
        if matches!(item, Some(Err(_))) {
            self.state = State::Done;
        }
        item
    }
}

impl<R: BufRead> std::iter::FusedIterator for OboParser<R> {}

// ============================================================================
// Tests
// ============================================================================

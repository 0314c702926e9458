// Build progress reporting
//
// The builder does not log on its own behalf. Callers hand it a reporter scoped
// to one build; `TracingReporter` is the usual choice.

use crate::obo::TermRecord;
use tracing::{debug, info, info_span, warn, Span};

/// How often `TracingReporter` logs progress, in terms
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Totals for one completed build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Records read from the parser
    pub records: usize,
    /// Distinct ids in the finished table
    pub terms: usize,
    /// Records that replaced an earlier record with the same id
    pub replaced: usize,
}

/// Receives build events from [`crate::LookupBuilder`]
pub trait BuildReporter {
    fn term_added(&mut self, _record: &TermRecord, _count: usize) {}

    fn duplicate_replaced(&mut self, _id: &str) {}

    fn finished(&mut self, _summary: &BuildSummary) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl BuildReporter for NullReporter {}

/// Emits `tracing` events inside a span dedicated to one build
pub struct TracingReporter {
    span: Span,
}

impl TracingReporter {
    /// `source` names the input being built, usually the OBO path
    pub fn new(source: &str) -> Self {
        TracingReporter {
            span: info_span!("build_lookup", source = %source),
        }
    }
}

impl BuildReporter for TracingReporter {
    fn term_added(&mut self, record: &TermRecord, count: usize) {
        let _entered = self.span.enter();
        if count % PROGRESS_INTERVAL == 0 {
            info!(terms = count, last_id = %record.id(), "Parsing GO terms");
        }
    }

    fn duplicate_replaced(&mut self, id: &str) {
        let _entered = self.span.enter();
        warn!(id = %id, "Duplicate term id, keeping the later block");
    }

    fn finished(&mut self, summary: &BuildSummary) {
        let _entered = self.span.enter();
        if summary.replaced > 0 {
            debug!(replaced = summary.replaced, "Duplicate ids were overwritten");
        }
        info!(
            records = summary.records,
            terms = summary.terms,
            "Lookup table built"
        );
    }
}

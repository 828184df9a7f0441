//! Context selection and assembly.
//!
//! Once a query has resolved to a set of capture timestamps, the newest few
//! are selected to bound prompt size, ordered most-recent-first, and their
//! text is stitched into the context block handed to the answerer.

use crate::models::{Record, Timestamp};
use crate::storage::ArchiveStore;
use crate::Result;

/// How many captures a query feeds to the answerer at most.
pub const DEFAULT_CONTEXT_LIMIT: usize = 5;

/// Visual divider between capture blocks in the assembled context.
const BLOCK_SEPARATOR: &str = "==================================================";

/// Takes the most recent `limit` entries of an ascending set.
///
/// Returns the tail slice; a set shorter than `limit` is returned whole,
/// never padded.
#[must_use]
pub fn select_recent(moments: &[Timestamp], limit: usize) -> &[Timestamp] {
    let start = moments.len().saturating_sub(limit);
    &moments[start..]
}

/// Orders a selection most-recent-first for presentation.
#[must_use]
pub fn present(selected: &[Timestamp]) -> Vec<Timestamp> {
    let mut ordered: Vec<Timestamp> = selected.to_vec();
    ordered.reverse();
    ordered
}

/// Loads the selected captures and assembles the context text.
///
/// `ordered` is rendered in the given (most-recent-first) order, each capture
/// as a `Timestamp:` / `Content:` block with a divider line.
///
/// # Errors
///
/// Propagates [`crate::Error::RecordNotFound`] from the underlying load —
/// a capture that vanished between scan and load aborts the query rather
/// than silently thinning the context.
pub fn assemble(store: &ArchiveStore, ordered: &[Timestamp]) -> Result<(String, Vec<Record>)> {
    let mut records = Vec::with_capacity(ordered.len());
    for moment in ordered {
        let content = store.load(moment)?;
        records.push(Record::new(*moment, content));
    }

    let blocks: Vec<String> = records
        .iter()
        .map(|record| {
            format!(
                "Timestamp: {}\nContent:\n{}\n{BLOCK_SEPARATOR}",
                record.moment.long_format(),
                record.content
            )
        })
        .collect();

    Ok((blocks.join("\n"), records))
}

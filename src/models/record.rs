//! Capture records.

use super::Timestamp;

/// A capture with its extracted text content.
///
/// The archive is indexed by [`Timestamp`] alone; a `Record` only exists once
/// a capture has been selected for context and its text artifact loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The moment the capture was taken.
    pub moment: Timestamp,
    /// The extracted screen text.
    pub content: String,
}

impl Record {
    /// Creates a record from a moment and its loaded content.
    #[must_use]
    pub fn new(moment: Timestamp, content: impl Into<String>) -> Self {
        Self {
            moment,
            content: content.into(),
        }
    }
}

//! # Rewind
//!
//! A personal activity-memory assistant over timestamped screen captures.
//!
//! An external capture agent periodically drops `screenshot_<TS>.png` /
//! `screenshot_<TS>.txt` pairs (the `.txt` holding extracted screen text) into
//! an archive directory. Rewind scans that archive, orders the captures by
//! time, resolves the moments relevant to a question — the single closest
//! capture, or everything inside a lookback window — and assembles their text
//! as context for an LLM answerer.
//!
//! ## Features
//!
//! - Canonical `YYYYMMDD_HHMMSS` capture timestamps, lexicographically and
//!   chronologically ordered
//! - Nearest-moment and time-window resolution over the archive
//! - Bounded most-recent-first context assembly for prompt construction
//! - Pluggable answerer backends (Gemini, Ollama)
//!
//! ## Example
//!
//! ```rust,ignore
//! use rewind::{ArchiveStore, AskService};
//! use rewind::llm::GeminiClient;
//!
//! let store = ArchiveStore::new("/home/me/Rewind");
//! let service = AskService::new(store, GeminiClient::new());
//! let outcome = service.ask("what was I reading about rust?", None)?;
//! println!("{}", outcome.answer);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::{AnswerProvider, LlmConfig, RewindConfig};
pub use llm::Answerer;
pub use models::{Record, TimeWindow, Timestamp};
pub use services::{AskOutcome, AskService, QueryMode};
pub use storage::ArchiveStore;

/// Error type for rewind operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `MalformedTimestamp` | A timestamp string is the wrong shape or encodes an impossible calendar value |
/// | `RecordNotFound` | A capture's text artifact is missing when its content is loaded |
/// | `EmptySet` | An operation requiring at least one capture was given none |
/// | `NoRecordsInWindow` | A lookback window resolved to zero captures |
/// | `MalformedDuration` | A lookback expression does not match `<count> <unit>` |
/// | `Answerer` | The answer-generation backend failed |
/// | `OperationFailed` | I/O errors, config parse failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A timestamp string does not parse.
    ///
    /// Raised when:
    /// - The string is not exactly `YYYYMMDD_HHMMSS`
    /// - A field encodes an impossible calendar value (month 13, Feb 30, hour 25)
    ///
    /// During an archive scan this is handled by skipping the artifact; the
    /// scan itself never aborts on one bad name.
    #[error("malformed timestamp '{0}': expected YYYYMMDD_HHMMSS")]
    MalformedTimestamp(String),

    /// A capture's text artifact is missing.
    ///
    /// Raised when content is loaded for a moment that resolved during scan
    /// but whose file has since disappeared (lost race with external
    /// deletion), or when a caller supplies a stale timestamp. Always
    /// surfaced; swallowing it would corrupt the assembled context.
    #[error("capture {id} could not be read: {cause}")]
    RecordNotFound {
        /// The compact timestamp of the missing capture.
        id: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation requiring at least one capture was given none.
    ///
    /// Callers are expected to pre-check that the archive is non-empty before
    /// resolving a question; reaching this means "nothing recorded yet".
    #[error("no captures recorded yet")]
    EmptySet,

    /// A lookback window resolved to zero captures.
    ///
    /// Reported to the user and not retried.
    #[error("no captures found in the last {window}")]
    NoRecordsInWindow {
        /// The lookback expression that produced the empty window.
        window: String,
    },

    /// A lookback expression does not match the `<count> <unit>` grammar.
    ///
    /// Aborts range resolution; the question is never silently answered in
    /// point mode instead.
    #[error("malformed lookback '{0}': expected '<count> <unit>' with unit day(s), week(s) or month(s)")]
    MalformedDuration(String),

    /// The answer-generation backend failed.
    ///
    /// Raised when:
    /// - The HTTP request errors (timeout, connect, DNS)
    /// - The API returns a non-success status
    /// - The response body cannot be decoded
    #[error("answerer failed: {0}")]
    Answerer(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur outside the record-load path
    /// - The configuration file cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for rewind operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Question orchestration.
//!
//! Turns a user question (plus an optional lookback expression) into an
//! ordered context of capture text and an answer from the configured
//! backend. The capture set is rebuilt fresh on every question; nothing is
//! cached across calls.

use super::{context, lookback, temporal};
use crate::llm::Answerer;
use crate::models::{TimeWindow, Timestamp};
use crate::storage::ArchiveStore;
use crate::{Error, Result};

/// Phrases that signal a question is asking *when* something happened, so
/// the front-end should collect a lookback expression before resolving.
const TEMPORAL_PHRASES: [&str; 3] = ["when", "last time", "previous"];

/// How a question was resolved against the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Resolved to the single capture closest to now.
    Point,
    /// Resolved to all captures inside a lookback window.
    Range,
}

/// The result of answering one question.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// The answer text, or the surfaced backend failure text.
    pub answer: String,
    /// The captures behind the answer, most recent first.
    pub moments: Vec<Timestamp>,
    /// How the question was resolved.
    pub mode: QueryMode,
}

/// Checks whether a question contains temporal-lookup language.
///
/// Substring match on the lowercased question, as a word like "whenever"
/// only costs an extra lookback prompt.
#[must_use]
pub fn wants_lookback(question: &str) -> bool {
    let lowered = question.to_lowercase();
    TEMPORAL_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Orchestrates scan, temporal resolution, context assembly, and the
/// answerer call for one question.
pub struct AskService<A: Answerer> {
    /// The capture archive.
    store: ArchiveStore,
    /// The answer-generation backend.
    answerer: A,
    /// Maximum captures fed to the answerer.
    context_limit: usize,
}

impl<A: Answerer> AskService<A> {
    /// Creates a service with the default context limit.
    #[must_use]
    pub fn new(store: ArchiveStore, answerer: A) -> Self {
        Self {
            store,
            answerer,
            context_limit: context::DEFAULT_CONTEXT_LIMIT,
        }
    }

    /// Sets the maximum number of captures fed to the answerer.
    #[must_use]
    pub const fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    /// Returns the underlying archive store.
    #[must_use]
    pub const fn store(&self) -> &ArchiveStore {
        &self.store
    }

    /// Answers a question.
    ///
    /// With no lookback the question resolves in point mode: the single
    /// capture closest to now. With a lookback expression it resolves in
    /// range mode over `[now - lookback, now]`. An answerer failure is
    /// surfaced as the answer text rather than an error, so the user sees
    /// why generation failed.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySet`] when nothing has been recorded yet
    /// - [`Error::MalformedDuration`] when the lookback does not parse;
    ///   the question is never silently downgraded to point mode
    /// - [`Error::NoRecordsInWindow`] when the window matches nothing
    /// - [`Error::RecordNotFound`] when a selected capture vanished before
    ///   its content could be loaded
    pub fn ask(&self, question: &str, lookback: Option<&str>) -> Result<AskOutcome> {
        let all = self.store.scan()?;
        if all.is_empty() {
            return Err(Error::EmptySet);
        }

        let now = Timestamp::now();
        let (ordered, mode) = match lookback {
            Some(expression) => (self.resolve_range(now, expression, &all)?, QueryMode::Range),
            None => (self.resolve_point(now, &all)?, QueryMode::Point),
        };

        let (assembled, _records) = context::assemble(&self.store, &ordered)?;

        tracing::info!(
            mode = ?mode,
            captures = ordered.len(),
            "context assembled, requesting answer"
        );

        let answer = match self.answerer.answer(question, &assembled, &ordered) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "answerer failed, surfacing failure text");
                format!("Error generating response: {e}")
            },
        };

        Ok(AskOutcome {
            answer,
            moments: ordered,
            mode,
        })
    }

    /// Point mode: the single capture closest to now, no reordering needed.
    fn resolve_point(&self, now: Timestamp, all: &[Timestamp]) -> Result<Vec<Timestamp>> {
        let nearest = temporal::closest(&now, all)?;
        Ok(vec![nearest])
    }

    /// Range mode: everything inside `[now - lookback, now]`, bounded and
    /// ordered most-recent-first.
    fn resolve_range(
        &self,
        now: Timestamp,
        expression: &str,
        all: &[Timestamp],
    ) -> Result<Vec<Timestamp>> {
        let duration = lookback::parse_lookback(expression)?;
        let window = TimeWindow::lookback(now, duration);
        let matches = temporal::within(&window, all);
        if matches.is_empty() {
            return Err(Error::NoRecordsInWindow {
                window: expression.trim().to_string(),
            });
        }

        let selected = context::select_recent(&matches, self.context_limit);
        Ok(context::present(selected))
    }
}

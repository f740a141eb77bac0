//! src/model/overlay.rs
//! ============================================================================
//! # SearchOverlayState: Overlay Core State Machine
//!
//! Pure state for the floating search overlay: visibility, the two-phase
//! input flow (corpus directory, then query), results, selection, loading
//! and error flags. Transitions are plain methods; the ones with side
//! effects to run return an [`OverlayEffect`] value that the event loop
//! executes. Nothing here touches channels, the terminal, or the network,
//! which keeps every transition unit-testable in isolation.
//!
//! Completion ordering is handled here too: each search completion is
//! applied through [`SearchOverlayState::apply_search_result`], which drops
//! payloads whose issued query text no longer matches the current input.

use crate::model::search::ResultSet;

/// Which of the two data-entry modes the overlay is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Picking the corpus directory to index.
    Directory,

    /// Issuing ranked-search queries against the built index.
    Query,
}

/// Side effect requested by a transition, executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEffect {
    /// Nothing to run.
    None,

    /// Persist the directory and ask the service to (re)build its index.
    BuildIndex { corpus_dir: String },

    /// Ask the service to rank documents for the query.
    RunSearch { query: String },

    /// The highlighted result entry was activated.
    ActivateEntry { label: String },
}

/// One overlay exists per process and lives for its whole lifetime;
/// show/hide flips `visible`, never recreates the state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOverlayState {
    pub visible: bool,

    pub phase: Phase,

    /// Corpus directory text. Survives toggles and is seeded from the
    /// recent-state store at startup.
    pub dir_input: String,

    /// Query text. Cleared on every toggle.
    pub query_input: String,

    /// Latest applied search outcome. Replaced wholesale, never merged.
    pub results: Option<ResultSet>,

    /// Highlighted entry index. `Some` only while `results` has entries.
    pub selected: Option<usize>,

    /// A build or search call is in flight.
    pub loading: bool,

    /// Displayable failure from the most recent completion.
    pub error: Option<String>,
}

impl SearchOverlayState {
    pub fn new(last_dir: String) -> Self {
        Self {
            visible: false,
            phase: Phase::Directory,
            dir_input: last_dir,
            query_input: String::new(),
            results: None,
            selected: None,
            loading: false,
            error: None,
        }
    }

    /// Toggle-shortcut transition. Runs the same reset in both directions:
    /// back to the directory phase with query text, results, selection and
    /// error cleared. The directory text survives.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.phase = Phase::Directory;
        self.query_input.clear();
        self.results = None;
        self.selected = None;
        self.error = None;
    }

    /// Escape: hide only. The rest of the state stays put so in-flight
    /// completions still land against the text they were issued for; the
    /// next toggle resets it anyway.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Character typed into the active input. Query edits invalidate any
    /// displayed results and error synchronously.
    pub fn push_char(&mut self, c: char) {
        match self.phase {
            Phase::Directory => self.dir_input.push(c),
            Phase::Query => {
                self.query_input.push(c);
                self.clear_results();
            }
        }
    }

    /// Backspace on the active input.
    pub fn pop_char(&mut self) {
        match self.phase {
            Phase::Directory => {
                self.dir_input.pop();
            }
            Phase::Query => {
                if self.query_input.pop().is_some() {
                    self.clear_results();
                }
            }
        }
    }

    /// Enter. Dispatches on the phase; in the query phase a highlighted
    /// entry takes priority over re-submitting the text.
    pub fn submit(&mut self) -> OverlayEffect {
        match self.phase {
            Phase::Directory => self.submit_directory(),
            Phase::Query => self.submit_query(),
        }
    }

    /// Move the highlight down one entry, wrapping to the top.
    pub fn select_next(&mut self) {
        let count = self.entry_count();
        if self.phase != Phase::Query || count == 0 {
            return;
        }

        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Move the highlight up one entry, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let count = self.entry_count();
        if self.phase != Phase::Query || count == 0 {
            return;
        }

        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        });
    }

    /// Successful index build advances to the query phase. Completions are
    /// applied whenever they arrive; reapplying when already there is a
    /// no-op.
    pub fn apply_build_success(&mut self) {
        self.loading = false;
        self.phase = Phase::Query;
    }

    /// Failed build surfaces the failure and leaves the phase alone, so a
    /// directory-phase overlay stays where the user can correct the path.
    pub fn apply_build_failure(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Search completion for the query text it was issued with. A stale
    /// completion (the text has changed since issue) only clears the
    /// loading flag; its payload is dropped.
    pub fn apply_search_result(&mut self, issued_query: &str, result: Result<ResultSet, String>) {
        self.loading = false;

        if issued_query != self.query_input {
            return;
        }

        match result {
            Ok(set) => {
                self.selected = if set.is_empty() { None } else { Some(0) };
                self.results = Some(set);
            }
            Err(message) => {
                self.error = Some(message);
                self.results = None;
                self.selected = None;
            }
        }
    }

    fn submit_directory(&mut self) -> OverlayEffect {
        if self.dir_input.trim().is_empty() {
            return OverlayEffect::None;
        }

        self.loading = true;
        self.error = None;

        OverlayEffect::BuildIndex {
            corpus_dir: self.dir_input.clone(),
        }
    }

    fn submit_query(&mut self) -> OverlayEffect {
        if let Some(results) = &self.results
            && let Some(entry) = self.selected.and_then(|i| results.entries.get(i))
        {
            return OverlayEffect::ActivateEntry {
                label: entry.label.clone(),
            };
        }

        if self.query_input.trim().is_empty() {
            self.results = None;
            self.selected = None;
            return OverlayEffect::None;
        }

        self.loading = true;
        self.error = None;

        OverlayEffect::RunSearch {
            query: self.query_input.clone(),
        }
    }

    fn clear_results(&mut self) {
        self.results = None;
        self.selected = None;
        self.error = None;
    }

    fn entry_count(&self) -> usize {
        self.results.as_ref().map_or(0, ResultSet::len)
    }
}

impl Default for SearchOverlayState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

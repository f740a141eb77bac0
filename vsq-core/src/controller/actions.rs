//! src/controller/actions.rs
//! ============================================================================
//! # Action: Event Loop Command Vocabulary
//!
//! Everything the event loop can be asked to do, whether it originated from
//! a keypress, a finished task, or an internal sender. Key handlers translate
//! terminal events into these; `dispatch_action` executes them.

use crate::controller::event_loop::TaskResult;

/// All actions the event loop can dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Run the activation side effect for a result entry label.
    ActivateEntry(String),

    /// Persist the corpus directory and start an index build for it.
    BuildIndex(String),

    /// Hide the search overlay without touching the rest of its state.
    HideOverlay,

    /// No state change required.
    NoOp,

    /// Exit the application (handled in the main loop).
    Quit,

    /// Terminal was resized to (width, height).
    Resize(u16, u16),

    /// Start a ranked search for the query text.
    RunSearch(String),

    /// A spawned task finished.
    TaskResult(TaskResult),

    /// Periodic timer: drives spinner animation and notification expiry.
    Tick,

    /// Show or hide the key-reference overlay.
    ToggleHelp,

    /// Show or hide the search overlay.
    ToggleOverlay,
}

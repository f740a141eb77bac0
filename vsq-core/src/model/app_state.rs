//! src/model/app_state.rs
//! ============================================================================
//! # AppState: Shared Application State
//!
//! The single mutable bag behind `Arc<Mutex<_>>`: configuration, the
//! recent-state store, the service gateway, the overlay state machine,
//! notification toasts and the redraw flag. Only the event loop mutates it;
//! spawned tasks report back over the task channel instead.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::gateway::SearchGateway;
use crate::config::Config;
use crate::controller::actions::Action;
use crate::controller::event_loop::TaskResult;
use crate::model::overlay::SearchOverlayState;
use crate::store::RecentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u64>,
}

pub struct AppState {
    /// Immutable after startup.
    pub config: Arc<Config>,

    /// Recent-state persistence handle. The event loop is the only writer.
    pub store: RecentStore,

    /// Search service client shared with spawned tasks.
    pub gateway: SearchGateway,

    /// The overlay state machine.
    pub overlay: SearchOverlayState,

    /// Key-reference overlay toggle.
    pub help_visible: bool,

    /// Current notification toast (if any).
    pub notification: Option<Notification>,

    /// Sender handed to spawned tasks for their completion message.
    pub task_tx: UnboundedSender<TaskResult>,

    /// Sender for actions injected outside the key-event path.
    pub action_tx: UnboundedSender<Action>,

    /// Set whenever state changed in a way the next frame must show.
    pub redraw: bool,

    /// Process start, the time base for spinner animation.
    pub started_at: Instant,

    next_task_id: u64,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: RecentStore,
        gateway: SearchGateway,
        overlay: SearchOverlayState,
        task_tx: UnboundedSender<TaskResult>,
        action_tx: UnboundedSender<Action>,
    ) -> Self {
        Self {
            config,
            store,
            gateway,
            overlay,
            help_visible: false,
            notification: None,
            task_tx,
            action_tx,
            redraw: true,
            started_at: Instant::now(),
            next_task_id: 0,
        }
    }

    /// Monotonic id for log correlation of spawned tasks.
    pub fn next_task_id(&mut self) -> u64 {
        self.next_task_id += 1;
        self.next_task_id
    }

    /// Show a notification with auto-dismiss
    pub fn show_notification(
        &mut self,
        message: String,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u64>,
    ) {
        self.notification = Some(Notification {
            message,
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
    }

    /// Show an info notification
    pub fn show_info(&mut self, message: String) {
        self.show_notification(message, NotificationLevel::Info, Some(3000));
    }

    /// Show a warning notification
    pub fn show_warning(&mut self, message: String) {
        self.show_notification(message, NotificationLevel::Warning, Some(5000));
    }

    /// Show an error notification
    pub fn show_error(&mut self, message: String) {
        self.show_notification(message, NotificationLevel::Error, None); // No auto-dismiss for errors
    }

    /// Show a success notification
    pub fn show_success(&mut self, message: String) {
        self.show_notification(message, NotificationLevel::Success, Some(2000));
    }

    /// Dismiss the current notification
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Check if notification should auto-dismiss and do so if needed
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification {
            if let Some(auto_dismiss_ms) = notification.auto_dismiss_ms {
                if notification.timestamp.elapsed().as_millis() > auto_dismiss_ms as u128 {
                    self.notification = None;
                    return true; // Notification was dismissed
                }
            }
        }
        false
    }
}

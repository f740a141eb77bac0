//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop Controller
//!
//! The single place where state changes happen:
//! - Owns the one crossterm `EventStream` for the process lifetime and maps
//!   key events onto the overlay state machine.
//! - Receives completions from spawned gateway tasks over the task channel
//!   and applies them through the state machine's staleness guards.
//! - Executes the effects transitions ask for: persisting the corpus
//!   directory, spawning build/search tasks, activation feedback.
//!
//! A periodic tick drives spinner animation and notification expiry; it
//! makes no domain transitions.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{Mutex, MutexGuard, mpsc};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace, warn};

use crate::controller::actions::Action;
use crate::model::app_state::AppState;
use crate::model::overlay::OverlayEffect;
use crate::model::search::ResultSet;
use crate::store::RecentState;
use crate::tasks::build_index_task::build_index_task;
use crate::tasks::search_task::search_task;

/// How often the tick arm fires. Fast enough for a smooth spinner.
const TICK_INTERVAL_MS: u64 = 120;

/// Completion message from a spawned gateway task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    /// Index build finished.
    BuildFinished {
        task_id: u64,
        corpus_dir: String,
        result: Result<String, String>,
        execution_time: Duration,
    },

    /// Ranked search finished. Carries the query it was issued for so the
    /// receiver can drop answers that no longer match the input.
    SearchFinished {
        task_id: u64,
        query: String,
        result: Result<ResultSet, String>,
        execution_time: Duration,
    },
}

pub struct EventLoop {
    pub app: Arc<Mutex<AppState>>,
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tick: Interval,
}

impl EventLoop {
    pub fn new(
        app: Arc<Mutex<AppState>>,
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        info!("Initializing event loop controller");

        let mut tick = interval(Duration::from_millis(TICK_INTERVAL_MS));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            app,
            task_rx,
            event_stream: EventStream::new(),
            action_rx,
            tick,
        }
    }

    /// Wait for the next action from any source.
    pub async fn next_action(&mut self) -> Option<Action> {
        tokio::select! {
            Some(Ok(event)) = self.event_stream.next() => {
                trace!("Terminal event received: {:?}", event);
                let action = self.handle_terminal_event(event).await;
                debug!("Terminal event mapped to action: {:?}", action);
                Some(action)
            }

            Some(task_result) = self.task_rx.recv() => {
                debug!("Task result received: {:?}", task_result);
                Some(Action::TaskResult(task_result))
            }

            Some(action) = self.action_rx.recv() => {
                debug!("Direct action received: {:?}", action);
                Some(action)
            }

            _ = self.tick.tick() => Some(Action::Tick),

            else => {
                info!("Event loop terminated - no more events");
                None
            }
        }
    }

    async fn handle_terminal_event(&self, event: TermEvent) -> Action {
        let app = self.app.lock().await;
        let overlay_visible = app.overlay.visible;
        let help_visible = app.help_visible;
        let has_notification = app.notification.is_some();
        drop(app);

        match event {
            TermEvent::Key(key_event) => {
                trace!(
                    "Key event: code={:?}, modifiers={:?}",
                    key_event.code, key_event.modifiers
                );

                // Ctrl+C always quits, raw mode swallows the signal
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    return Action::Quit;
                }

                // Global toggle shortcut - live from every surface
                if Self::is_toggle_shortcut(&key_event) {
                    return Action::ToggleOverlay;
                }

                // Global Escape handling - highest priority
                if key_event.code == KeyCode::Esc {
                    return self
                        .handle_escape_key(overlay_visible, help_visible, has_notification)
                        .await;
                }

                // Auto-dismiss notifications on any key
                if has_notification {
                    debug!("Auto-dismissing notification on key press");
                    let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                    app.dismiss_notification();
                    app.redraw = true;
                    // Continue processing the key event
                }

                if help_visible {
                    Self::handle_help_keys(key_event)
                } else if overlay_visible {
                    self.handle_overlay_keys(key_event).await
                } else {
                    Self::handle_home_keys(key_event)
                }
            }

            TermEvent::Resize(x, y) => {
                info!("Terminal resize: {}x{}", x, y);
                Action::Resize(x, y)
            }

            _ => {
                trace!("Unhandled terminal event: {:?}", event);
                Action::Tick
            }
        }
    }

    /// Ctrl+Space. Some terminals deliver it as `Char(' ')` with CONTROL,
    /// others as a NUL key.
    fn is_toggle_shortcut(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(' ') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Null => true,
            _ => false,
        }
    }

    async fn handle_escape_key(
        &self,
        overlay_visible: bool,
        help_visible: bool,
        has_notification: bool,
    ) -> Action {
        if help_visible {
            debug!("Escape: closing help overlay");
            return Action::ToggleHelp;
        }

        // Escape hides a visible overlay no matter what else is on screen
        if overlay_visible {
            debug!("Escape: hiding search overlay");
            return Action::HideOverlay;
        }

        if has_notification {
            debug!("Escape: dismissing notification");
            let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
            app.dismiss_notification();
            app.redraw = true;
            return Action::NoOp;
        }

        debug!("Escape at top level: quitting");
        Action::Quit
    }

    async fn handle_overlay_keys(&self, key: KeyEvent) -> Action {
        trace!("Search overlay key: {:?}", key.code);

        match key.code {
            KeyCode::Char(c) => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.push_char(c);
                app.redraw = true;
                drop(app);

                Action::NoOp
            }

            KeyCode::Backspace => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.pop_char();
                app.redraw = true;
                drop(app);

                Action::NoOp
            }

            KeyCode::Enter => self.handle_overlay_enter_key().await,

            KeyCode::Up => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.select_prev();
                app.redraw = true;
                trace!("Overlay selection: {:?}", app.overlay.selected);
                drop(app);

                Action::NoOp
            }

            KeyCode::Down => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.select_next();
                app.redraw = true;
                trace!("Overlay selection: {:?}", app.overlay.selected);
                drop(app);

                Action::NoOp
            }

            _ => {
                trace!("Search overlay: ignoring key {:?}", key.code);
                Action::NoOp
            }
        }
    }

    /// Enter is phase-overloaded; the transition decides what it means and
    /// answers with the effect to run.
    async fn handle_overlay_enter_key(&self) -> Action {
        debug!("Search overlay: enter pressed");
        let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
        let effect = app.overlay.submit();
        app.redraw = true;
        drop(app);

        match effect {
            OverlayEffect::None => Action::NoOp,
            OverlayEffect::BuildIndex { corpus_dir } => Action::BuildIndex(corpus_dir),
            OverlayEffect::RunSearch { query } => Action::RunSearch(query),
            OverlayEffect::ActivateEntry { label } => Action::ActivateEntry(label),
        }
    }

    fn handle_home_keys(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                info!("Quit requested from home view");
                Action::Quit
            }

            KeyCode::Char('?') => Action::ToggleHelp,

            _ => {
                trace!("Home view: ignoring key {:?}", key.code);
                Action::NoOp
            }
        }
    }

    fn handle_help_keys(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') => Action::ToggleHelp,
            _ => Action::NoOp,
        }
    }

    pub async fn dispatch_action(&self, action: Action) {
        match action {
            // Overlay surfaces
            Action::ToggleOverlay | Action::HideOverlay | Action::ToggleHelp => {
                self.dispatch_ui_action(action).await;
            }

            // Effects requested by submit transitions
            Action::BuildIndex(_) | Action::RunSearch(_) | Action::ActivateEntry(_) => {
                self.dispatch_effect_action(action).await;
            }

            Action::TaskResult(task_result) => self.handle_task_result(task_result).await,

            Action::Quit => {
                info!("Quit action - handled in main loop");
            }

            Action::Tick => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                if app.update_notification() {
                    app.redraw = true;
                }
                if app.overlay.visible && app.overlay.loading {
                    // keep the spinner moving
                    app.redraw = true;
                }
            }

            Action::Resize(..) | Action::NoOp => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.redraw = true;
            }
        }
    }

    async fn dispatch_ui_action(&self, action: Action) {
        match action {
            Action::ToggleOverlay => {
                debug!("Toggling search overlay");
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.toggle();
                app.redraw = true;
                info!("Search overlay visible: {}", app.overlay.visible);
                drop(app);
            }

            Action::HideOverlay => {
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.overlay.hide();
                app.redraw = true;
                drop(app);
            }

            Action::ToggleHelp => {
                debug!("Toggling help overlay");
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.help_visible = !app.help_visible;
                app.redraw = true;
                drop(app);
            }

            _ => warn!("dispatch_ui_action received non-UI action: {action:?}"),
        }
    }

    async fn dispatch_effect_action(&self, action: Action) {
        match action {
            Action::BuildIndex(corpus_dir) => self.start_build(corpus_dir).await,

            Action::RunSearch(query) => self.start_search(query).await,

            Action::ActivateEntry(label) => {
                info!("Selected: {label}");
                let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
                app.show_info(format!("Selected: {label}"));
                app.redraw = true;
                drop(app);
            }

            _ => warn!("dispatch_effect_action received non-effect action: {action:?}"),
        }
    }

    /// Persist the directory, then spawn the build call. The write happens
    /// up front: the directory is remembered however the build turns out.
    async fn start_build(&self, corpus_dir: String) {
        let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
        let task_id = app.next_task_id();
        let store = app.store.clone();
        let gateway = app.gateway.clone();
        let task_tx: UnboundedSender<TaskResult> = app.task_tx.clone();
        drop(app);

        if let Err(e) = store
            .save(&RecentState {
                last_dir: corpus_dir.clone(),
            })
            .await
        {
            warn!("Failed to persist last directory: {e}");
        }

        build_index_task(task_id, corpus_dir, gateway, task_tx);
    }

    async fn start_search(&self, query: String) {
        let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
        let task_id = app.next_task_id();
        let gateway = app.gateway.clone();
        let task_tx: UnboundedSender<TaskResult> = app.task_tx.clone();
        drop(app);

        search_task(task_id, query, gateway, task_tx);
    }

    async fn handle_task_result(&self, task_result: TaskResult) {
        debug!("Processing task result: {:?}", task_result);
        let mut app = self.app.lock().await;

        match task_result {
            TaskResult::BuildFinished {
                task_id,
                corpus_dir,
                result,
                execution_time,
            } => match result {
                Ok(message) => {
                    info!(
                        "task {task_id}: index for '{corpus_dir}' ready after {execution_time:?}"
                    );
                    app.overlay.apply_build_success();
                    if !message.is_empty() {
                        app.show_success(message);
                    }
                }
                Err(message) => {
                    warn!("task {task_id}: build for '{corpus_dir}' failed: {message}");
                    app.overlay.apply_build_failure(message);
                }
            },

            TaskResult::SearchFinished {
                task_id,
                query,
                result,
                execution_time,
            } => {
                trace!("task {task_id}: search for '{query}' completed in {execution_time:?}");
                app.overlay.apply_search_result(&query, result);
            }
        }

        app.redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gateway::SearchGateway;
    use crate::config::Config;
    use crate::model::overlay::{Phase, SearchOverlayState};
    use crate::store::RecentStore;
    use serde_json::json;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixture(base_url: &str, store_path: PathBuf) -> EventLoop {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let gateway = SearchGateway::new(base_url, Duration::from_secs(5)).unwrap();

        let state = AppState::new(
            Arc::new(Config::default()),
            RecentStore::at_path(store_path),
            gateway,
            SearchOverlayState::default(),
            task_tx,
            action_tx,
        );

        EventLoop::new(Arc::new(Mutex::new(state)), task_rx, action_rx)
    }

    async fn wait_for_task_result(event_loop: &mut EventLoop) -> TaskResult {
        loop {
            let next = tokio::time::timeout(Duration::from_secs(5), event_loop.next_action())
                .await
                .expect("timed out waiting for task result");
            match next {
                Some(Action::TaskResult(result)) => return result,
                Some(_) => continue,
                None => panic!("event loop ended"),
            }
        }
    }

    #[tokio::test]
    async fn test_build_dispatch_persists_directory_and_advances_phase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/build"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Indexed 10 files" })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("recent.toml");
        let mut event_loop = fixture(&server.uri(), store_path.clone());

        {
            let mut app = event_loop.app.lock().await;
            app.overlay.toggle();
            for c in "/docs".chars() {
                app.overlay.push_char(c);
            }
            assert_eq!(app.overlay.submit(), OverlayEffect::BuildIndex {
                corpus_dir: "/docs".to_string()
            });
        }

        event_loop
            .dispatch_action(Action::BuildIndex("/docs".to_string()))
            .await;

        let persisted = RecentStore::at_path(store_path).load().await.unwrap();
        assert_eq!(persisted.last_dir, "/docs");

        let result = wait_for_task_result(&mut event_loop).await;
        event_loop.dispatch_action(Action::TaskResult(result)).await;

        let app = event_loop.app.lock().await;
        assert_eq!(app.overlay.phase, Phase::Query);
        assert!(!app.overlay.loading);
        assert!(app.notification.is_some());
    }

    #[tokio::test]
    async fn test_failed_build_surfaces_error_and_keeps_phase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/build"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut event_loop = fixture(&server.uri(), dir.path().join("recent.toml"));

        {
            let mut app = event_loop.app.lock().await;
            app.overlay.toggle();
            for c in "/docs".chars() {
                app.overlay.push_char(c);
            }
            app.overlay.submit();
        }

        event_loop
            .dispatch_action(Action::BuildIndex("/docs".to_string()))
            .await;
        let result = wait_for_task_result(&mut event_loop).await;
        event_loop.dispatch_action(Action::TaskResult(result)).await;

        let app = event_loop.app.lock().await;
        assert_eq!(app.overlay.phase, Phase::Directory);
        assert!(!app.overlay.loading);
        assert!(app.overlay.error.as_deref().unwrap_or("").contains("500"));
    }

    #[tokio::test]
    async fn test_search_round_trip_applies_ranked_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "neural networks",
                "results": [["paper1.txt", 0.82], ["paper2.txt", 0.41]],
                "elapsed_time": 0.013,
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut event_loop = fixture(&server.uri(), dir.path().join("recent.toml"));

        {
            let mut app = event_loop.app.lock().await;
            app.overlay.toggle();
            app.overlay.apply_build_success();
            for c in "neural networks".chars() {
                app.overlay.push_char(c);
            }
            app.overlay.submit();
        }

        event_loop
            .dispatch_action(Action::RunSearch("neural networks".to_string()))
            .await;
        let result = wait_for_task_result(&mut event_loop).await;
        event_loop.dispatch_action(Action::TaskResult(result)).await;

        let app = event_loop.app.lock().await;
        let results = app.overlay.results.as_ref().expect("results applied");
        assert_eq!(results.len(), 2);
        assert_eq!(results.entries[0].label, "paper1.txt");
        assert_eq!(app.overlay.selected, Some(0));
        assert!(!app.overlay.loading);
    }

    #[tokio::test]
    async fn test_stale_search_completion_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "neural networks",
                "results": [["paper1.txt", 0.82]],
                "elapsed_time": 0.005,
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut event_loop = fixture(&server.uri(), dir.path().join("recent.toml"));

        {
            let mut app = event_loop.app.lock().await;
            app.overlay.toggle();
            app.overlay.apply_build_success();
            for c in "neural networks".chars() {
                app.overlay.push_char(c);
            }
            app.overlay.submit();
            // user keeps typing while the call is in flight
            app.overlay.push_char('!');
        }

        event_loop
            .dispatch_action(Action::RunSearch("neural networks".to_string()))
            .await;
        let result = wait_for_task_result(&mut event_loop).await;
        event_loop.dispatch_action(Action::TaskResult(result)).await;

        let app = event_loop.app.lock().await;
        assert!(app.overlay.results.is_none());
        assert!(!app.overlay.loading);
    }

    #[tokio::test]
    async fn test_activation_shows_notification() {
        let dir = tempfile::tempdir().unwrap();
        let event_loop = fixture("http://localhost:8000", dir.path().join("recent.toml"));

        event_loop
            .dispatch_action(Action::ActivateEntry("paper1.txt".to_string()))
            .await;

        let app = event_loop.app.lock().await;
        let notification = app.notification.as_ref().expect("notification shown");
        assert!(notification.message.contains("paper1.txt"));
    }

    #[tokio::test]
    async fn test_injected_actions_flow_through_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut event_loop = fixture("http://localhost:8000", dir.path().join("recent.toml"));

        {
            let app = event_loop.app.lock().await;
            app.action_tx.send(Action::ToggleHelp).unwrap();
        }

        loop {
            let next = tokio::time::timeout(Duration::from_secs(5), event_loop.next_action())
                .await
                .expect("timed out waiting for injected action");
            match next {
                Some(Action::ToggleHelp) => break,
                Some(Action::Tick) => continue,
                other => panic!("unexpected action: {other:?}"),
            }
        }
    }
}

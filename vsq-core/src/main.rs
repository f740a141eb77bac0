//! src/main.rs
//! Terminal front end for the vector-space document search service

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Mutex, Notify, mpsc},
};
use tracing::{error, info, warn};

use vsq_core::{
    Logger,
    api::gateway::SearchGateway,
    config::Config,
    controller::{
        actions::Action,
        event_loop::{EventLoop, TaskResult},
    },
    model::{app_state::AppState, overlay::SearchOverlayState},
    store::{RecentState, RecentStore},
    view::{theme, ui::View},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    shutdown: Arc<Notify>,
}

impl App {
    async fn new() -> Result<Self> {
        Logger::init_tracing();
        info!("Starting Vector Space Search TUI");
        theme::init_theme();

        let terminal: AppTerminal = setup_terminal().context("Failed to initialize terminal")?;

        // Load configuration
        let config: Arc<Config> = Arc::new(Config::load().await.unwrap_or_else(|e| {
            info!("Failed to load config, using defaults: {}", e);
            Config::default()
        }));

        let gateway = SearchGateway::new(
            config.base_url(),
            Duration::from_secs(config.api.timeout_secs),
        )
        .context("Failed to construct HTTP gateway")?;

        // Seed the directory input with the last indexed corpus
        let store = RecentStore::new().context("Failed to locate data directory")?;
        let recent: RecentState = store.load().await.unwrap_or_else(|e| {
            warn!("Failed to load recent state, starting empty: {}", e);
            RecentState::default()
        });
        let overlay = SearchOverlayState::new(recent.last_dir);

        // Create communication channels
        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

        let app_state: Arc<Mutex<AppState>> = Arc::new(Mutex::new(AppState::new(
            config, store, gateway, overlay, task_tx, action_tx,
        )));

        let event_loop = EventLoop::new(app_state, task_rx, action_rx);
        let shutdown: Arc<Notify> = Arc::new(Notify::new());

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop,
            shutdown,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler().await;
        info!("Starting event loop");

        loop {
            // Render UI
            self.render().await?;

            tokio::select! {
                // Shutdown signal
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_action = self.event_loop.next_action() => {
                    let Some(action) = maybe_action else {
                        info!("Event sources closed");
                        break;
                    };

                    if matches!(action, Action::Quit) {
                        info!("Quit action received");
                        break;
                    }

                    self.event_loop.dispatch_action(action).await;
                }
            }
        }

        info!("Event loop terminated cleanly");
        Ok(())
    }

    async fn render(&mut self) -> Result<()> {
        let mut app = self.event_loop.app.lock().await;
        if !app.redraw {
            return Ok(());
        }

        let start: Instant = Instant::now();

        self.terminal
            .draw(|frame: &mut Frame<'_>| View::redraw(frame, &app))
            .context("Failed to draw terminal")?;

        app.redraw = false;

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        }

        Ok(())
    }

    async fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let mut sigterm =
                    signal(SignalKind::terminate()).expect("Failed to create SIGTERM handler");
                let mut sigint =
                    signal(SignalKind::interrupt()).expect("Failed to create SIGINT handler");

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}

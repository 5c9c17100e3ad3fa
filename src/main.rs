//! Terminal lifecycle, event loop, and cleanup for the finance chat client.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use finchat_tui::app::App;
use finchat_tui::config::WidgetConfig;
use finchat_tui::events::TICK_RATE;
use finchat_tui::transport::{ChatTransport, HttpTransport};
use finchat_tui::ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging()?;

    let config = WidgetConfig::load()?;
    info!(base_url = %config.base_url, "starting");
    let transport = HttpTransport::new(&config)?;
    let mouse = config.close_on_outside_click;

    // Set up the terminal in raw / alternate-screen mode.
    install_panic_hook(mouse);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(transport, &config);
    let result = run_loop(&mut terminal, &mut app).await;

    // Always restore the terminal, even on error.
    restore(mouse);
    let _ = terminal.show_cursor();

    if let Err(err) = &result {
        error!(error = %err, "exited with error");
    }
    result
}

/// Logs go to a file; the terminal belongs to the UI. `RUST_LOG` controls
/// the filter.
fn init_logging() -> Result<()> {
    let path = WidgetConfig::log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("finchat_tui=info".parse()?)
                .add_directive("finchat=info".parse()?),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run_loop<T: ChatTransport + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<T>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        if app.should_quit {
            return Ok(());
        }
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(Instant::now()),
            _ = app.next_task(), if app.has_pending() => {}
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(&event),
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
        }
    }
}

fn restore(mouse: bool) {
    if mouse {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Install panic hook to restore terminal on panic.
fn install_panic_hook(mouse: bool) {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore(mouse);
        original_hook(panic_info);
    }));
}

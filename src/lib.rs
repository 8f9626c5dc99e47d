pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod export;
pub mod logging;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use app::commands::run_command;
use app::events::{AppEvent, spawn_input_task};
use app::settings::{CYCLES_FILE, LOG_FILE, data_dir, load_runtime_settings};
use app::state::{AppMode, AppState};
use app::tracker::Tracker;
use cli::{Cli, Command};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::session::{SessionProvider, StaticSession};
use data::store::{CycleStore, JsonFileCycleStore};
use domain::cycle::UserId;
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;
use ui::theme::{detect_color_capability, plain_theme, theme_for};

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let dir = data_dir(&cli).context("no data directory: pass --data-dir or set HOME")?;
    let command = cli.command();
    match command {
        Command::Dashboard => logging::init_file(&dir.join(LOG_FILE))?,
        _ => logging::init_stderr(),
    }

    let (settings, settings_path) = load_runtime_settings(&cli, Some(&dir));
    let session = StaticSession::new(settings.user_or_login().map(UserId));
    let user = session
        .current_user()
        .context("no user signed in: pass --user or set USER")?;
    let mut tracker = Tracker::new(JsonFileCycleStore::new(dir.join(CYCLES_FILE)), user);
    let today = chrono::Local::now().date_naive();
    info!(dir = %dir.display(), user = %tracker.user(), "starting");

    if command != Command::Dashboard {
        let output = run_command(command, &mut tracker, &settings, today)?;
        println!("{}", output.trim_end());
        return Ok(());
    }

    let theme = if cli.no_color {
        plain_theme()
    } else {
        theme_for(settings.theme, detect_color_capability())
    };
    let app = AppState::new(settings, settings_path, theme, today);

    let mut terminal = setup_terminal()?;
    let result = run_dashboard(&mut terminal, app, &tracker).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_dashboard<S: CycleStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: AppState,
    tracker: &Tracker<S>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);

    let size = terminal.size()?;
    app.viewport = ratatui::layout::Rect::new(0, 0, size.width, size.height);
    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, tracker).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, tracker).await?;
                }
            }
        }

        let completed = terminal.draw(|frame| ui::render(frame, &app))?;
        app.viewport = completed.area;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}

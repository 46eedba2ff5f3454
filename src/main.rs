mod animator;
mod app;
mod catalog;
mod clock;
mod config;
mod error;
mod events;
mod layout;
mod log;
mod scroll;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use app::App;
use catalog::AppEntry;
use clock::{Clock, MonotonicClock};
use config::Config;
use error::AppGridError;
use events::EventHandler;

const USAGE: &str = "\
Usage: appgrid [OPTIONS]

Options:
  --max-fling-velocity <PX_PER_SEC>  Ceiling for fling velocity
  -a, --apps-dir <PATH>              Scan this directory for .desktop entries (repeatable)
  -h, --help                         Print this help";

/// Options given on the command line
#[derive(Debug, Default)]
struct CliArgs {
    max_fling_velocity: Option<u32>,
    apps_dirs: Vec<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> error::Result<CliArgs> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-fling-velocity" => {
                let value = args.get(i + 1).ok_or_else(|| {
                    AppGridError::Config("--max-fling-velocity requires a value".to_string())
                })?;
                let velocity = value.parse().map_err(|_| {
                    AppGridError::Config(format!("invalid fling velocity '{}'", value))
                })?;
                cli.max_fling_velocity = Some(velocity);
                i += 2;
                continue;
            }
            "--apps-dir" | "-a" => {
                if let Some(path) = args.get(i + 1) {
                    cli.apps_dirs.push(PathBuf::from(path));
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --apps-dir requires a path argument");
                }
            }
            "--help" | "-h" => cli.help = true,
            other => {
                eprintln!("Warning: ignoring unknown argument '{}'", other);
            }
        }
        i += 1;
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    // Load config with precedence: CLI > env var > file > default
    let config = Config::load().with_overrides(cli.max_fling_velocity, cli.apps_dirs);
    log::log(&format!("{:?}", config));

    // Setup terminal
    enable_raw_mode().map_err(|e| AppGridError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
    let mut app = App::new(config, clock);
    log::log(&format!(
        "max fling velocity {}px/s",
        app.reducer.max_fling_velocity()
    ));

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::log_state("exit", &app.snapshot());
    if let Err(e) = &result {
        log::log(&format!("Exiting with error: {}", e));
    }
    Ok(result?)
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> error::Result<()> {
    // Application list arrives from a background scan
    let (apps_tx, mut apps_rx) = mpsc::channel::<Vec<AppEntry>>(1);
    let dirs = app.config.application_dirs();
    tokio::spawn(async move {
        let apps = catalog::scan_applications(&dirs).await;
        let _ = apps_tx.send(apps).await;
    });

    let mut icons_rx = app.catalog.subscribe();

    // Renderer-side fling integration runs on its own task
    let (animator, mut offset_rx) = app.animator();
    let frame = Duration::from_millis(app.config.frame_interval_ms());
    tokio::spawn(animator.run(frame));

    // Event stream for keyboard and mouse
    let mut event_stream = EventStream::new();

    loop {
        // Render
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            tui::ui::render(frame, app);
        })?;

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            // Terminal events (keyboard, mouse, focus)
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event, app.clock.now_ms());
                        // A rejected pointer callback is a dispatch bug: stop here
                        app.apply(action)?;
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err("terminal event stream closed".into()),
                }
            }

            Some(apps) = apps_rx.recv() => {
                app.set_apps(apps);
            }

            Ok(()) = icons_rx.changed() => {
                icons_rx.borrow_and_update();
                app.rebuild_params();
            }

            Ok(()) = offset_rx.changed() => {
                app.offset = *offset_rx.borrow_and_update();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("appgrid")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["--max-fling-velocity", "5000", "-a", "/opt/apps", "--apps-dir", "/srv/apps"])).unwrap();
        assert_eq!(cli.max_fling_velocity, Some(5000));
        assert_eq!(cli.apps_dirs, vec![PathBuf::from("/opt/apps"), PathBuf::from("/srv/apps")]);
        assert!(!cli.help);
    }

    #[test]
    fn test_parse_args_rejects_bad_velocity() {
        let err = parse_args(&args(&["--max-fling-velocity", "fast"])).unwrap_err();
        assert!(matches!(err, AppGridError::Config(_)));

        let err = parse_args(&args(&["--max-fling-velocity"])).unwrap_err();
        assert!(matches!(err, AppGridError::Config(_)));
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args(&args(&["-h"])).unwrap().help);
    }
}

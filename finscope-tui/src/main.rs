//! Finscope TUI — five-panel terminal dashboard for company financial analysis.
//!
//! Panels:
//! 1. Analyze — symbol/market form and per-year metrics table
//! 2. Charts — six smoothed metric line charts
//! 3. Anomalies — severity-coloured anomaly cards
//! 4. Notes — analyst commentary
//! 5. Help — keyboard shortcuts

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use finscope_core::backend::SampleBackend;
use finscope_core::config::{self, ClientConfig};
use finscope_core::{AnalysisBackend, HttpBackend, JsonFileStorage, ThemeController};
use finscope_tui::worker::{self, WorkerCommand};
use finscope_tui::{input, ui, AppState};

#[derive(Parser)]
#[command(
    name = "finscope-tui",
    about = "Finscope — terminal dashboard for financial statement analysis"
)]
struct Args {
    /// Backend origin (overrides config and FINSCOPE_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Market pre-filled in the form.
    #[arg(long)]
    market: Option<String>,

    /// Path to config.toml. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the built-in sample backend instead of HTTP.
    #[arg(long, default_value_t = false)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    init_logging().context("failed to initialise logging")?;

    // Configuration: file, then env, then flags.
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let mut cfg = ClientConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?
        .with_env_override();
    if let Some(url) = &args.api_url {
        cfg.api_url = url.clone();
    }
    if let Some(market) = &args.market {
        cfg.default_market = market.clone();
    }
    cfg.validate()?;

    let backend: Arc<dyn AnalysisBackend> = if args.demo {
        Arc::new(SampleBackend)
    } else {
        Arc::new(HttpBackend::from_config(&cfg).context("failed to build HTTP client")?)
    };
    info!(backend = backend.name(), api_url = %cfg.api_url, "starting finscope-tui");

    // Theme persisted across sessions.
    let storage = JsonFileStorage::open(config::state_path());
    let theme = ThemeController::load(Box::new(storage));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(backend, cmd_rx, resp_tx).context("failed to spawn worker")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, theme, &cfg.default_market);
    if args.demo {
        app.set_warning("Demo mode: showing sample data");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shutdown worker. Requests still in flight are detached, not awaited.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if worker_handle.join().is_err() {
        warn!("worker thread panicked");
    }

    info!("finscope-tui exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.apply_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
        app.tick = app.tick.wrapping_add(1);

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to a file; the terminal belongs to the UI. Filter via `FINSCOPE_LOG`.
fn init_logging() -> Result<()> {
    let path = config::log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_env("FINSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

//! Finscope CLI — one-shot analysis, theme and config commands.
//!
//! Commands:
//! - `analyze` — POST a symbol to the backend and print the rendered result
//! - `theme` — show, toggle or set the persisted light/dark theme
//! - `config` — print the effective configuration or its path

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use finscope_core::backend::SampleBackend;
use finscope_core::config::{self, ClientConfig};
use finscope_core::{
    render, AnalysisBackend, Dispatcher, HttpBackend, JsonFileStorage, RenderContext,
    ThemeController, ThemeMode,
};

#[derive(Parser)]
#[command(
    name = "finscope",
    about = "Finscope CLI — financial statement analysis from the terminal"
)]
struct Cli {
    /// Path to config.toml. Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one stock and print the metrics table, anomalies and notes.
    Analyze {
        /// Stock symbol (e.g., TCS). Trimmed and upper-cased before sending.
        symbol: String,

        /// Market code. Defaults to the configured market.
        #[arg(long)]
        market: Option<String>,

        /// Backend origin (overrides config and FINSCOPE_API_URL).
        #[arg(long)]
        api_url: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Use the built-in sample backend instead of HTTP.
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
    /// Show or change the persisted theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,

        /// State file. Defaults to the user config directory.
        #[arg(long, global = true)]
        state: Option<PathBuf>,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Flip between light and dark.
    Toggle,
    /// Set the theme explicitly.
    Set {
        /// `dark` or `light`.
        mode: ThemeMode,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the config file path.
    Path,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Analyze {
            symbol,
            market,
            api_url,
            format,
            demo,
        } => {
            let cfg = effective_config(&config_path, api_url)?;
            let market = market.unwrap_or_else(|| cfg.default_market.clone());
            run_analyze(&cfg, &symbol, &market, format, demo)
        }
        Commands::Theme { action, state } => {
            let state = state.unwrap_or_else(config::state_path);
            run_theme(state, action.unwrap_or(ThemeAction::Show))
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Show => {
                let cfg = effective_config(&config_path, None)?;
                print!("{}", cfg.to_toml());
                Ok(())
            }
        },
    }
}

/// File, then `FINSCOPE_API_URL`, then the `--api-url` flag.
fn effective_config(path: &Path, api_url: Option<String>) -> Result<ClientConfig> {
    let mut cfg = ClientConfig::load(path)
        .with_context(|| format!("loading {}", path.display()))?
        .with_env_override();
    if let Some(url) = api_url {
        cfg.api_url = url;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run_analyze(
    cfg: &ClientConfig,
    symbol: &str,
    market: &str,
    format: OutputFormat,
    demo: bool,
) -> Result<()> {
    let backend: Box<dyn AnalysisBackend> = if demo {
        Box::new(SampleBackend)
    } else {
        Box::new(HttpBackend::from_config(cfg).context("failed to build HTTP client")?)
    };
    info!(backend = backend.name(), symbol, market, "analyze");

    let mut dispatcher = Dispatcher::new();
    let response = dispatcher.run_blocking(backend.as_ref(), symbol, market)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Csv => {
            let ctx = render(RenderContext::new(), &response);
            print!("{}", report::export_table_csv(&ctx.table)?);
        }
        OutputFormat::Table => {
            let ctx = render(RenderContext::new(), &response);
            let shown_symbol = symbol.trim().to_uppercase();
            print!("{}", report::text_report(&shown_symbol, market.trim(), &ctx));
        }
    }
    Ok(())
}

fn run_theme(state: PathBuf, action: ThemeAction) -> Result<()> {
    let mut theme = ThemeController::load(Box::new(JsonFileStorage::open(state)));
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            theme.toggle().context("failed to save theme")?;
        }
        ThemeAction::Set { mode } => {
            theme.set(mode).context("failed to save theme")?;
        }
    }
    println!("{}", theme.mode());
    Ok(())
}

/// Log to stderr, filtered via `FINSCOPE_LOG` (default `warn` keeps stdout clean for piping).
fn init_logging() {
    let filter = EnvFilter::try_from_env("FINSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["finscope", "analyze", "tcs"]).unwrap();
        match cli.command {
            Commands::Analyze {
                symbol,
                market,
                format,
                demo,
                ..
            } => {
                assert_eq!(symbol, "tcs");
                assert!(market.is_none());
                assert_eq!(format, OutputFormat::Table);
                assert!(!demo);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn theme_set_parses_mode() {
        let cli = Cli::try_parse_from(["finscope", "theme", "set", "dark"]).unwrap();
        match cli.command {
            Commands::Theme {
                action: Some(ThemeAction::Set { mode }),
                ..
            } => assert_eq!(mode, ThemeMode::Dark),
            _ => panic!("expected theme set"),
        }
        assert!(Cli::try_parse_from(["finscope", "theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn theme_toggle_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");

        run_theme(state.clone(), ThemeAction::Toggle).unwrap();
        let t = ThemeController::load(Box::new(JsonFileStorage::open(&state)));
        assert_eq!(t.mode(), ThemeMode::Dark);

        run_theme(state.clone(), ThemeAction::Toggle).unwrap();
        let t = ThemeController::load(Box::new(JsonFileStorage::open(&state)));
        assert_eq!(t.mode(), ThemeMode::Light);
        assert_eq!(t.persisted().as_deref(), Some("light"));
    }

    #[test]
    fn api_url_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"http://file:1\"\n").unwrap();

        let cfg = effective_config(&path, Some("http://flag:2".into())).unwrap();
        assert_eq!(cfg.api_url, "http://flag:2");

        assert!(effective_config(&path, Some("ftp://nope".into())).is_err());
    }
}

//! `huellas`: terminal client for the Huellas pet-adoption backend.
//!
//! # Usage
//!
//! ```
//! huellas --url http://localhost:8080
//! huellas --config ~/.config/huellas/huellas.toml --log-file /tmp/huellas.log
//! ```
//!
//! Settings come from the config file, then `HUELLAS_*` environment
//! variables, then command-line flags, each overriding the previous one.
//! Logs go to a file because the terminal belongs to the UI; set `RUST_LOG`
//! to change the level.

mod app;
mod client;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::PathBuf,
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use huellas_core::backend::AdoptionBackend;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "huellas", version, about = "Terminal client for the Huellas adoption backend")]
struct Args {
  /// Path to a TOML config file (url, log_file, user_id, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the backend (default: http://localhost:8080).
  #[arg(long, env = "HUELLAS_URL")]
  url: Option<String>,

  /// File that receives the log output (default: huellas.log).
  #[arg(long, env = "HUELLAS_LOG_FILE")]
  log_file: Option<PathBuf>,

  /// User id recorded on adoption applications made from the catalog.
  #[arg(long, env = "HUELLAS_USER_ID")]
  user_id: Option<i64>,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Merged configuration.
#[derive(Debug, Deserialize)]
struct Settings {
  #[serde(default = "default_url")]
  url:          String,
  #[serde(default = "default_log_file")]
  log_file:     PathBuf,
  #[serde(default)]
  user_id:      i64,
  #[serde(default = "default_timeout_secs")]
  timeout_secs: u64,
}

fn default_url() -> String { "http://localhost:8080".into() }

fn default_log_file() -> PathBuf { PathBuf::from("huellas.log") }

fn default_timeout_secs() -> u64 { 30 }

impl Settings {
  fn load(args: &Args) -> Result<Self> {
    let file = match &args.config {
      Some(path) => config::File::from(path.as_path()).required(true),
      None => config::File::with_name("huellas").required(false),
    };
    let mut settings: Settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("HUELLAS").try_parsing(true))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise configuration")?;

    // CLI flags override everything else.
    if let Some(url) = &args.url {
      settings.url = url.clone();
    }
    if let Some(log_file) = &args.log_file {
      settings.log_file = log_file.clone();
    }
    if let Some(user_id) = args.user_id {
      settings.user_id = user_id;
    }
    Ok(settings)
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(&args)?;

  // Initialise tracing into the log file.
  let log_file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();

  tracing::info!(url = %settings.url, "starting huellas");
  let client = ApiClient::new(ApiConfig {
    base_url: settings.url.clone(),
    timeout:  Duration::from_secs(settings.timeout_secs),
  })?;
  let mut app = App::new(client, settings.user_id);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<B: AdoptionBackend + 'static>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<B>,
) -> Result<()> {
  loop {
    // Apply finished tasks, then re-fetch whatever they left stale.
    app.drain_events();
    app.refresh_stale();

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_defaults() {
    let args = Args::parse_from([
      "huellas",
      "--url",
      "http://api.example:9000",
      "--user-id",
      "7",
    ]);
    let settings = Settings::load(&args).unwrap();
    assert_eq!(settings.url, "http://api.example:9000");
    assert_eq!(settings.user_id, 7);
    assert_eq!(settings.timeout_secs, 30);
  }

  #[test]
  fn missing_explicit_config_is_an_error() {
    let args = Args::parse_from(["huellas", "--config", "/nonexistent/huellas.toml"]);
    assert!(Settings::load(&args).is_err());
  }
}

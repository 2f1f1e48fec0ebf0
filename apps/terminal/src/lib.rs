//! # POS Lite Terminal Library
//!
//! The terminal front end for POS Lite. `main.rs` only calls [`run`];
//! everything else lives here so handlers and views can be tested without a
//! terminal.
//!
//! ## Module Organization
//! ```text
//! poslite_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap command line
//! ├── config.rs       ◄─── config.toml + POSLITE_* + flags
//! ├── error.rs        ◄─── AppError for handlers
//! ├── prompt.rs       ◄─── Confirmation seam (inquire / scripted)
//! ├── state/
//! │   ├── mod.rs      ◄─── App and the Cached trait
//! │   ├── cache.rs    ◄─── Record mirrors and edit forms
//! │   ├── notice.rs   ◄─── Timed banners
//! │   ├── report.rs   ◄─── Report window and chart data
//! │   └── theme.rs    ◄─── Light/dark preference file
//! ├── commands/       ◄─── Handlers (cart, records, settings, report, theme)
//! ├── view/           ◄─── Text rendering (tables, receipt, charts)
//! └── shell/          ◄─── inquire menus that drive the handlers
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod shell;
pub mod state;
pub mod view;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;
use error::{AppError, ErrorCode};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,poslite=debug,reqwest=warn";

/// Runs the terminal client.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse command line (clap)                                          │
/// │  2. Initialize logging (stderr, RUST_LOG or DEFAULT_LOG_FILTER)        │
/// │  3. Resolve configuration (flags > env > config.toml > defaults)       │
/// │  4. Build a current-thread tokio runtime                               │
/// │  5. Dispatch the command; print any error and exit non-zero            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting POS Lite");

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            eprintln!("Error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}

fn start(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(&cli.overrides())?;
    info!(
        base_url = %config.base_url,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(ErrorCode::Internal, format!("Failed to start runtime: {e}")))?;

    runtime.block_on(shell::dispatch(cli.command(), &config))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with screen output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

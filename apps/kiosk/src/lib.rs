//! # Kiosk Console Application
//!
//! Line-based front end of the convenience-store kiosk.
//!
//! ## Module Structure
//! ```text
//! kiosk_lib/
//! ├── lib.rs       ← You are here (entry point)
//! ├── error.rs     ← AppError, shown as "[ERROR] ..."
//! ├── shop.rs      ← Shopping loop
//! ├── console/     ← stdin/stdout boundary
//! │   ├── mod.rs   ← Console, Y/N prompts
//! │   └── view.rs  ← Catalog listing and receipts
//! └── state/       ← Startup configuration
//!     └── config.rs
//! ```
//!
//! The checkout rules live in `kiosk-core`; catalog files are read by
//! `kiosk-data`. This crate only wires them to a terminal.

pub mod console;
pub mod error;
pub mod shop;
pub mod state;

use std::io;
use std::process::ExitCode;

use kiosk_core::Kiosk;
use kiosk_data::{load_catalog, DataConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use console::Console;
use error::AppError;
use state::KioskConfig;

/// Application entry point.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Kiosk Startup                                        │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, INFO for kiosk crates; RUST_LOG overrides          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • KIOSK_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • products.md + promotions.md from the data directory               │
/// │     • Failure: print "[ERROR] ..." and exit non-zero                    │
/// │                                                                         │
/// │  4. Shopping Loop ────────────────────────────────────────────────────► │
/// │     • Until the buyer stops or stdin closes                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let config = KioskConfig::from_env();
    info!(data_dir = %config.data_dir.display(), "Starting kiosk");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let catalog = match load_catalog(&DataConfig::new(&config.data_dir)) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Failed to load catalog: {}", err);
            // Nothing more to do if even the error cannot be printed
            let _ = console.report(&AppError::from(err));
            return ExitCode::FAILURE;
        }
    };

    let today = config.business_date();
    info!(products = catalog.len(), %today, "Catalog loaded");

    let mut kiosk = Kiosk::new(catalog, today).with_membership(config.membership());

    match shop::shop(&mut kiosk, &mut console, &config) {
        Ok(()) => {
            info!("Kiosk closed");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, "Kiosk stopped: {}", err.message);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with the dialogue on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kiosk_data=trace` - Trace catalog loading only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,kiosk=info,kiosk_lib=info,kiosk_data=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

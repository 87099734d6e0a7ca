//! # Kiosk Console Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Read configuration from the environment
//! 3. Load the catalog files
//! 4. Run the shopping loop on stdin/stdout

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    kiosk_lib::run()
}

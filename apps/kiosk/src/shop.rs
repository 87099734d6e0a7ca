//! # Shopping Loop
//!
//! Drives one buyer after another through the kiosk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shopping Loop                                        │
//! │                                                                         │
//! │   ┌──► welcome + catalog                                                │
//! │   │        │                                                            │
//! │   │        ▼                                                            │
//! │   │    purchase input ──invalid──► "[ERROR] ..." ──► ask again          │
//! │   │        │                                                            │
//! │   │        ▼                                                            │
//! │   │    checkout session (top-up / shortfall / membership prompts)       │
//! │   │        │ ok                         │ failed                        │
//! │   │        ▼                            ▼                               │
//! │   │    receipt                      "[ERROR] ..." (stock untouched)     │
//! │   │        │                            │                               │
//! │   │        ▼                            │                               │
//! │   └── Y ◄─ buy anything else? ◄─────────┘                               │
//! │             │ N / end of input                                          │
//! │             ▼                                                           │
//! │            done                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use kiosk_core::{run_checkout, ConfirmationPort, Kiosk, Prompt, PurchaseLine, PurchaseResult};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::console::view::{self, PURCHASE_PROMPT};
use crate::console::Console;
use crate::error::AppError;
use crate::state::{KioskConfig, ReceiptFormat};

/// Serves buyers until one declines to continue or input runs out.
///
/// Closing input is a normal way to leave; only console failures are
/// returned as errors.
pub fn shop<R: BufRead, W: Write>(
    kiosk: &mut Kiosk,
    console: &mut Console<R, W>,
    config: &KioskConfig,
) -> Result<(), AppError> {
    match serve(kiosk, console, config) {
        Err(err) if err.is_end_of_input() => {
            info!("Input closed, leaving the shopping loop");
            Ok(())
        }
        other => other,
    }
}

fn serve<R: BufRead, W: Write>(
    kiosk: &mut Kiosk,
    console: &mut Console<R, W>,
    config: &KioskConfig,
) -> Result<(), AppError> {
    loop {
        console.print(&view::render_welcome(
            &config.store_name,
            &kiosk.catalog_snapshot(),
        ))?;

        let lines = read_purchase(kiosk, console)?;

        match checkout(kiosk, console, lines) {
            Ok(result) => print_receipt(kiosk, console, config, &result)?,
            Err(err) if err.is_end_of_input() => return Err(err),
            Err(err) => {
                warn!(code = ?err.code, message = %err.message, "Checkout aborted");
                console.report(&err)?;
                continue;
            }
        }

        if !console.confirm(&Prompt::ContinueShopping)? {
            return Ok(());
        }
    }
}

/// Asks for purchases until the input parses against current stock.
fn read_purchase<R: BufRead, W: Write>(
    kiosk: &Kiosk,
    console: &mut Console<R, W>,
) -> Result<Vec<PurchaseLine>, AppError> {
    loop {
        let input = console.read_line(PURCHASE_PROMPT)?;
        match kiosk.parse_request(&input) {
            Ok(lines) => return Ok(lines),
            Err(err) => console.report(&AppError::from(err))?,
        }
    }
}

fn checkout<R: BufRead, W: Write>(
    kiosk: &mut Kiosk,
    console: &mut Console<R, W>,
    lines: Vec<PurchaseLine>,
) -> Result<PurchaseResult, AppError> {
    let span = info_span!("checkout", id = %Uuid::new_v4());
    let _guard = span.enter();

    info!(lines = lines.len(), "Checkout started");

    let mut session = kiosk.begin_checkout(lines);
    let result = run_checkout(&mut session, console)?;

    info!(
        total = result.total_price.won(),
        promotion_discount = result.total_discount.won(),
        membership_discount = result.membership_discount.won(),
        amount_due = result.amount_due().won(),
        cancelled = result.cancelled.len(),
        "Checkout completed"
    );

    Ok(result)
}

fn print_receipt<R: BufRead, W: Write>(
    kiosk: &Kiosk,
    console: &mut Console<R, W>,
    config: &KioskConfig,
    result: &PurchaseResult,
) -> Result<(), AppError> {
    let receipt = match config.receipt_format {
        ReceiptFormat::Text => view::render_receipt(&config.store_name, result),
        ReceiptFormat::Json => view::render_receipt_json(&config.store_name, kiosk.today(), result)?,
    };
    console.print(&receipt)
}

//! # Configuration State
//!
//! Stores kiosk configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KIOSK_*`)
//! 2. Defaults (this file)
//!
//! Unparsable values are logged and the default is kept.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use kiosk_core::{MembershipDiscount, Money, MEMBERSHIP_DISCOUNT_CAP, MEMBERSHIP_RATE_BPS};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kiosk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskConfig {
    /// Directory holding `products.md` and `promotions.md`
    pub data_dir: PathBuf,

    /// Business date for promotion validity.
    /// `None` means the local date at startup.
    pub today: Option<NaiveDate>,

    /// Store name (greeting and receipt header)
    pub store_name: String,

    pub receipt_format: ReceiptFormat,

    /// Membership discount rate in basis points
    /// e.g., 3000 = 30%
    pub membership_rate_bps: u32,

    /// Membership discount ceiling per checkout, in won
    pub membership_cap: i64,
}

/// How receipts are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFormat {
    /// Column layout for a person at the kiosk
    #[default]
    Text,

    /// One JSON document per checkout
    Json,
}

impl FromStr for ReceiptFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReceiptFormat::Text),
            "json" => Ok(ReceiptFormat::Json),
            other => Err(format!("unknown receipt format '{other}'")),
        }
    }
}

impl Default for KioskConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Data: `./data`
    /// - Date: today (local)
    /// - Membership: 30%, capped at 8,000
    fn default() -> Self {
        KioskConfig {
            data_dir: PathBuf::from("data"),
            today: None,
            store_name: "W Convenience Store".to_string(),
            receipt_format: ReceiptFormat::Text,
            membership_rate_bps: MEMBERSHIP_RATE_BPS,
            membership_cap: MEMBERSHIP_DISCOUNT_CAP,
        }
    }
}

impl KioskConfig {
    /// Creates a new KioskConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KIOSK_DATA_DIR`: Catalog directory
    /// - `KIOSK_TODAY`: Business date, `YYYY-MM-DD`
    /// - `KIOSK_STORE_NAME`: Store name
    /// - `KIOSK_RECEIPT_FORMAT`: `text` or `json`
    /// - `KIOSK_MEMBERSHIP_RATE_BPS`: Membership rate, e.g. `3000`
    /// - `KIOSK_MEMBERSHIP_CAP`: Membership ceiling in won
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`KioskConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = KioskConfig::default();

        if let Some(dir) = lookup("KIOSK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(store_name) = lookup("KIOSK_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(value) = lookup("KIOSK_TODAY") {
            match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
                Ok(date) => config.today = Some(date),
                Err(_) => warn!(value = %value, "Ignoring KIOSK_TODAY, expected YYYY-MM-DD"),
            }
        }

        if let Some(value) = lookup("KIOSK_RECEIPT_FORMAT") {
            match value.parse() {
                Ok(format) => config.receipt_format = format,
                Err(reason) => warn!(%reason, "Ignoring KIOSK_RECEIPT_FORMAT"),
            }
        }

        if let Some(value) = lookup("KIOSK_MEMBERSHIP_RATE_BPS") {
            match value.trim().parse::<u32>() {
                Ok(bps) if bps <= 10_000 => config.membership_rate_bps = bps,
                _ => warn!(value = %value, "Ignoring KIOSK_MEMBERSHIP_RATE_BPS"),
            }
        }

        if let Some(value) = lookup("KIOSK_MEMBERSHIP_CAP") {
            match value.trim().parse::<i64>() {
                Ok(cap) if cap >= 0 => config.membership_cap = cap,
                _ => warn!(value = %value, "Ignoring KIOSK_MEMBERSHIP_CAP"),
            }
        }

        config
    }

    /// The configured date, or the local date.
    pub fn business_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn membership(&self) -> MembershipDiscount {
        MembershipDiscount::new(self.membership_rate_bps, Money::from_won(self.membership_cap))
    }
}

/// Formats a won amount with thousands separators.
///
/// ## Example
/// ```rust
/// use kiosk_core::Money;
/// use kiosk_lib::state::format_amount;
///
/// assert_eq!(format_amount(Money::from_won(1234567)), "1,234,567");
/// assert_eq!(format_amount(Money::from_won(-1000)), "-1,000");
/// ```
pub fn format_amount(amount: Money) -> String {
    let digits = amount.won().unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount.won() < 0 {
        grouped.push('-');
    }

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

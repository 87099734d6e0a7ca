//! # Views
//!
//! Turns catalog snapshots and purchase results into text. Nothing here
//! reads input or touches stock.

use chrono::NaiveDate;
use kiosk_core::{Money, Product, PurchaseResult};
use serde::Serialize;

use crate::error::AppError;
use crate::state::format_amount;

pub const PURCHASE_PROMPT: &str =
    "Please enter the product name and quantity you wish to buy. (e.g. [Cola-2],[Potato Chips-1])";

const RULE: &str = "====================================";

/// Greeting followed by the catalog listing.
pub fn render_welcome(store_name: &str, products: &[Product]) -> String {
    let mut text = format!("Hello, this is {store_name}.\nHere are the products we have in stock.\n\n");
    text.push_str(&render_catalog(products));
    text
}

pub fn render_catalog(products: &[Product]) -> String {
    products
        .iter()
        .map(render_product)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- Cola 1,000 won 10 units Soda 2+1`, or `Out of stock` for an empty line.
pub fn render_product(product: &Product) -> String {
    let stock = if product.is_out_of_stock() {
        "Out of stock".to_string()
    } else {
        format!("{} units", product.quantity)
    };

    let mut line = format!(
        "- {} {} won {}",
        product.name,
        format_amount(product.price),
        stock
    );

    if let Some(promotion) = &product.promotion {
        line.push(' ');
        line.push_str(promotion);
    }

    line
}

/// Column receipt: purchased lines, gifts, totals and amount due.
pub fn render_receipt(store_name: &str, result: &PurchaseResult) -> String {
    let mut lines = Vec::new();

    for name in &result.cancelled {
        lines.push(format!("Purchase of {name} was cancelled."));
    }

    if result.is_empty() {
        lines.push("Nothing was purchased.".to_string());
        return lines.join("\n");
    }

    lines.push(format!("============== {store_name} =============="));
    lines.push(format!("{:<20}{:<10}{:>10}", "Product", "Qty", "Amount"));
    for item in &result.items {
        lines.push(format!(
            "{:<20}{:<10}{:>10}",
            item.name,
            item.quantity,
            format_amount(item.price)
        ));
    }

    if !result.gift_items.is_empty() {
        lines.push("============== Gifts ===============".to_string());
        for gift in &result.gift_items {
            lines.push(format!("{:<20}{:<10}", gift.name, gift.quantity));
        }
    }

    lines.push(RULE.to_string());
    lines.push(format!(
        "{:<20}{:<10}{:>10}",
        "Total",
        result.total_quantity(),
        format_amount(result.total_price)
    ));
    lines.push(format!(
        "{:<30}{:>10}",
        "Promotion discount",
        format_amount(Money::zero() - result.total_discount)
    ));
    lines.push(format!(
        "{:<30}{:>10}",
        "Membership discount",
        format_amount(Money::zero() - result.membership_discount)
    ));
    lines.push(format!(
        "{:<30}{:>10}",
        "Amount due",
        format_amount(result.amount_due())
    ));

    lines.join("\n")
}

/// Receipt document for the JSON format.
#[derive(Debug, Serialize)]
struct ReceiptDocument<'a> {
    store: &'a str,
    date: NaiveDate,
    #[serde(flatten)]
    result: &'a PurchaseResult,
    amount_due: Money,
}

pub fn render_receipt_json(
    store_name: &str,
    date: NaiveDate,
    result: &PurchaseResult,
) -> Result<String, AppError> {
    let document = ReceiptDocument {
        store: store_name,
        date,
        result,
        amount_due: result.amount_due(),
    };

    serde_json::to_string_pretty(&document).map_err(|err| {
        tracing::error!("Receipt serialization failed: {}", err);
        AppError::internal("Could not print the receipt")
    })
}

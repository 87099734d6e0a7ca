//! # Validation Module
//!
//! Parses raw buyer input before any business rule runs.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Syntax            parse_purchase_syntax / parse_yes_no       │
//! │  ├── empty input, brackets, name-quantity separator                    │
//! │  └── integer, decimal and sign checks on the quantity                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog           check_against_catalog                      │
//! │  ├── product exists                                                    │
//! │  └── requested total ≤ promotional + regular stock                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout          eligibility, allocation                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here recovers from an error. The caller decides whether to ask
//! again.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{parse_purchase_syntax, parse_yes_no};
//!
//! let lines = parse_purchase_syntax("[Cola-2],[Water-1]").unwrap();
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].quantity, 2);
//!
//! assert_eq!(parse_yes_no(" y "), Ok(true));
//! ```

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::PurchaseLine;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Purchase Request
// =============================================================================

/// Parses and checks a full purchase request against the catalog.
///
/// ## Errors
/// Any [`ValidationError`] from [`parse_purchase_syntax`], then
/// `ProductNotFound` or `ExceedsStock` from [`check_against_catalog`].
pub fn parse_purchase_request(input: &str, catalog: &Catalog) -> CoreResult<Vec<PurchaseLine>> {
    let lines = parse_purchase_syntax(input)?;
    check_against_catalog(&lines, catalog)?;
    Ok(lines)
}

/// Parses `[name-quantity][name-quantity]...` into purchase lines.
///
/// Groups may be separated by commas and whitespace. The first `-` inside
/// a group separates the name from the quantity.
///
/// ## Example
/// ```rust
/// use kiosk_core::error::ValidationError;
/// use kiosk_core::validation::parse_purchase_syntax;
///
/// assert!(parse_purchase_syntax("[Cola-2][Water-1]").is_ok());
/// assert_eq!(parse_purchase_syntax("Cola-2"), Err(ValidationError::InvalidFormat));
/// assert_eq!(parse_purchase_syntax("   "), Err(ValidationError::EmptyInput));
/// ```
pub fn parse_purchase_syntax(input: &str) -> ValidationResult<Vec<PurchaseLine>> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    bracket_groups(input)?
        .into_iter()
        .map(parse_group)
        .collect()
}

/// Splits the input into the contents of its bracket groups.
fn bracket_groups(input: &str) -> ValidationResult<Vec<&str>> {
    let mut groups = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if !groups.is_empty() {
            if let Some(after_comma) = rest.strip_prefix(',') {
                rest = after_comma.trim_start();
            }
        }

        let body = rest.strip_prefix('[').ok_or(ValidationError::InvalidFormat)?;
        let close = body.find(']').ok_or(ValidationError::InvalidFormat)?;
        let group = &body[..close];

        if group.contains('[') {
            return Err(ValidationError::InvalidFormat);
        }

        groups.push(group);
        rest = &body[close + 1..];
    }

    if groups.is_empty() {
        return Err(ValidationError::InvalidFormat);
    }

    Ok(groups)
}

fn parse_group(group: &str) -> ValidationResult<PurchaseLine> {
    let (name, quantity) = group.split_once('-').ok_or(ValidationError::InvalidFormat)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(PurchaseLine::new(name, parse_quantity(quantity)?))
}

/// Validates a quantity token.
///
/// ## Rules
/// - Must not be empty
/// - Must be a number; a zero fraction such as `2.0` is accepted
/// - Must not carry a non-zero fraction
/// - Must be at least 1
///
/// ## Example
/// ```rust
/// use kiosk_core::error::ValidationError;
/// use kiosk_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("3"), Ok(3));
/// assert_eq!(parse_quantity("2.0"), Ok(2));
/// assert_eq!(parse_quantity("1.5"), Err(ValidationError::DecimalQuantity("1.5".into())));
/// assert_eq!(parse_quantity("0"), Err(ValidationError::NegativeQuantity));
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::EmptyQuantity);
    }

    let not_integer = || ValidationError::NotInteger(raw.to_string());

    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(not_integer());
    }

    if fraction.is_some_and(|f| f.chars().any(|c| c != '0')) {
        return Err(ValidationError::DecimalQuantity(raw.to_string()));
    }

    if negative || whole.chars().all(|c| c == '0') {
        return Err(ValidationError::NegativeQuantity);
    }

    whole.parse::<u32>().map_err(|_| not_integer())
}

/// Checks that every line names a known product and that the cumulative
/// quantity requested per product fits its combined stock.
pub fn check_against_catalog(lines: &[PurchaseLine], catalog: &Catalog) -> CoreResult<()> {
    let mut requested: HashMap<&str, u32> = HashMap::new();

    for line in lines {
        if !catalog.contains(&line.name) {
            return Err(CoreError::ProductNotFound(line.name.clone()));
        }

        let total = requested.entry(line.name.as_str()).or_insert(0);
        *total = total.saturating_add(line.quantity);

        let available = catalog.total_stock(&line.name);
        if *total > available {
            return Err(CoreError::ExceedsStock {
                name: line.name.clone(),
                available,
                requested: *total,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Y/N Confirmation
// =============================================================================

/// Parses a Y/N answer, trimmed and case-insensitive.
///
/// ## Example
/// ```rust
/// use kiosk_core::error::ValidationError;
/// use kiosk_core::validation::parse_yes_no;
///
/// assert_eq!(parse_yes_no("Y"), Ok(true));
/// assert_eq!(parse_yes_no("n"), Ok(false));
/// assert_eq!(parse_yes_no(""), Err(ValidationError::EmptyInput));
/// assert_eq!(parse_yes_no("yes"), Err(ValidationError::InvalidYesNo));
/// ```
pub fn parse_yes_no(input: &str) -> ValidationResult<bool> {
    match input.trim() {
        "" => Err(ValidationError::EmptyInput),
        answer if answer.eq_ignore_ascii_case("y") => Ok(true),
        answer if answer.eq_ignore_ascii_case("n") => Ok(false),
        _ => Err(ValidationError::InvalidYesNo),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductRecord, PromotionRecord};
    use chrono::NaiveDate;

    fn test_catalog() -> Catalog {
        let record = |name: &str, quantity: u32, promotion: Option<&str>| ProductRecord {
            name: name.to_string(),
            price: 1_000,
            quantity,
            promotion: promotion.map(str::to_string),
        };

        Catalog::from_records(
            vec![
                record("Cola", 10, Some("Soda 2+1")),
                record("Cola", 10, None),
                record("Water", 5, None),
            ],
            vec![PromotionRecord {
                name: "Soda 2+1".to_string(),
                buy: 2,
                get: 1,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_parse_groups() {
        let lines = parse_purchase_syntax("[Cola-10],[Water-3]").unwrap();
        assert_eq!(
            lines,
            vec![PurchaseLine::new("Cola", 10), PurchaseLine::new("Water", 3)]
        );

        let lines = parse_purchase_syntax("  [Cola-1][Water-2] ").unwrap();
        assert_eq!(lines.len(), 2);

        let lines = parse_purchase_syntax("[ Cola - 2 ]").unwrap();
        assert_eq!(lines, vec![PurchaseLine::new("Cola", 2)]);
    }

    #[test]
    fn test_parse_format_errors() {
        assert_eq!(parse_purchase_syntax(""), Err(ValidationError::EmptyInput));
        assert_eq!(parse_purchase_syntax(" \t "), Err(ValidationError::EmptyInput));

        for input in ["Cola-2", "[Cola-2", "[Cola2]", "[Cola-2]x", "[[Cola-2]", ",[Cola-2]", "[Cola-2],,[Water-1]"] {
            assert_eq!(
                parse_purchase_syntax(input),
                Err(ValidationError::InvalidFormat),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_field_errors() {
        assert_eq!(parse_purchase_syntax("[-2]"), Err(ValidationError::EmptyName));
        assert_eq!(parse_purchase_syntax("[Cola-]"), Err(ValidationError::EmptyQuantity));
        assert_eq!(
            parse_purchase_syntax("[Cola-abc]"),
            Err(ValidationError::NotInteger("abc".into()))
        );
        assert_eq!(
            parse_purchase_syntax("[Cola-1.5]"),
            Err(ValidationError::DecimalQuantity("1.5".into()))
        );
        assert_eq!(parse_purchase_syntax("[Cola--3]"), Err(ValidationError::NegativeQuantity));
        assert_eq!(parse_purchase_syntax("[Cola-0]"), Err(ValidationError::NegativeQuantity));
    }

    #[test]
    fn test_parse_quantity_edges() {
        assert_eq!(parse_quantity("007"), Ok(7));
        assert_eq!(parse_quantity("+4"), Ok(4));
        assert_eq!(parse_quantity("3.00"), Ok(3));
        assert_eq!(parse_quantity("3abc"), Err(ValidationError::NotInteger("3abc".into())));
        assert_eq!(parse_quantity("1e3"), Err(ValidationError::NotInteger("1e3".into())));
        assert_eq!(parse_quantity(".5"), Err(ValidationError::NotInteger(".5".into())));
        assert_eq!(parse_quantity("-1.5"), Err(ValidationError::DecimalQuantity("-1.5".into())));
        assert_eq!(
            parse_quantity("99999999999"),
            Err(ValidationError::NotInteger("99999999999".into()))
        );
    }

    #[test]
    fn test_catalog_checks() {
        let catalog = test_catalog();

        assert!(parse_purchase_request("[Cola-20]", &catalog).is_ok());

        assert_eq!(
            parse_purchase_request("[Tea-1]", &catalog),
            Err(CoreError::ProductNotFound("Tea".into()))
        );
        assert_eq!(
            parse_purchase_request("[Cola-21]", &catalog),
            Err(CoreError::ExceedsStock {
                name: "Cola".into(),
                available: 20,
                requested: 21
            })
        );
    }

    #[test]
    fn test_pools_summing_past_u32_max() {
        let catalog = Catalog::from_records(
            vec![
                ProductRecord {
                    name: "Cola".to_string(),
                    price: 1_000,
                    quantity: u32::MAX,
                    promotion: Some("Soda 2+1".to_string()),
                },
                ProductRecord {
                    name: "Cola".to_string(),
                    price: 1_000,
                    quantity: 1,
                    promotion: None,
                },
            ],
            Vec::new(),
        )
        .unwrap();

        let lines = parse_purchase_request("[Cola-1]", &catalog).unwrap();
        assert_eq!(lines, vec![PurchaseLine::new("Cola", 1)]);
    }

    #[test]
    fn test_repeated_names_are_checked_cumulatively() {
        let catalog = test_catalog();

        let err = parse_purchase_request("[Water-3][Water-3]", &catalog).unwrap_err();
        assert!(matches!(err, CoreError::ExceedsStock { requested: 6, .. }));
    }

    #[test]
    fn test_syntax_errors_come_before_catalog_errors() {
        let catalog = test_catalog();
        assert_eq!(
            parse_purchase_request("[Tea-x]", &catalog),
            Err(CoreError::Validation(ValidationError::NotInteger("x".into())))
        );
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(parse_yes_no("Y"), Ok(true));
        assert_eq!(parse_yes_no(" y\n"), Ok(true));
        assert_eq!(parse_yes_no("N"), Ok(false));
        assert_eq!(parse_yes_no("n"), Ok(false));
        assert_eq!(parse_yes_no("   "), Err(ValidationError::EmptyInput));
        assert_eq!(parse_yes_no("x"), Err(ValidationError::InvalidYesNo));
        assert_eq!(parse_yes_no("yes"), Err(ValidationError::InvalidYesNo));
    }
}

//! # Record Parsing
//!
//! Comma-separated catalog files with a header row.
//!
//! ## File Format
//! ```text
//! products.md                          promotions.md
//! ─────────────────────────────        ───────────────────────────────────────
//! name,price,quantity,promotion        name,buy,get,start_date,end_date
//! Cola,1000,10,Soda 2+1                Soda 2+1,2,1,2026-01-01,2026-12-31
//! Cola,1000,10,null                    MD Pick,1,1,2026-01-01,2026-12-31
//! Water,500,10,null
//! ```
//!
//! Columns are located by header name, so their order may vary. Blank lines
//! are skipped. `null` (or an empty field) in the promotion column marks a
//! regular line.

use chrono::NaiveDate;
use kiosk_core::{ProductRecord, PromotionRecord};
use std::str::FromStr;
use tracing::debug;

use crate::error::{DataError, DataResult};

/// Marker for "no promotion" in the products file.
pub const NO_PROMOTION: &str = "null";

/// Date format of the promotion window columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Table
// =============================================================================

/// A header row plus data rows, each tagged with its 1-based line number.
struct Table<'a> {
    file: &'a str,
    headers: Vec<&'a str>,
    rows: Vec<(usize, Vec<&'a str>)>,
}

impl<'a> Table<'a> {
    fn parse(file: &'a str, content: &'a str) -> DataResult<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or_else(|| DataError::EmptyFile {
            file: file.to_string(),
        })?;

        let headers = header.split(',').map(str::trim).collect();
        let rows = lines
            .map(|(number, line)| (number, line.split(',').map(str::trim).collect()))
            .collect();

        Ok(Table {
            file,
            headers,
            rows,
        })
    }

    fn column(&self, name: &str) -> DataResult<usize> {
        self.headers
            .iter()
            .position(|header| *header == name)
            .ok_or_else(|| DataError::MissingColumn {
                file: self.file.to_string(),
                column: name.to_string(),
            })
    }
}

/// Field accessor for one row.
struct Row<'t> {
    file: &'t str,
    line: usize,
    values: &'t [&'t str],
}

impl<'t> Row<'t> {
    fn text(&self, column: usize) -> &'t str {
        self.values.get(column).copied().unwrap_or("")
    }

    fn required(&self, column: usize, field: &str) -> DataResult<&'t str> {
        match self.text(column) {
            "" => Err(DataError::invalid_field(self.file, self.line, field, "")),
            value => Ok(value),
        }
    }

    fn number<T: FromStr>(&self, column: usize, field: &str) -> DataResult<T> {
        let value = self.text(column);
        value
            .parse()
            .map_err(|_| DataError::invalid_field(self.file, self.line, field, value))
    }

    fn date(&self, column: usize, field: &str) -> DataResult<NaiveDate> {
        let value = self.text(column);
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| DataError::invalid_field(self.file, self.line, field, value))
    }
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses the products file, keeping file order.
///
/// ## Errors
/// - `EmptyFile` if there is not even a header
/// - `MissingColumn` for any of `name`, `price`, `quantity`, `promotion`
/// - `InvalidField` for an empty name, a negative or non-numeric price, or a
///   non-numeric quantity
pub fn parse_products(file: &str, content: &str) -> DataResult<Vec<ProductRecord>> {
    let table = Table::parse(file, content)?;
    let name = table.column("name")?;
    let price = table.column("price")?;
    let quantity = table.column("quantity")?;
    let promotion = table.column("promotion")?;

    let records = table
        .rows
        .iter()
        .map(|(line, values)| {
            let row = Row {
                file,
                line: *line,
                values,
            };

            let price_won: i64 = row.number(price, "price")?;
            if price_won < 0 {
                return Err(DataError::invalid_field(file, *line, "price", row.text(price)));
            }

            let promotion = match row.text(promotion) {
                "" | NO_PROMOTION => None,
                promotion_name => Some(promotion_name.to_string()),
            };

            Ok(ProductRecord {
                name: row.required(name, "name")?.to_string(),
                price: price_won,
                quantity: row.number(quantity, "quantity")?,
                promotion,
            })
        })
        .collect::<DataResult<Vec<_>>>()?;

    debug!(file, count = records.len(), "Parsed product records");
    Ok(records)
}

/// Parses the promotions file, keeping file order.
///
/// Zero `buy`/`get` values and reversed dates parse fine here; the catalog
/// rejects them when the records are loaded.
pub fn parse_promotions(file: &str, content: &str) -> DataResult<Vec<PromotionRecord>> {
    let table = Table::parse(file, content)?;
    let name = table.column("name")?;
    let buy = table.column("buy")?;
    let get = table.column("get")?;
    let start_date = table.column("start_date")?;
    let end_date = table.column("end_date")?;

    let records = table
        .rows
        .iter()
        .map(|(line, values)| {
            let row = Row {
                file,
                line: *line,
                values,
            };

            Ok(PromotionRecord {
                name: row.required(name, "name")?.to_string(),
                buy: row.number(buy, "buy")?,
                get: row.number(get, "get")?,
                start_date: row.date(start_date, "start_date")?,
                end_date: row.date(end_date, "end_date")?,
            })
        })
        .collect::<DataResult<Vec<_>>>()?;

    debug!(file, count = records.len(), "Parsed promotion records");
    Ok(records)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCTS: &str = "\
name,price,quantity,promotion
Cola,1000,10,Soda 2+1
Cola,1000,10,null

Water,500,0,
";

    const PROMOTIONS: &str = "\
name,buy,get,start_date,end_date
Soda 2+1,2,1,2026-01-01,2026-12-31
";

    #[test]
    fn test_parse_products() {
        let records = parse_products("products.md", PRODUCTS).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].promotion.as_deref(), Some("Soda 2+1"));
        assert_eq!(records[1].promotion, None);
        assert_eq!(records[2].name, "Water");
        assert_eq!(records[2].price, 500);
        assert_eq!(records[2].quantity, 0);
        assert_eq!(records[2].promotion, None);
    }

    #[test]
    fn test_parse_promotions() {
        let records = parse_promotions("promotions.md", PROMOTIONS).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].buy, 2);
        assert_eq!(records[0].get, 1);
        assert_eq!(
            records[0].end_date,
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_columns_found_by_header() {
        let content = "quantity,promotion,name,price\n3,null,Gum,300\n";
        let records = parse_products("products.md", content).unwrap();
        assert_eq!(records[0].name, "Gum");
        assert_eq!(records[0].price, 300);
        assert_eq!(records[0].quantity, 3);
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            parse_products("products.md", " \n\n"),
            Err(DataError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_products("products.md", "name,price,quantity\nCola,1000,1\n").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column, .. } if column == "promotion"));
    }

    #[test]
    fn test_invalid_fields_report_line() {
        let err = parse_products("products.md", "name,price,quantity,promotion\n\nCola,abc,1,null\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "products.md line 3: invalid price 'abc'");

        let err = parse_products("products.md", "name,price,quantity,promotion\nCola,-5,1,null\n")
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidField { line: 2, .. }));

        let err = parse_promotions(
            "promotions.md",
            "name,buy,get,start_date,end_date\nSale,1,1,2026/01/01,2026-12-31\n",
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidField { ref field, .. } if field == "start_date"));
    }
}

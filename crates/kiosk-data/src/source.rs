//! # Catalog Source
//!
//! Reads the two catalog files from a data directory and builds the
//! [`Catalog`] the checkout engine works on.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DataConfig::new("data")                                                │
//! │       │                                                                 │
//! │       ├──► data/promotions.md ──► parse_promotions ──┐                  │
//! │       └──► data/products.md   ──► parse_products   ──┤                  │
//! │                                                      ▼                  │
//! │                                  build_catalog ── warn on:              │
//! │                                   │   • unknown promotion names         │
//! │                                   │   • promotional/regular price gaps  │
//! │                                   ▼                                     │
//! │                                Catalog                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock changes are never written back; every run starts from the files.

use std::fs;
use std::path::{Path, PathBuf};

use kiosk_core::{Catalog, ProductRecord, PromotionRecord};
use tracing::{info, warn};

use crate::error::{DataError, DataResult};
use crate::records::{parse_products, parse_promotions};

/// Default products file name.
pub const PRODUCTS_FILE: &str = "products.md";

/// Default promotions file name.
pub const PROMOTIONS_FILE: &str = "promotions.md";

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub products_file: String,
    pub promotions_file: String,
}

impl DataConfig {
    /// Uses the default file names inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DataConfig {
            dir: dir.into(),
            products_file: PRODUCTS_FILE.to_string(),
            promotions_file: PROMOTIONS_FILE.to_string(),
        }
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(&self.products_file)
    }

    pub fn promotions_path(&self) -> PathBuf {
        self.dir.join(&self.promotions_file)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Reads both files and returns their records in file order.
pub fn load_records(config: &DataConfig) -> DataResult<(Vec<ProductRecord>, Vec<PromotionRecord>)> {
    let products = parse_products(&config.products_file, &read_file(&config.products_path())?)?;
    let promotions =
        parse_promotions(&config.promotions_file, &read_file(&config.promotions_path())?)?;

    Ok((products, promotions))
}

/// Loads the catalog described by `config`.
pub fn load_catalog(config: &DataConfig) -> DataResult<Catalog> {
    let (products, promotions) = load_records(config)?;
    let catalog = build_catalog(products, promotions)?;

    info!(
        dir = %config.dir.display(),
        products = catalog.len(),
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Builds a catalog from records, logging suspicious but valid data.
pub fn build_catalog(
    products: Vec<ProductRecord>,
    promotions: Vec<PromotionRecord>,
) -> DataResult<Catalog> {
    for record in &products {
        if let Some(promotion) = &record.promotion {
            if !promotions.iter().any(|p| &p.name == promotion) {
                warn!(
                    product = %record.name,
                    promotion = %promotion,
                    "Product references an unknown promotion; it will be sold without one"
                );
            }
        }
    }

    let catalog = Catalog::from_records(products, promotions)?;

    for divergence in catalog.price_divergences() {
        warn!(
            product = %divergence.name,
            promotional_price = divergence.promotional_price.won(),
            regular_price = divergence.regular_price.won(),
            "Promotional and regular lines disagree on price"
        );
    }

    Ok(catalog)
}

fn read_file(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{CoreError, StockPool};
    use tempfile::TempDir;

    fn write_files(dir: &TempDir, products: &str, promotions: &str) {
        fs::write(dir.path().join(PRODUCTS_FILE), products).unwrap();
        fs::write(dir.path().join(PROMOTIONS_FILE), promotions).unwrap();
    }

    #[test]
    fn test_load_catalog_from_directory() {
        let dir = TempDir::new().unwrap();
        write_files(
            &dir,
            "name,price,quantity,promotion\nCola,1000,10,Soda 2+1\nCola,1000,10,null\nWater,500,10,null\n",
            "name,buy,get,start_date,end_date\nSoda 2+1,2,1,2026-01-01,2026-12-31\n",
        );

        let catalog = load_catalog(&DataConfig::new(dir.path())).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_stock("Cola"), 20);
        assert!(catalog.promotion("Soda 2+1").is_some());
        assert_eq!(
            catalog.entry("Water").unwrap().stock(StockPool::Regular),
            10
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(&DataConfig::new(dir.path())).unwrap_err();

        assert!(matches!(err, DataError::Io { ref path, .. } if path.ends_with(PRODUCTS_FILE)));
    }

    #[test]
    fn test_duplicate_lines_surface_as_catalog_error() {
        let dir = TempDir::new().unwrap();
        write_files(
            &dir,
            "name,price,quantity,promotion\nWater,500,1,null\nWater,500,2,null\n",
            "name,buy,get,start_date,end_date\n",
        );

        let err = load_catalog(&DataConfig::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            DataError::Catalog(CoreError::DuplicateLine { .. })
        ));
    }

    #[test]
    fn test_unknown_promotion_still_loads() {
        let products = vec![ProductRecord {
            name: "Gum".to_string(),
            price: 300,
            quantity: 4,
            promotion: Some("Ghost Sale".to_string()),
        }];

        let catalog = build_catalog(products, Vec::new()).unwrap();
        assert!(catalog.find_promotional_line("Gum").is_some());
    }

    #[test]
    fn test_custom_file_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stock.csv"), "name,price,quantity,promotion\nGum,300,1,null\n")
            .unwrap();
        fs::write(dir.path().join("deals.csv"), "name,buy,get,start_date,end_date\n").unwrap();

        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            products_file: "stock.csv".to_string(),
            promotions_file: "deals.csv".to_string(),
        };
        let (products, promotions) = load_records(&config).unwrap();

        assert_eq!(products.len(), 1);
        assert!(promotions.is_empty());
    }
}

//! Catalog sources per entry type.

use crate::entry::EntryType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product categories served by the `byCategory` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Coin,
    Note,
    Crate,
}

impl ProductCategory {
    /// Path segment used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Coin => "Coin",
            ProductCategory::Note => "Note",
            ProductCategory::Crate => "Crate",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where product options for an entry type come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    /// Products of one category.
    Category(ProductCategory),
    /// The user's own rate card with photos.
    RatesWithPhoto,
}

impl CatalogSource {
    /// Sources for an entry type, in the order their results are concatenated.
    pub fn for_entry(entry_type: EntryType) -> &'static [CatalogSource] {
        const CASH: [CatalogSource; 2] = [
            CatalogSource::Category(ProductCategory::Coin),
            CatalogSource::Category(ProductCategory::Note),
        ];
        const CRATE: [CatalogSource; 1] = [CatalogSource::Category(ProductCategory::Crate)];
        const RATES: [CatalogSource; 1] = [CatalogSource::RatesWithPhoto];

        match entry_type {
            EntryType::Cash => &CASH,
            EntryType::Crate => &CRATE,
            EntryType::Missing | EntryType::Return => &RATES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogSource::Category(ProductCategory::Coin) => "category_coin",
            CatalogSource::Category(ProductCategory::Note) => "category_note",
            CatalogSource::Category(ProductCategory::Crate) => "category_crate",
            CatalogSource::RatesWithPhoto => "rates_with_photo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_uses_coin_then_note() {
        assert_eq!(
            CatalogSource::for_entry(EntryType::Cash),
            &[
                CatalogSource::Category(ProductCategory::Coin),
                CatalogSource::Category(ProductCategory::Note)
            ]
        );
    }

    #[test]
    fn test_missing_and_return_share_rates() {
        assert_eq!(
            CatalogSource::for_entry(EntryType::Missing),
            CatalogSource::for_entry(EntryType::Return)
        );
        assert_eq!(
            CatalogSource::for_entry(EntryType::Return),
            &[CatalogSource::RatesWithPhoto]
        );
    }

    #[test]
    fn test_crate_category() {
        assert_eq!(
            CatalogSource::for_entry(EntryType::Crate),
            &[CatalogSource::Category(ProductCategory::Crate)]
        );
    }
}

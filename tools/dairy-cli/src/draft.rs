//! Return-order draft files.
//!
//! ```toml
//! return_date = "2024-05-01"
//! delivery_status = "delivered"
//! payment_status = "pending"
//!
//! [order]
//! id = "6650f1c2"
//! humanReadableID = "ORD-1042"
//! userId = "42"
//! distributorName = "Sharma Dairy"
//!
//! [[items]]
//! product_id = "p1"
//! entry_type = "return"
//! quantity = 3
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dairy_commerce::order::{DeliveryStatus, PaymentStatus, SelectedOrder, SelectedOrderInput};
use dairy_commerce::{EntryType, ProductId};
use serde::Deserialize;

/// A return order prepared offline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnDraft {
    pub order: SelectedOrderInput,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub items: Vec<DraftItem>,
}

/// One requested line.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub entry_type: EntryType,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl ReturnDraft {
    /// Load a draft, JSON for `.json` files and TOML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft: {}", path.display()))?;
        let json = path.extension().is_some_and(|ext| ext == "json");
        Self::parse(&content, json)
            .with_context(|| format!("Failed to parse draft: {}", path.display()))
    }

    pub fn parse(content: &str, json: bool) -> Result<Self> {
        let draft: Self = if json {
            serde_json::from_str(content)?
        } else {
            toml::from_str(content)?
        };
        draft.validate()?;
        Ok(draft)
    }

    fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            bail!("Draft has no items");
        }
        for item in &self.items {
            if item.product_id.is_empty() {
                bail!("Draft item has a blank product_id");
            }
            if item.quantity <= 0 {
                bail!(
                    "Quantity for {} ({}) must be positive, got {}",
                    item.product_id,
                    item.entry_type,
                    item.quantity
                );
            }
        }
        Ok(())
    }

    /// The validated onward order.
    pub fn selected_order(&self) -> Result<SelectedOrder> {
        Ok(SelectedOrder::try_from(self.order.clone())?)
    }

    /// Entry types used by the items, in display precedence.
    pub fn entry_types(&self) -> Vec<EntryType> {
        EntryType::ALL
            .into_iter()
            .filter(|t| self.items.iter().any(|i| i.entry_type == *t))
            .collect()
    }

    /// Items of one entry type.
    pub fn items_of(&self, entry_type: EntryType) -> impl Iterator<Item = &DraftItem> {
        self.items.iter().filter(move |i| i.entry_type == entry_type)
    }
}

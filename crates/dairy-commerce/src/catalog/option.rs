//! Product options offered to the picker.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product the operator can add to a return order.
///
/// This is the canonical shape every catalog endpoint is normalised into,
/// whatever field names the backend used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Per-item rate.
    pub price: Money,
    /// GST percentage (0-100).
    pub gst_rate: f64,
    /// Photo URL, empty when the backend has none.
    pub image_url: String,
}

impl ProductOption {
    /// Create a product option without a photo.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, gst_rate: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            gst_rate,
            image_url: String::new(),
        }
    }

    /// Set the photo URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Check if the option carries a photo.
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Case-insensitive name match used by the picker's search box.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.name.to_lowercase().contains(&query)
    }
}

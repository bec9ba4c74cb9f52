//! Line items and the in-memory line-item store.

use crate::cart::OrderPricing;
use crate::catalog::ProductOption;
use crate::entry::EntryType;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Identity of a line item: the same product may appear once per entry type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemKey {
    pub product_id: ProductId,
    pub entry_type: EntryType,
}

impl LineItemKey {
    pub fn new(product_id: ProductId, entry_type: EntryType) -> Self {
        Self {
            product_id,
            entry_type,
        }
    }
}

/// A line item in a return order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (copied from the option at add time).
    pub product_name: String,
    /// Per-item rate (copied from the option at add time).
    pub per_item_rate: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// GST percentage (copied from the option at add time).
    pub gst_rate: f64,
    /// Entry type the item was added under.
    pub entry_type: EntryType,
}

impl LineItem {
    /// Create a line item with quantity 1 from a product option.
    pub fn from_option(option: &ProductOption, entry_type: EntryType) -> Self {
        Self {
            product_id: option.id.clone(),
            product_name: option.name.clone(),
            per_item_rate: option.price,
            quantity: 1,
            gst_rate: option.gst_rate,
            entry_type,
        }
    }

    /// Identity key of this item.
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(self.product_id.clone(), self.entry_type)
    }

    fn is(&self, product_id: &ProductId, entry_type: EntryType) -> bool {
        &self.product_id == product_id && self.entry_type == entry_type
    }

    /// Line subtotal (rate * quantity).
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.per_item_rate
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// In-memory list of selected products.
///
/// Storage keeps insertion order; [`LineItemStore::display_order`] gives the
/// grouped presentation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineItemStore {
    items: Vec<LineItem>,
    currency: Currency,
}

impl LineItemStore {
    /// Create an empty store in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store in a given currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add a product under an entry type.
    ///
    /// Re-adding an existing (product, entry type) pair increments its
    /// quantity by one. A new pair is appended with quantity 1 and the
    /// option's current rate and GST.
    pub fn add(&mut self, option: &ProductOption, entry_type: EntryType) -> &LineItem {
        let position = self
            .items
            .iter()
            .position(|i| i.is(&option.id, entry_type));

        let index = match position {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(LineItem::from_option(option, entry_type));
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Replace the quantity of an item.
    ///
    /// Quantities of zero or below are ignored; removal is explicit.
    /// Returns whether an item changed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        entry_type: EntryType,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            tracing::debug!(%product_id, %entry_type, quantity, "ignoring non-positive quantity");
            return false;
        }

        match self.items.iter_mut().find(|i| i.is(product_id, entry_type)) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Increase an item's quantity by one.
    pub fn increment(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        match self.get(product_id, entry_type).map(|i| i.quantity) {
            Some(quantity) => {
                self.update_quantity(product_id, entry_type, quantity.saturating_add(1))
            }
            None => false,
        }
    }

    /// Decrease an item's quantity by one; a quantity of 1 stays at 1.
    pub fn decrement(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        match self.get(product_id, entry_type).map(|i| i.quantity) {
            Some(quantity) => self.update_quantity(product_id, entry_type, quantity - 1),
            None => false,
        }
    }

    /// Remove an item. Absent items are not an error.
    pub fn remove(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.is(product_id, entry_type));
        self.items.len() < len_before
    }

    /// Discard every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get an item by identity.
    pub fn get(&self, product_id: &ProductId, entry_type: EntryType) -> Option<&LineItem> {
        self.items.iter().find(|i| i.is(product_id, entry_type))
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Items sorted by entry-type precedence (cash, crate, missing, return).
    ///
    /// The sort is stable, so items of one entry type keep insertion order.
    pub fn display_order(&self) -> Vec<&LineItem> {
        let mut sorted: Vec<&LineItem> = self.items.iter().collect();
        sorted.sort_by_key(|i| i.entry_type.precedence());
        sorted
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Store currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Derive subtotal, GST and total from the current items.
    pub fn pricing(&self) -> Result<OrderPricing, CommerceError> {
        OrderPricing::calculate(&self.items, self.currency)
    }
}

//! Read-only recap shown before confirming a return order.

use crate::cart::{LineItem, LineItemStore, OrderPricing};
use crate::error::CommerceError;
use crate::order::{DeliveryStatus, PaymentStatus, SelectedOrder};
use chrono::NaiveDate;

/// Snapshot of what is about to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub order_id: String,
    pub distributor_name: String,
    pub return_date: NaiveDate,
    pub delivery_status: DeliveryStatus,
    pub payment_status: PaymentStatus,
    /// Lines in display order.
    pub lines: Vec<LineItem>,
    pub pricing: OrderPricing,
}

impl ReviewSummary {
    pub fn build(
        order: &SelectedOrder,
        return_date: NaiveDate,
        store: &LineItemStore,
        delivery_status: DeliveryStatus,
        payment_status: PaymentStatus,
    ) -> Result<Self, CommerceError> {
        let lines: Vec<LineItem> = store.display_order().into_iter().cloned().collect();
        let pricing = OrderPricing::calculate(&lines, store.currency())?;
        Ok(Self {
            order_id: order.human_readable_id.clone(),
            distributor_name: order.distributor_name.clone(),
            return_date,
            delivery_status,
            payment_status,
            lines,
            pricing,
        })
    }

    /// Whether two consecutive lines start a new entry-type group.
    pub fn starts_group(&self, index: usize) -> bool {
        index > 0 && self.lines[index].entry_type != self.lines[index - 1].entry_type
    }
}

//! Return-order cart module.
//!
//! Contains line items, the line-item store, and pricing.

mod pricing;
mod store;

pub use pricing::{LineItemPricing, OrderPricing};
pub use store::{LineItem, LineItemKey, LineItemStore};

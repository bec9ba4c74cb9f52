//! Return-order domain types and logic for dairy distribution.
//!
//! This crate holds everything about a return order that does not touch the
//! network:
//!
//! - **Catalog**: the canonical product option and decoders for the
//!   backend's two record shapes
//! - **Cart**: the line-item store keyed by (product, entry type) and
//!   subtotal/GST/total pricing
//! - **Order**: the onward-order input contract, its summary parser, and
//!   the submission payload
//! - **Submission**: the review/confirm state machine
//!
//! # Example
//!
//! ```rust
//! use dairy_commerce::prelude::*;
//!
//! let dahi = ProductOption::new(
//!     ProductId::new("p-1"),
//!     "Light Dahi",
//!     Money::from_decimal(100.0, Currency::INR),
//!     5.0,
//! );
//!
//! let mut store = LineItemStore::new();
//! store.add(&dahi, EntryType::Return);
//! store.add(&dahi, EntryType::Return);
//!
//! let pricing = store.pricing().unwrap();
//! assert_eq!(pricing.total.display(), "\u{20b9}210.00");
//! ```

pub mod entry;
pub mod error;
pub mod ids;
pub mod money;
pub mod notification;

pub mod cart;
pub mod catalog;
pub mod order;
pub mod submission;

pub use entry::EntryType;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use notification::{Notification, NotificationKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::entry::EntryType;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notification::{Notification, NotificationKind};

    // Catalog
    pub use crate::catalog::{normalize_catalog, CatalogSource, ProductCategory, ProductOption};

    // Cart
    pub use crate::cart::{LineItem, LineItemKey, LineItemPricing, LineItemStore, OrderPricing};

    // Order
    pub use crate::order::{
        parse_order_summary, DeliveryStatus, OrderLine, PaymentStatus, ReturnOrder,
        ReturnOrderResponse, SelectedOrder, SelectedOrderInput, SummaryRow,
    };

    // Submission
    pub use crate::submission::{ReviewSummary, SubmissionFlow, SubmissionState};
}

//! Order module.
//!
//! Contains the onward-order input contract, its summary parser, and the
//! return-order submission payload.

mod payload;
mod selected;
mod summary;

pub use payload::{DeliveryStatus, OrderLine, PaymentStatus, ReturnOrder, ReturnOrderResponse};
pub use selected::{SelectedOrder, SelectedOrderInput};
pub use summary::{parse_order_summary, SummaryRow};

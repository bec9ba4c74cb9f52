//! Return-order submission payload and backend acknowledgement.

use crate::cart::LineItemStore;
use crate::entry::EntryType;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Delivery status recorded on the return order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    /// Goods delivered.
    #[default]
    #[serde(rename = "delivered")]
    Delivered,
    /// Order placed but not yet delivered. The backend calls this "pending".
    #[serde(rename = "pending", alias = "placed")]
    Placed,
}

impl DeliveryStatus {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Placed => "pending",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Placed => "Placed",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivered" => Ok(DeliveryStatus::Delivered),
            "placed" | "pending" => Ok(DeliveryStatus::Placed),
            other => Err(CommerceError::UnknownStatus {
                kind: "delivery",
                value: other.to_string(),
            }),
        }
    }
}

/// Payment status recorded on the return order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(CommerceError::UnknownStatus {
                kind: "payment",
                value: other.to_string(),
            }),
        }
    }
}

/// A line of the submitted order. Rates are not sent; the backend prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub entry_type: EntryType,
}

/// Body of `POST /v1/order/admin/return/addOrder`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnOrder {
    /// Distributor the return is raised for.
    pub user_id: UserId,
    /// Line items.
    pub order_data: Vec<OrderLine>,
    /// The onward (original) order id.
    pub onward_order_id: OrderId,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Wallet transaction token, empty when none was obtained.
    pub token: String,
    /// Delivery status.
    pub order_status: DeliveryStatus,
}

impl ReturnOrder {
    /// Build the payload from the current line items.
    ///
    /// Fails with [`CommerceError::EmptyOrder`] when there are no items.
    pub fn from_store(
        user_id: UserId,
        onward_order_id: OrderId,
        store: &LineItemStore,
        payment_status: PaymentStatus,
        order_status: DeliveryStatus,
        token: Option<&str>,
    ) -> Result<Self, CommerceError> {
        if store.is_empty() {
            return Err(CommerceError::EmptyOrder);
        }

        let order_data = store
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                entry_type: item.entry_type,
            })
            .collect();

        Ok(Self {
            user_id,
            order_data,
            onward_order_id,
            payment_status,
            token: token.unwrap_or_default().to_string(),
            order_status,
        })
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.order_data.iter().map(|l| l.quantity).sum()
    }
}

/// Backend acknowledgement of a submitted return order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReturnOrderResponse {
    /// Whether the backend accepted the order.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, usually present on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// Anything else the backend returned.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

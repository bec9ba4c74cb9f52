//! The onward order a return is raised against.

use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::order::{parse_order_summary, SummaryRow};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Untrusted order details as handed over by the caller.
///
/// Accepts both snake_case keys and the camelCase keys used by the order
/// listing (`humanReadableID`, `distributorName`, `userId`, `orderlist`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectedOrderInput {
    pub id: Option<String>,
    #[serde(alias = "humanReadableID")]
    pub human_readable_id: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(alias = "distributorName")]
    pub distributor_name: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<String>,
    #[serde(alias = "orderlist")]
    pub order_list: Option<String>,
}

/// A validated onward order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedOrder {
    /// Backend id of the onward order.
    pub id: OrderId,
    /// Id shown to operators.
    pub human_readable_id: String,
    /// Return date.
    pub date: NaiveDate,
    /// Distributor name.
    pub distributor_name: String,
    /// Distributor's user id.
    pub user_id: UserId,
    /// Free-text summary of the delivered lines.
    pub order_list: String,
}

impl SelectedOrder {
    /// Create a selected order dated today.
    pub fn new(id: OrderId, user_id: UserId) -> Result<Self, CommerceError> {
        if id.is_empty() {
            return Err(CommerceError::ValidationError("order id is required".to_string()));
        }
        if user_id.is_empty() {
            return Err(CommerceError::ValidationError("user id is required".to_string()));
        }
        Ok(Self {
            human_readable_id: id.as_str().to_string(),
            id,
            date: Local::now().date_naive(),
            distributor_name: String::new(),
            user_id,
            order_list: String::new(),
        })
    }

    pub fn with_human_readable_id(mut self, id: impl Into<String>) -> Self {
        self.human_readable_id = id.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_distributor(mut self, name: impl Into<String>) -> Self {
        self.distributor_name = name.into();
        self
    }

    pub fn with_order_list(mut self, summary: impl Into<String>) -> Self {
        self.order_list = summary.into();
        self
    }

    /// Parsed rows of the delivered-order summary.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        parse_order_summary(&self.order_list)
    }
}

impl TryFrom<SelectedOrderInput> for SelectedOrder {
    type Error = CommerceError;

    fn try_from(input: SelectedOrderInput) -> Result<Self, Self::Error> {
        let id = OrderId::new(input.id.unwrap_or_default());
        let user_id = UserId::new(input.user_id.unwrap_or_default());
        let mut order = SelectedOrder::new(id, user_id)?;

        if let Some(hrid) = input.human_readable_id.filter(|s| !s.is_empty()) {
            order.human_readable_id = hrid;
        }
        if let Some(date) = input.date {
            order.date = date;
        }
        order.distributor_name = input.distributor_name.unwrap_or_default();
        order.order_list = input.order_list.unwrap_or_default();
        Ok(order)
    }
}

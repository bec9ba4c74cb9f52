//! Backend endpoints.

use dairy_commerce::catalog::{CatalogSource, ProductCategory};
use dairy_commerce::{UserId, WalletId};
use dairy_data::Method;
use std::fmt;

/// A backend endpoint, relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Products of one category.
    ProductsByCategory(ProductCategory),
    /// A user's rate card with product photos.
    RatesWithPhoto(UserId),
    /// Start a wallet transaction and obtain its token.
    InitiateTransaction(WalletId),
    /// Submit a return order.
    AddReturnOrder,
}

impl Endpoint {
    /// Endpoint serving a catalog source for `user_id`.
    pub fn for_source(source: CatalogSource, user_id: &UserId) -> Self {
        match source {
            CatalogSource::Category(category) => Endpoint::ProductsByCategory(category),
            CatalogSource::RatesWithPhoto => Endpoint::RatesWithPhoto(user_id.clone()),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::ProductsByCategory(_) | Self::RatesWithPhoto(_) => Method::Get,
            Self::InitiateTransaction(_) | Self::AddReturnOrder => Method::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::ProductsByCategory(category) => {
                format!("/v1/product/byCategory/{}", category.as_str())
            }
            Self::RatesWithPhoto(user_id) => format!("/v1/product/getRatesWithPhoto/{}", user_id),
            Self::InitiateTransaction(wallet_id) => {
                format!("/v1/wallet/initiateTransaction/{}", wallet_id)
            }
            Self::AddReturnOrder => "/v1/order/admin/return/addOrder".to_string(),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProductsByCategory(_) => "products_by_category",
            Self::RatesWithPhoto(_) => "rates_with_photo",
            Self::InitiateTransaction(_) => "initiate_transaction",
            Self::AddReturnOrder => "add_return_order",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(
            Endpoint::ProductsByCategory(ProductCategory::Note).path(),
            "/v1/product/byCategory/Note"
        );
        assert_eq!(
            Endpoint::RatesWithPhoto(UserId::new("42")).path(),
            "/v1/product/getRatesWithPhoto/42"
        );
        let wallet = WalletId::for_user(&UserId::new("42"));
        assert_eq!(
            Endpoint::InitiateTransaction(wallet).path(),
            "/v1/wallet/initiateTransaction/42::user::txn"
        );
        assert_eq!(
            Endpoint::AddReturnOrder.to_string(),
            "POST /v1/order/admin/return/addOrder"
        );
    }

    #[test]
    fn test_for_source() {
        let user = UserId::new("7");
        assert_eq!(
            Endpoint::for_source(CatalogSource::RatesWithPhoto, &user),
            Endpoint::RatesWithPhoto(user.clone())
        );
        assert_eq!(
            Endpoint::for_source(CatalogSource::Category(ProductCategory::Crate), &user).method(),
            Method::Get
        );
    }
}

//! Typed calls against the dairy backend.

use crate::auth::AuthContext;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use dairy_commerce::catalog::{normalize_catalog, CatalogSource, ProductCategory, ProductOption};
use dairy_commerce::order::{ReturnOrder, ReturnOrderResponse};
use dairy_commerce::{Currency, EntryType, UserId, WalletId};
use dairy_data::{ClientRequestBuilder, FetchClient};
use serde_json::{json, Value};

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://dairy-marketing.mitrsewa.com/api";

/// Backend client bound to an optional session.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DairyApi {
    client: FetchClient,
    auth: Option<AuthContext>,
    currency: Currency,
}

impl DairyApi {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            auth: None,
            currency: Currency::default(),
        }
    }

    /// Client for `base_url` with default transport settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(FetchClient::new().with_base_url(base_url))
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn request(&self, endpoint: &Endpoint) -> Result<ClientRequestBuilder, ApiError> {
        let auth = self.auth.as_ref().ok_or(ApiError::MissingAuth)?;
        tracing::debug!(endpoint = endpoint.name(), path = %endpoint.path(), "dispatching");
        Ok(self
            .client
            .request(endpoint.method(), endpoint.path())
            .bearer_auth(auth.token())
            .header("Accept", "application/json"))
    }

    /// GET a catalog body. A 2xx body that is not JSON reads as `Null`.
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        let response = self.request(endpoint)?.send().await?.error_for_status()?;
        Ok(response.json().unwrap_or_else(|e| {
            tracing::warn!(endpoint = endpoint.name(), error = %e, "unreadable catalog body");
            Value::Null
        }))
    }

    /// Products of one category.
    pub async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<ProductOption>, ApiError> {
        let body = self
            .get_json(&Endpoint::ProductsByCategory(category))
            .await?;
        Ok(normalize_catalog(&body, self.currency))
    }

    /// The user's rate card with photos.
    pub async fn rates_with_photo(&self, user_id: &UserId) -> Result<Vec<ProductOption>, ApiError> {
        let body = self
            .get_json(&Endpoint::RatesWithPhoto(user_id.clone()))
            .await?;
        Ok(normalize_catalog(&body, self.currency))
    }

    /// Fetch a single catalog source.
    pub async fn fetch_source(
        &self,
        source: CatalogSource,
        user_id: &UserId,
    ) -> Result<Vec<ProductOption>, ApiError> {
        match source {
            CatalogSource::Category(category) => self.products_by_category(category).await,
            CatalogSource::RatesWithPhoto => self.rates_with_photo(user_id).await,
        }
    }

    /// Product options for an entry type.
    ///
    /// Multi-source entry types are fetched concurrently and concatenated in
    /// source order. Any failing source fails the whole fetch.
    pub async fn fetch_catalog(
        &self,
        entry_type: EntryType,
        user_id: &UserId,
    ) -> Result<Vec<ProductOption>, ApiError> {
        let options = match CatalogSource::for_entry(entry_type) {
            [single] => self.fetch_source(*single, user_id).await?,
            [first, second] => {
                let (mut first, second) = futures::try_join!(
                    self.fetch_source(*first, user_id),
                    self.fetch_source(*second, user_id)
                )?;
                first.extend(second);
                first
            }
            sources => {
                let fetches = sources
                    .iter()
                    .map(|source| self.fetch_source(*source, user_id));
                futures::future::try_join_all(fetches)
                    .await?
                    .into_iter()
                    .flatten()
                    .collect()
            }
        };

        tracing::info!(entry_type = %entry_type, count = options.len(), "catalog loaded");
        Ok(options)
    }

    /// Start a wallet transaction. Returns `data.token`, empty when absent.
    pub async fn initiate_transaction(&self, wallet_id: &WalletId) -> Result<String, ApiError> {
        let body: Value = self
            .request(&Endpoint::InitiateTransaction(wallet_id.clone()))?
            .json(&json!({}))?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let token = body
            .get("data")
            .and_then(|data| data.get("token"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(token)
    }

    /// Submit a return order.
    ///
    /// A `success: false` acknowledgement is reported as
    /// [`ApiError::Rejected`] carrying the backend message.
    pub async fn add_return_order(
        &self,
        order: &ReturnOrder,
    ) -> Result<ReturnOrderResponse, ApiError> {
        let response: ReturnOrderResponse = self
            .request(&Endpoint::AddReturnOrder)?
            .json(order)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        if !response.success {
            return Err(ApiError::Rejected {
                message: response.message,
            });
        }
        tracing::info!(
            onward_order_id = %order.onward_order_id,
            items = order.item_count(),
            "return order accepted"
        );
        Ok(response)
    }
}

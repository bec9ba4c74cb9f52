//! Backend client and return-order form for dairy distribution.
//!
//! [`DairyApi`] talks to the backend with an explicit [`AuthContext`].
//! [`ReturnOrderForm`] drives one return order: pick products per entry
//! type, edit quantities, review and submit.
//!
//! # Example
//!
//! ```rust,no_run
//! use dairy_client::{AuthContext, DairyApi, ReturnOrderForm};
//! use dairy_commerce::prelude::*;
//!
//! # async fn run() -> Result<(), CommerceError> {
//! let auth = AuthContext::from_token("session-token").expect("token");
//! let api = DairyApi::with_base_url(dairy_client::DEFAULT_BASE_URL).with_auth(auth);
//! let order = SelectedOrder::new(OrderId::new("ord-1"), UserId::new("42"))?;
//!
//! let mut form = ReturnOrderForm::new(api, order);
//! form.initialize_transaction().await;
//! form.load_catalog(EntryType::Crate).await;
//! if let Some(option) = form.catalog().options().first().cloned() {
//!     form.add_option(&option);
//! }
//! if form.submit() {
//!     form.confirm().await;
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod catalog;
mod endpoint;
mod error;
mod form;

pub use api::{DairyApi, DEFAULT_BASE_URL};
pub use auth::AuthContext;
pub use catalog::{CatalogRequest, CatalogResponse, CatalogState, CatalogUpdate, FetchTicket};
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use form::{CloseCallback, ReturnOrderForm};

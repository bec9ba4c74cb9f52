//! Product options for the active entry type.
//!
//! Every entry-type selection starts a new fetch and bumps a generation
//! counter. Requests are detached from the state so several may be in
//! flight; only the response carrying the latest generation is applied.

use crate::api::DairyApi;
use crate::error::ApiError;
use dairy_commerce::catalog::ProductOption;
use dairy_commerce::notification::FETCH_FAILED_FALLBACK;
use dairy_commerce::{EntryType, Notification, UserId};

/// Identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub entry_type: EntryType,
}

/// A pending catalog fetch that owns everything it needs.
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    api: DairyApi,
    user_id: UserId,
    ticket: FetchTicket,
}

impl CatalogRequest {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Perform the fetch.
    pub async fn run(self) -> CatalogResponse {
        let result = self
            .api
            .fetch_catalog(self.ticket.entry_type, &self.user_id)
            .await;
        CatalogResponse {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of a catalog fetch, tagged with its ticket.
#[derive(Debug)]
pub struct CatalogResponse {
    pub ticket: FetchTicket,
    pub result: Result<Vec<ProductOption>, ApiError>,
}

/// What applying a response did.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogUpdate {
    /// A newer fetch superseded this one; nothing changed.
    Stale,
    /// Options replaced.
    Loaded(usize),
    /// Fetch failed; options cleared.
    Failed(Notification),
}

/// Option list backing the product picker.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    entry_type: EntryType,
    options: Vec<ProductOption>,
    loading: bool,
    generation: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Options whose name contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&ProductOption> {
        self.options.iter().filter(|o| o.matches(query)).collect()
    }

    /// Look up an option by product id.
    pub fn find(&self, product_id: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id.as_str() == product_id)
    }

    /// Start a fetch for `entry_type`.
    ///
    /// The entry type is recorded even when no request can be made. Returns
    /// `None` without an authenticated client or a user id.
    pub fn begin(
        &mut self,
        api: &DairyApi,
        user_id: &UserId,
        entry_type: EntryType,
    ) -> Option<CatalogRequest> {
        self.entry_type = entry_type;
        if !api.is_authenticated() || user_id.is_empty() {
            tracing::warn!(entry_type = %entry_type, "catalog fetch skipped: no session or user");
            return None;
        }

        self.generation += 1;
        self.loading = true;
        tracing::debug!(entry_type = %entry_type, generation = self.generation, "catalog fetch started");

        Some(CatalogRequest {
            api: api.clone(),
            user_id: user_id.clone(),
            ticket: FetchTicket {
                generation: self.generation,
                entry_type,
            },
        })
    }

    /// Apply a fetch result unless a newer fetch has started since.
    pub fn apply(&mut self, response: CatalogResponse) -> CatalogUpdate {
        if response.ticket.generation != self.generation {
            tracing::warn!(
                generation = response.ticket.generation,
                latest = self.generation,
                "stale catalog response dropped"
            );
            return CatalogUpdate::Stale;
        }

        self.loading = false;
        match response.result {
            Ok(options) => {
                let count = options.len();
                self.options = options;
                CatalogUpdate::Loaded(count)
            }
            Err(e) => {
                tracing::error!(
                    entry_type = %response.ticket.entry_type,
                    error = %e,
                    "catalog fetch failed"
                );
                self.options.clear();
                CatalogUpdate::Failed(Notification::error(e.user_message(FETCH_FAILED_FALLBACK)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use dairy_commerce::{Currency, Money, ProductId};

    fn api() -> DairyApi {
        DairyApi::with_base_url("http://localhost").with_auth(AuthContext::from_token("t").unwrap())
    }

    fn option(id: &str) -> ProductOption {
        ProductOption::new(ProductId::new(id), id, Money::new(100, Currency::INR), 0.0)
    }

    fn response(ticket: FetchTicket, result: Result<Vec<ProductOption>, ApiError>) -> CatalogResponse {
        CatalogResponse { ticket, result }
    }

    #[test]
    fn test_begin_requires_session_and_user() {
        let mut state = CatalogState::new();
        let anon = DairyApi::with_base_url("http://localhost");
        assert!(state.begin(&anon, &UserId::new("u1"), EntryType::Cash).is_none());
        assert!(state.begin(&api(), &UserId::new(""), EntryType::Cash).is_none());
        assert_eq!(state.entry_type(), EntryType::Cash);
        assert!(!state.is_loading());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn test_latest_response_applied() {
        let mut state = CatalogState::new();
        let req = state.begin(&api(), &UserId::new("u1"), EntryType::Crate).unwrap();
        assert!(state.is_loading());

        let update = state.apply(response(req.ticket(), Ok(vec![option("a"), option("b")])));
        assert_eq!(update, CatalogUpdate::Loaded(2));
        assert!(!state.is_loading());
        assert!(state.find("b").is_some());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = CatalogState::new();
        let first = state.begin(&api(), &UserId::new("u1"), EntryType::Cash).unwrap();
        let second = state.begin(&api(), &UserId::new("u1"), EntryType::Crate).unwrap();

        let update = state.apply(response(second.ticket(), Ok(vec![option("crate")])));
        assert_eq!(update, CatalogUpdate::Loaded(1));

        let update = state.apply(response(first.ticket(), Err(ApiError::MissingAuth)));
        assert_eq!(update, CatalogUpdate::Stale);
        assert_eq!(state.options().len(), 1);
        assert_eq!(state.options()[0].id.as_str(), "crate");
    }

    #[test]
    fn test_stale_response_keeps_loading() {
        let mut state = CatalogState::new();
        let first = state.begin(&api(), &UserId::new("u1"), EntryType::Cash).unwrap();
        let _second = state.begin(&api(), &UserId::new("u1"), EntryType::Cash).unwrap();

        assert_eq!(
            state.apply(response(first.ticket(), Ok(vec![option("a")]))),
            CatalogUpdate::Stale
        );
        assert!(state.is_loading());
        assert!(state.options().is_empty());
    }

    #[test]
    fn test_failure_clears_options() {
        let mut state = CatalogState::new();
        let req = state.begin(&api(), &UserId::new("u1"), EntryType::Return).unwrap();
        state.apply(response(req.ticket(), Ok(vec![option("a")])));

        let req = state.begin(&api(), &UserId::new("u1"), EntryType::Cash).unwrap();
        let update = state.apply(response(req.ticket(), Err(ApiError::MissingAuth)));
        match update {
            CatalogUpdate::Failed(n) => {
                assert!(n.is_error());
                assert_eq!(n.description, FETCH_FAILED_FALLBACK);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(state.options().is_empty());
        assert!(!state.is_loading());
    }
}

//! Return-order form state.
//!
//! Owns the cart, the product picker, the submission flow and the pending
//! notification for one onward order. Network failures never escape as
//! errors: they are logged and surfaced as a [`Notification`].

use crate::api::DairyApi;
use crate::catalog::{CatalogRequest, CatalogResponse, CatalogState, CatalogUpdate};
use chrono::NaiveDate;
use dairy_commerce::cart::{LineItemStore, OrderPricing};
use dairy_commerce::catalog::ProductOption;
use dairy_commerce::notification::{SUBMIT_FAILED_FALLBACK, SUBMIT_SUCCEEDED};
use dairy_commerce::order::{DeliveryStatus, PaymentStatus, ReturnOrder, SelectedOrder};
use dairy_commerce::submission::{ReviewSummary, SubmissionFlow, SubmissionState};
use dairy_commerce::{CommerceError, EntryType, Notification, ProductId, WalletId};
use std::fmt;

/// Invoked once after an order is accepted.
pub type CloseCallback = Box<dyn Fn() + Send + Sync>;

pub struct ReturnOrderForm {
    api: DairyApi,
    order: SelectedOrder,
    store: LineItemStore,
    catalog: CatalogState,
    delivery_status: DeliveryStatus,
    payment_status: PaymentStatus,
    return_date: Option<NaiveDate>,
    txn_token: String,
    flow: SubmissionFlow,
    notification: Option<Notification>,
    on_close: Option<CloseCallback>,
}

impl ReturnOrderForm {
    /// Form for `order`, dated with the order's date.
    pub fn new(api: DairyApi, order: SelectedOrder) -> Self {
        Self {
            store: LineItemStore::with_currency(api.currency()),
            return_date: Some(order.date),
            api,
            order,
            catalog: CatalogState::new(),
            delivery_status: DeliveryStatus::default(),
            payment_status: PaymentStatus::default(),
            txn_token: String::new(),
            flow: SubmissionFlow::new(),
            notification: None,
            on_close: None,
        }
    }

    pub fn with_on_close(mut self, on_close: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn order(&self) -> &SelectedOrder {
        &self.order
    }

    pub fn store(&self) -> &LineItemStore {
        &self.store
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn entry_type(&self) -> EntryType {
        self.catalog.entry_type()
    }

    pub fn delivery_status(&self) -> DeliveryStatus {
        self.delivery_status
    }

    pub fn set_delivery_status(&mut self, status: DeliveryStatus) {
        self.delivery_status = status;
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    pub fn set_return_date(&mut self, date: Option<NaiveDate>) {
        self.return_date = date;
    }

    /// Wallet transaction token, empty until one is obtained.
    pub fn txn_token(&self) -> &str {
        &self.txn_token
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    pub fn is_dialog_open(&self) -> bool {
        self.flow.is_dialog_open()
    }

    /// The pending notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Dismiss and return the pending notification.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Switch the picker to `entry_type` and start a fresh fetch.
    ///
    /// Returns `None` when there is no session or user to fetch for.
    pub fn select_entry_type(&mut self, entry_type: EntryType) -> Option<CatalogRequest> {
        self.catalog
            .begin(&self.api, &self.order.user_id, entry_type)
    }

    /// Apply a finished fetch. Returns `false` for a superseded response.
    pub fn apply_catalog(&mut self, response: CatalogResponse) -> bool {
        match self.catalog.apply(response) {
            CatalogUpdate::Stale => false,
            CatalogUpdate::Loaded(_) => true,
            CatalogUpdate::Failed(notification) => {
                self.notification = Some(notification);
                true
            }
        }
    }

    /// Select `entry_type` and wait for its catalog.
    pub async fn load_catalog(&mut self, entry_type: EntryType) -> bool {
        match self.select_entry_type(entry_type) {
            Some(request) => {
                let response = request.run().await;
                self.apply_catalog(response)
            }
            None => false,
        }
    }

    /// Add an option under the current entry type.
    ///
    /// Returns `false` while a catalog fetch is in flight.
    pub fn add_option(&mut self, option: &ProductOption) -> bool {
        if self.picker_locked() {
            return false;
        }
        self.store.add(option, self.catalog.entry_type());
        true
    }

    /// Add a loaded option by id under the current entry type.
    ///
    /// Returns `false` while a catalog fetch is in flight or when the id is
    /// not in the loaded catalog.
    pub fn add_product(&mut self, product_id: &ProductId) -> bool {
        if self.picker_locked() {
            return false;
        }
        let entry_type = self.catalog.entry_type();
        match self.catalog.find(product_id.as_str()) {
            Some(option) => {
                self.store.add(option, entry_type);
                true
            }
            None => {
                tracing::warn!(product_id = %product_id, "product not in loaded catalog");
                false
            }
        }
    }

    fn picker_locked(&self) -> bool {
        if self.catalog.is_loading() {
            tracing::warn!(entry_type = %self.catalog.entry_type(), "product picker disabled while loading");
            return true;
        }
        false
    }

    /// Set a line's quantity. Non-positive quantities are ignored.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        entry_type: EntryType,
        quantity: i64,
    ) -> bool {
        self.store.update_quantity(product_id, entry_type, quantity)
    }

    pub fn increment(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        self.store.increment(product_id, entry_type)
    }

    pub fn decrement(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        self.store.decrement(product_id, entry_type)
    }

    pub fn remove_item(&mut self, product_id: &ProductId, entry_type: EntryType) -> bool {
        self.store.remove(product_id, entry_type)
    }

    pub fn pricing(&self) -> Result<OrderPricing, CommerceError> {
        self.store.pricing()
    }

    /// Fetch the wallet transaction token.
    ///
    /// On failure the token stays empty and an error notification is raised;
    /// submission is never blocked by this.
    pub async fn initialize_transaction(&mut self) {
        if !self.api.is_authenticated() {
            return;
        }
        let wallet_id = WalletId::for_user(&self.order.user_id);
        match self.api.initiate_transaction(&wallet_id).await {
            Ok(token) => {
                tracing::debug!(wallet_id = %wallet_id, has_token = !token.is_empty(), "wallet transaction initiated");
                self.txn_token = token;
            }
            Err(e) => {
                tracing::error!(wallet_id = %wallet_id, error = %e, "initiating transaction failed");
                self.txn_token.clear();
                self.notification = Some(Notification::error(e.user_message(SUBMIT_FAILED_FALLBACK)));
            }
        }
    }

    /// Open the confirmation recap.
    ///
    /// Returns `false` with no notification when the cart is empty, the
    /// return date is missing or a review is already open.
    pub fn submit(&mut self) -> bool {
        match self.flow.request_review(&self.store, self.return_date) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "submit rejected");
                false
            }
        }
    }

    /// Recap for the open confirmation dialog.
    pub fn review(&self) -> Option<ReviewSummary> {
        if !self.flow.is_dialog_open() {
            return None;
        }
        let date = self.return_date?;
        ReviewSummary::build(
            &self.order,
            date,
            &self.store,
            self.delivery_status,
            self.payment_status,
        )
        .ok()
    }

    /// Close the recap and keep editing.
    pub fn cancel_review(&mut self) -> bool {
        self.flow.cancel().is_ok()
    }

    /// Confirm the recap and post the order.
    ///
    /// Returns whether the backend accepted it. On success the cart is
    /// cleared, the dialog closes and the close callback runs; the form is
    /// then done. On failure the cart is kept and the dialog stays open for
    /// a retry.
    pub async fn confirm(&mut self) -> bool {
        if let Err(e) = self.flow.confirm() {
            tracing::warn!(error = %e, "confirm rejected");
            return false;
        }

        let result = match ReturnOrder::from_store(
            self.order.user_id.clone(),
            self.order.id.clone(),
            &self.store,
            self.payment_status,
            self.delivery_status,
            Some(self.txn_token.as_str()),
        ) {
            Ok(payload) => self.api.add_return_order(&payload).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(_) => {
                self.store.clear();
                log_transition(self.flow.succeed());
                self.notification = Some(Notification::success(SUBMIT_SUCCEEDED));
                if let Some(on_close) = &self.on_close {
                    on_close();
                }
                true
            }
            Err(e) => {
                tracing::error!(onward_order_id = %self.order.id, error = %e, "submitting return order failed");
                let message = e.user_message(SUBMIT_FAILED_FALLBACK);
                log_transition(self.flow.fail(message.clone()));
                self.notification = Some(Notification::error(message));
                false
            }
        }
    }
}

fn log_transition(transition: Result<SubmissionState, CommerceError>) {
    if let Err(e) = transition {
        tracing::warn!(error = %e, "unexpected submission transition");
    }
}

impl fmt::Debug for ReturnOrderForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnOrderForm")
            .field("order", &self.order.id)
            .field("items", &self.store.len())
            .field("entry_type", &self.catalog.entry_type())
            .field("state", &self.flow.state())
            .finish()
    }
}

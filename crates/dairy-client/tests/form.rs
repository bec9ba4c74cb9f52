use dairy_client::{AuthContext, DairyApi, ReturnOrderForm};
use dairy_commerce::notification::{FETCH_FAILED_FALLBACK, SUBMIT_FAILED_FALLBACK, SUBMIT_SUCCEEDED};
use dairy_commerce::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADD_ORDER: &str = "/api/v1/order/admin/return/addOrder";

fn api(server: &MockServer) -> DairyApi {
    DairyApi::with_base_url(format!("{}/api", server.uri()))
        .with_auth(AuthContext::from_token("session-token").unwrap())
}

fn selected_order() -> SelectedOrder {
    SelectedOrder::new(OrderId::new("onward-1"), UserId::new("42"))
        .unwrap()
        .with_human_readable_id("ORD-0001")
        .with_distributor("Sharma Dairy")
}

async fn mount_rate_card(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/product/getRatesWithPhoto/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "product_id": "p1", "product_name": "Light Dahi", "per_item_rate": 100, "gst_rate": 5 },
                { "product_id": "p2", "product_name": "Paneer", "per_item_rate": 50, "gst_rate": 0 }
            ]
        })))
        .mount(server)
        .await;
}

/// Form with two return lines: p1 x2 and p2 x1.
async fn filled_form(server: &MockServer) -> ReturnOrderForm {
    mount_rate_card(server).await;
    let mut form = ReturnOrderForm::new(api(server), selected_order());
    assert!(form.load_catalog(EntryType::Return).await);
    assert!(form.add_product(&ProductId::new("p1")));
    assert!(form.add_product(&ProductId::new("p1")));
    assert!(form.add_product(&ProductId::new("p2")));
    form
}

#[tokio::test]
async fn test_loaded_items_price_correctly() {
    let server = MockServer::start().await;
    let form = filled_form(&server).await;

    assert_eq!(form.store().len(), 2);
    let pricing = form.pricing().unwrap();
    assert_eq!(pricing.subtotal.amount_minor, 25000);
    assert_eq!(pricing.tax_total.amount_minor, 1000);
    assert_eq!(pricing.total.amount_minor, 26000);
}

#[tokio::test]
async fn test_successful_submission_clears_cart_and_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .and(body_partial_json(json!({
            "user_id": "42",
            "onward_order_id": "onward-1",
            "payment_status": "pending",
            "order_status": "delivered",
            "token": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let closed = Arc::new(AtomicUsize::new(0));
    let counter = closed.clone();
    let mut form = filled_form(&server)
        .await
        .with_on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert!(form.submit());
    assert!(form.is_dialog_open());
    let review = form.review().unwrap();
    assert_eq!(review.order_id, "ORD-0001");
    assert_eq!(review.lines.len(), 2);

    assert!(form.confirm().await);
    assert!(form.store().is_empty());
    assert!(!form.is_dialog_open());
    assert_eq!(form.state(), SubmissionState::Success);
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    let notification = form.take_notification().unwrap();
    assert!(!notification.is_error());
    assert_eq!(notification.description, SUBMIT_SUCCEEDED);
}

#[tokio::test]
async fn test_rejected_submission_keeps_cart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Return already recorded"
        })))
        .mount(&server)
        .await;

    let closed = Arc::new(AtomicUsize::new(0));
    let counter = closed.clone();
    let mut form = filled_form(&server)
        .await
        .with_on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert!(form.submit());
    assert!(!form.confirm().await);

    assert_eq!(form.store().len(), 2);
    assert_eq!(form.state(), SubmissionState::Failed);
    assert!(form.is_dialog_open());
    assert_eq!(closed.load(Ordering::SeqCst), 0);
    let notification = form.notification().unwrap();
    assert!(notification.is_error());
    assert_eq!(notification.description, "Return already recorded");
}

#[tokio::test]
async fn test_server_error_uses_fallback_then_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let mut form = filled_form(&server).await;
    assert!(form.submit());
    assert!(!form.confirm().await);
    assert_eq!(
        form.take_notification().unwrap().description,
        SUBMIT_FAILED_FALLBACK
    );

    assert!(form.confirm().await);
    assert_eq!(form.flow().attempts(), 2);
    assert!(form.store().is_empty());
}

#[tokio::test]
async fn test_empty_cart_never_opens_review() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = ReturnOrderForm::new(api(&server), selected_order());
    assert!(!form.submit());
    assert!(!form.is_dialog_open());
    assert!(form.review().is_none());
    assert!(form.notification().is_none());
    assert!(!form.confirm().await);
}

#[tokio::test]
async fn test_missing_return_date_blocks_submit() {
    let server = MockServer::start().await;
    let mut form = filled_form(&server).await;
    form.set_return_date(None);
    assert!(!form.submit());
    assert_eq!(form.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_cancel_review_keeps_cart() {
    let server = MockServer::start().await;
    let mut form = filled_form(&server).await;
    assert!(form.submit());
    assert!(form.cancel_review());
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.store().len(), 2);
}

#[tokio::test]
async fn test_wallet_token_attached_to_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/wallet/initiateTransaction/42::user::txn"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": "txn-77" } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .and(body_partial_json(json!({ "token": "txn-77" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = filled_form(&server).await;
    form.initialize_transaction().await;
    assert_eq!(form.txn_token(), "txn-77");
    assert!(form.notification().is_none());

    assert!(form.submit());
    assert!(form.confirm().await);
}

#[tokio::test]
async fn test_wallet_failure_leaves_empty_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/wallet/initiateTransaction/42::user::txn"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Wallet not found" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ADD_ORDER))
        .and(body_partial_json(json!({ "token": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = filled_form(&server).await;
    form.initialize_transaction().await;
    assert_eq!(form.txn_token(), "");
    assert_eq!(
        form.take_notification().unwrap().description,
        "Wallet not found"
    );

    assert!(form.submit());
    assert!(form.confirm().await);
}

#[tokio::test]
async fn test_cash_branch_failure_empties_options() {
    let server = MockServer::start().await;
    mount_rate_card(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/byCategory/Coin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "ID": "c1", "Name": "Coin", "Rate": 10 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/byCategory/Note"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut form = ReturnOrderForm::new(api(&server), selected_order());
    assert!(form.load_catalog(EntryType::Return).await);
    assert_eq!(form.catalog().options().len(), 2);

    assert!(form.load_catalog(EntryType::Cash).await);
    assert!(form.catalog().options().is_empty());
    assert!(!form.catalog().is_loading());
    let notification = form.take_notification().unwrap();
    assert!(notification.is_error());
    assert_eq!(notification.description, FETCH_FAILED_FALLBACK);
}

#[tokio::test]
async fn test_stale_catalog_response_discarded() {
    let server = MockServer::start().await;
    mount_rate_card(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/byCategory/Crate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "ID": "k1", "Name": "Crate", "Rate": 0 }]
        })))
        .mount(&server)
        .await;

    let mut form = ReturnOrderForm::new(api(&server), selected_order());
    let first = form.select_entry_type(EntryType::Return).unwrap();
    let second = form.select_entry_type(EntryType::Crate).unwrap();

    let latest = second.run().await;
    let stale = first.run().await;

    assert!(form.apply_catalog(latest));
    assert!(!form.apply_catalog(stale));

    let ids: Vec<&str> = form.catalog().options().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["k1"]);
    assert_eq!(form.entry_type(), EntryType::Crate);
}

#[tokio::test]
async fn test_picker_disabled_while_catalog_loading() {
    let server = MockServer::start().await;
    mount_rate_card(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/byCategory/Crate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "ID": "k1", "Name": "Crate", "Rate": 0 }]
        })))
        .mount(&server)
        .await;

    let mut form = ReturnOrderForm::new(api(&server), selected_order());
    assert!(form.load_catalog(EntryType::Return).await);
    let leftover = form.catalog().find("p1").cloned().unwrap();

    let pending = form.select_entry_type(EntryType::Crate).unwrap();
    assert!(form.catalog().is_loading());
    assert!(!form.add_product(&ProductId::new("p1")));
    assert!(!form.add_option(&leftover));
    assert!(form.store().is_empty());

    assert!(form.apply_catalog(pending.run().await));
    assert!(!form.catalog().is_loading());
    assert!(form.add_product(&ProductId::new("k1")));
    assert!(form.store().get(&ProductId::new("k1"), EntryType::Crate).is_some());
    assert!(form.store().get(&ProductId::new("p1"), EntryType::Crate).is_none());
}

#[tokio::test]
async fn test_same_product_under_two_entry_types() {
    let server = MockServer::start().await;
    mount_rate_card(&server).await;

    let mut form = ReturnOrderForm::new(api(&server), selected_order());
    assert!(form.load_catalog(EntryType::Return).await);
    assert!(form.add_product(&ProductId::new("p1")));
    assert!(form.load_catalog(EntryType::Missing).await);
    assert!(form.add_product(&ProductId::new("p1")));

    assert_eq!(form.store().len(), 2);
    assert!(!form.update_quantity(&ProductId::new("p1"), EntryType::Missing, 0));
    assert_eq!(
        form.store()
            .get(&ProductId::new("p1"), EntryType::Missing)
            .unwrap()
            .quantity,
        1
    );
}

#[tokio::test]
async fn test_no_session_fetches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = DairyApi::with_base_url(format!("{}/api", server.uri()));
    let mut form = ReturnOrderForm::new(api, selected_order());
    assert!(!form.load_catalog(EntryType::Cash).await);
    form.initialize_transaction().await;
    assert!(form.notification().is_none());
    assert_eq!(form.entry_type(), EntryType::Cash);
}

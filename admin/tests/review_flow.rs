//! Store-driven review flows against the scripted admin gateway.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use rifa_admin::mocks::{StubAdmin, sample_purchase};
use rifa_admin::{AdminEnvironment, ReviewAction, ReviewReducer, ReviewState};
use rifa_api::PurchaseStatus;
use rifa_runtime::Store;

type ReviewStore =
    Store<ReviewState, ReviewAction, AdminEnvironment<StubAdmin>, ReviewReducer<StubAdmin>>;

fn store_with(gateway: StubAdmin) -> ReviewStore {
    Store::new(
        ReviewState::default(),
        ReviewReducer::new(),
        AdminEnvironment::new(gateway),
    )
}

async fn send_and_settle(store: &ReviewStore, action: ReviewAction) {
    let mut handle = store.send(action).await.expect("store accepts actions");
    handle.wait().await;
}

#[tokio::test]
async fn load_fills_the_table() {
    let gateway = StubAdmin::with_purchases(vec![
        sample_purchase(1, PurchaseStatus::Pending),
        sample_purchase(2, PurchaseStatus::Verified),
    ]);
    let store = store_with(gateway);

    send_and_settle(&store, ReviewAction::Load).await;

    let (rows, total, loading) = store
        .state(|s| (s.purchases.len(), s.total, s.loading))
        .await;
    assert_eq!(rows, 2);
    assert_eq!(total, 2);
    assert!(!loading);
}

#[tokio::test]
async fn failed_status_edit_rolls_back_and_surfaces() {
    let gateway = StubAdmin::with_purchases(vec![sample_purchase(1, PurchaseStatus::Pending)]);
    gateway.fail_mutations(true);
    let store = store_with(gateway.clone());

    send_and_settle(&store, ReviewAction::Load).await;
    send_and_settle(
        &store,
        ReviewAction::EditStatus {
            id: 1,
            status: PurchaseStatus::Verified,
        },
    )
    .await;

    let (status, error, pending) = store
        .state(|s| {
            (
                s.purchases[0].status,
                s.error.clone(),
                s.pending_edits.len(),
            )
        })
        .await;
    assert_eq!(status, PurchaseStatus::Pending);
    assert!(error.is_some());
    assert_eq!(pending, 0);
    assert_eq!(gateway.status_calls(), 1);
}

#[tokio::test]
async fn confirmed_status_edit_refetches_the_page() {
    let gateway = StubAdmin::with_purchases(vec![sample_purchase(1, PurchaseStatus::Pending)]);
    let store = store_with(gateway.clone());

    send_and_settle(&store, ReviewAction::Load).await;
    assert_eq!(gateway.list_calls(), 1);

    send_and_settle(
        &store,
        ReviewAction::EditStatus {
            id: 1,
            status: PurchaseStatus::Verified,
        },
    )
    .await;

    // Optimistic edit confirmed, then the page was invalidated and reloaded.
    let status = store.state(|s| s.purchases[0].status).await;
    assert_eq!(status, PurchaseStatus::Verified);
    assert_eq!(gateway.list_calls(), 2);
    assert!(store.state(|s| s.error.is_none()).await);
}

#[tokio::test]
async fn lost_session_requests_a_redirect_instead_of_an_inline_error() {
    let gateway = StubAdmin::default();
    gateway.expire_session(true);
    let store = store_with(gateway);

    send_and_settle(&store, ReviewAction::Load).await;

    let (redirect, error) = store.state(|s| (s.redirect_to_landing, s.error.clone())).await;
    assert!(redirect);
    assert!(error.is_none());
}

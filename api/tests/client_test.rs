//! HTTP-level tests for the REST client, against a local mock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect

use rifa_api::{
    ApiClient, ApiError, PaymentMethod, Prices, ProofImage, PurchaseFilter, PurchaseStatus,
    SubmitPurchaseRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).expect("client should build")
}

fn sample_submission() -> SubmitPurchaseRequest {
    SubmitPurchaseRequest {
        quantity: 3,
        monto_bs: "300.00".to_string(),
        monto_usd: "30.00".to_string(),
        payment_method: PaymentMethod::PagoMovil,
        transaction_digits: "123456".to_string(),
        selected_numbers: vec!["7".to_string(), "1234".to_string()],
        payment_screenshot: ProofImage {
            file_name: "pago.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        },
    }
}

#[tokio::test]
async fn check_tickets_returns_taken_subset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .and(query_param("numbers", "7,1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tickets": ["7"] })))
        .mount(&server)
        .await;

    let taken = client_for(&server)
        .check_tickets(&["7".to_string(), "1234".to_string()])
        .await
        .unwrap();

    assert_eq!(taken, vec!["7".to_string()]);
}

#[tokio::test]
async fn sold_percentage_reads_vendidos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tickets/percentage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "vendidos": 62.5 })))
        .mount(&server)
        .await;

    let sold = client_for(&server).sold_percentage().await.unwrap();
    assert!((sold - 62.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn submit_purchase_posts_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/purchases"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .submit_purchase(sample_submission())
        .await
        .unwrap();
}

#[tokio::test]
async fn submit_purchase_failure_carries_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/purchases"))
        .respond_with(ResponseTemplate::new(422).set_body_string("numeros no disponibles"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .submit_purchase(sample_submission())
        .await
        .unwrap_err();

    match error {
        ApiError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "numeros no disponibles");
        },
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_purchases_reads_total_count_header() {
    let server = MockServer::start().await;

    let row = json!({
        "id": 1,
        "user": { "id": 9, "name": "Ana", "email": "ana@example.com", "phone": "04141112233" },
        "quantity": 4,
        "montoBs": 400.0,
        "montoUsd": 40.0,
        "paymentMethod": "pago movil",
        "transactionDigits": "654321",
        "paymentScreenshot": "aGVsbG8=",
        "status": "pending",
        "date": "2026-08-01T12:00:00Z"
    });

    Mock::given(method("GET"))
        .and(path("/api/purchases"))
        .and(query_param("status", "pending"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "37")
                .set_body_json(json!([row])),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_purchases(PurchaseFilter::Status(PurchaseStatus::Pending), 2, 10)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 37);
    assert_eq!(page.page_count(10), 4);
    assert_eq!(page.items[0].status, PurchaseStatus::Pending);
}

#[tokio::test]
async fn list_purchases_maps_401_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/purchases"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_purchases(PurchaseFilter::All, 1, 10)
        .await
        .unwrap_err();

    assert!(error.is_unauthorized());
}

#[tokio::test]
async fn update_purchase_status_patches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/purchases"))
        .and(query_param("id", "15"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update_purchase_status(15, PurchaseStatus::Verified)
        .await
        .unwrap();
}

#[tokio::test]
async fn search_by_number_returns_none_on_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/purchases/search"))
        .and(query_param("number", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let result = client_for(&server).search_by_number("42").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn search_by_number_parses_ownership() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/purchases/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 3, "name": "Luis", "email": "luis@example.com", "phone": "04160001122" },
            "tickets": ["42", "43"]
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search_by_number("42")
        .await
        .unwrap()
        .expect("owner expected");

    assert_eq!(result.user.name, "Luis");
    assert_eq!(result.tickets.len(), 2);
}

#[tokio::test]
async fn prices_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/prices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "montoBs": 350.0, "montoUsd": 1.0 })),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/prices"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client.prices().await.unwrap();
    assert!((prices.monto_bs - 350.0).abs() < f64::EPSILON);

    client
        .update_prices(Prices {
            monto_bs: 400.0,
            monto_usd: 1.2,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn current_user_maps_401_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let error = client_for(&server).current_user().await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized));
}

#[tokio::test]
async fn user_ticket_count_reads_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/purchases/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "quantity": 12 })))
        .mount(&server)
        .await;

    let count = client_for(&server).user_ticket_count().await.unwrap();
    assert_eq!(count, 12);
}

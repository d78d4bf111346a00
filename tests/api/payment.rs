use std::str::FromStr;

use bigdecimal::BigDecimal;
use dinestay_client::errors::GenericError;
use dinestay_client::flows::payment::{utils::launch_payment, PaymentLaunch};
use dinestay_client::payment_client::{PaymentMethod, PaymentTarget};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{error_body, spawn_backend, success_body};

#[tokio::test]
async fn authorization_url_triggers_a_gateway_redirect() {
    let app = spawn_backend().await;
    let booking_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/payments/initialize"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "userId": app.identity.id,
            "amount": "30000",
            "method": "card",
            "customerEmail": "ada.guest@example.com",
            "roomBookingId": booking_id,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "authorizationUrl": "https://gateway.example.com/pay/abc123",
            "accessCode": "abc123",
            "reference": "ref-42",
            "paymentId": Uuid::new_v4(),
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let launch = launch_payment(
        &app.context.payment_client,
        &app.identity,
        PaymentTarget::RoomBooking(booking_id),
        BigDecimal::from_str("30000").unwrap(),
        PaymentMethod::Card,
    )
    .await
    .expect("initialization should succeed");

    assert_eq!(
        launch,
        PaymentLaunch::Redirect("https://gateway.example.com/pay/abc123".to_string())
    );

    // Exactly one target field goes on the wire.
    let requests = app.mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("orderId").is_none());
    assert!(body.get("reservationId").is_none());
}

#[tokio::test]
async fn missing_authorization_url_means_already_complete() {
    let app = spawn_backend().await;

    Mock::given(method("POST"))
        .and(path("/payments/initialize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "accessCode": "abc123",
            "reference": "ref-43",
            "paymentId": Uuid::new_v4(),
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let launch = launch_payment(
        &app.context.payment_client,
        &app.identity,
        PaymentTarget::Order(Uuid::new_v4()),
        BigDecimal::from_str("1500").unwrap(),
        PaymentMethod::Wallet,
    )
    .await
    .expect("initialization should succeed");

    assert_eq!(launch, PaymentLaunch::Completed);
}

#[tokio::test]
async fn zero_amount_is_rejected_before_any_request() {
    let app = spawn_backend().await;

    Mock::given(method("POST"))
        .and(path("/payments/initialize"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let err = launch_payment(
        &app.context.payment_client,
        &app.identity,
        PaymentTarget::Reservation(Uuid::new_v4()),
        BigDecimal::from(0),
        PaymentMethod::Card,
    )
    .await
    .expect_err("zero amount must fail");

    assert!(matches!(err, GenericError::ValidationError(_)));
}

#[tokio::test]
async fn gateway_rejection_surfaces_its_message() {
    let app = spawn_backend().await;

    Mock::given(method("POST"))
        .and(path("/payments/initialize"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(error_body("Unsupported payment method", "400")),
        )
        .mount(&app.mock_server)
        .await;

    let err = launch_payment(
        &app.context.payment_client,
        &app.identity,
        PaymentTarget::RoomBooking(Uuid::new_v4()),
        BigDecimal::from_str("500").unwrap(),
        PaymentMethod::Cash,
    )
    .await
    .expect_err("rejection must surface");

    match err {
        GenericError::ValidationError(message) => {
            assert_eq!(message, "Unsupported payment method");
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

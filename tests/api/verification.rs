use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dinestay_client::flows::payment::verification::{
    schedule_redirect, VerificationFlow, VerificationRecovery, VerificationState,
};
use dinestay_client::flows::payment::{CallbackQuery, Destination};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{error_body, spawn_backend, success_body};

fn callback(reference: &str) -> CallbackQuery {
    CallbackQuery {
        reference: Some(reference.to_string()),
        trxref: None,
    }
}

fn verification_body(status: &str) -> serde_json::Value {
    success_body(json!({
        "status": status,
        "paymentId": Uuid::new_v4(),
        "amount": "30000",
        "paidAt": "2025-06-01T12:00:00Z",
    }))
}

#[tokio::test]
async fn room_booking_payment_lands_on_room_booking_history() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("success")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "reference": "ref-42",
            "amount": "30000",
            "currency": "NGN",
            "status": "success",
            "metadata": "{\"paymentType\":\"room_booking\"}",
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-42"));
    let state = flow.run(&app.context.payment_client).await;

    assert_eq!(
        state,
        &VerificationState::Ready {
            destination: Destination::RoomBookingHistory
        }
    );

    // The view schedules its one-shot navigation once the flow is ready.
    let navigated = Arc::new(AtomicBool::new(false));
    let flag = navigated.clone();
    let _redirect = schedule_redirect(
        Destination::RoomBookingHistory,
        Duration::from_millis(50),
        move |destination| {
            assert_eq!(destination.as_path(), "/dashboard/room-bookings");
            flag.store(true, Ordering::SeqCst);
        },
    );
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(navigated.load(Ordering::SeqCst));
}

#[tokio::test]
async fn verification_runs_at_most_once_per_mount() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("success")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "reference": "ref-7",
            "amount": "30000",
            "currency": "NGN",
            "status": "success",
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-7"));
    let first = flow.run(&app.context.payment_client).await.clone();
    // A re-render re-drives the flow; no second verify call may happen.
    let second = flow.run(&app.context.payment_client).await.clone();

    assert_eq!(first, second);
    assert_eq!(
        first,
        VerificationState::Ready {
            destination: Destination::Dashboard
        }
    );
}

#[tokio::test]
async fn missing_reference_is_terminal_with_zero_network_calls() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&CallbackQuery::default());
    assert_eq!(flow.state(), &VerificationState::InvalidReference);
    let state = flow.run(&app.context.payment_client).await;
    assert_eq!(state, &VerificationState::InvalidReference);
    assert!(state.is_terminal());
}

#[tokio::test]
async fn trxref_alias_is_accepted() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("success")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "reference": "ref-9",
            "amount": "500",
            "currency": "NGN",
            "status": "success",
            "orderId": "ord-1",
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let query = CallbackQuery {
        reference: None,
        trxref: Some("ref-9".to_string()),
    };
    let mut flow = VerificationFlow::new(&query);
    let state = flow.run(&app.context.payment_client).await;
    assert_eq!(
        state,
        &VerificationState::Ready {
            destination: Destination::OrderHistory
        }
    );
}

#[tokio::test]
async fn failed_verification_is_terminal_with_manual_recoveries() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-13"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(error_body("Verification unavailable", "500")),
        )
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-13"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-13"));
    let state = flow.run(&app.context.payment_client).await;

    assert!(matches!(state, VerificationState::Failed { .. }));
    assert_eq!(
        state.recoveries(),
        &[
            VerificationRecovery::Reload,
            VerificationRecovery::BackToCheckout
        ]
    );
    // No automatic retry: a second drive stays in the failed state.
    let state = flow.run(&app.context.payment_client).await;
    assert!(matches!(state, VerificationState::Failed { .. }));
}

#[tokio::test]
async fn unsuccessful_payment_status_fails_without_fetching_details() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("failed")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-14"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-14"));
    let state = flow.run(&app.context.payment_client).await;
    assert!(matches!(state, VerificationState::Failed { .. }));
}

#[tokio::test]
async fn pending_payment_status_still_fetches_details() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("pending")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(json!({
            "reference": "ref-16",
            "amount": "30000",
            "currency": "NGN",
            "status": "pending",
            "reservation": { "id": "res-3" },
        }))))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-16"));
    let state = flow.run(&app.context.payment_client).await;
    assert_eq!(
        state,
        &VerificationState::Ready {
            destination: Destination::ReservationHistory
        }
    );
}

#[tokio::test]
async fn fetch_failure_after_verification_is_its_own_state() {
    let app = spawn_backend().await;

    Mock::given(method("GET"))
        .and(path("/payments/verify/ref-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(verification_body("success")))
        .expect(1)
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/reference/ref-15"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body("Payment not found", "404")))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let mut flow = VerificationFlow::new(&callback("ref-15"));
    let state = flow.run(&app.context.payment_client).await;
    assert!(matches!(state, VerificationState::FetchFailed { .. }));
    assert!(state.is_terminal());
}

/// End-to-end tests for the reservation form controller
/// Drives the form against a mocked endpoint and against the real router backed by mocked upstreams
use rust_pickup_api::config::Config;
use rust_pickup_api::handlers::{router, AppState};
use rust_pickup_api::models::{FieldName, ServiceType};
use rust_pickup_api::reservation_form::{
    FormError, FormState, HttpReservationClient, ReservationForm, TransportError,
    CONTACT_OPERATOR_MESSAGE,
};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reviewed_dropoff_form() -> ReservationForm {
    let mut form = ReservationForm::new();
    form.select_service(ServiceType::Dropoff).unwrap();
    form.update_field(FieldName::Name, "Jung").unwrap();
    form.update_field(FieldName::Contact, "jung_kakao").unwrap();
    // typed before switching service type; hidden now
    form.update_field(FieldName::PickupDate, "2025-03-01T08:00")
        .unwrap();
    form.update_field(FieldName::DropoffDate, "2025-03-07T21:15")
        .unwrap();
    form.update_field(FieldName::MeetingAddress, "Myeongdong Station Exit 6")
        .unwrap();
    form.request_review().unwrap();
    form
}

#[tokio::test]
async fn test_form_posts_normalized_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpReservationClient::new(&server.uri()).unwrap();
    let mut form = reviewed_dropoff_form();

    form.confirm(&client).await.unwrap();
    assert_eq!(form.state(), &FormState::Success);

    let requests = server.received_requests().await.unwrap();
    let payload: Value = requests[0].body_json().unwrap();
    assert_eq!(payload["serviceType"], "샌딩");
    assert_eq!(payload["dropoffDate"], "2025-03-07T21:15:00+08:00");
    assert_eq!(payload["pickupDate"], "");
    assert_eq!(payload["meetingAddress"], "Myeongdong Station Exit 6");
}

#[tokio::test]
async fn test_server_error_returns_form_to_editing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Failed to submit booking or send message" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = HttpReservationClient::new(&server.uri()).unwrap();
    let mut form = reviewed_dropoff_form();
    let draft = form.draft().clone();

    let err = form.confirm(&client).await.unwrap_err();
    assert_eq!(err, FormError::SubmissionFailed(TransportError::Status(500)));
    assert_eq!(form.notice(), Some(CONTACT_OPERATOR_MESSAGE));
    assert_eq!(form.draft(), &draft);

    // user retries without retyping anything
    form.request_review().unwrap();
    assert!(form.confirm(&client).await.is_err());
}

#[tokio::test]
async fn test_unreachable_server_is_recoverable() {
    // Nothing listens on the discard port.
    let client = HttpReservationClient::new("http://127.0.0.1:9").unwrap();
    let mut form = reviewed_dropoff_form();

    let err = form.confirm(&client).await.unwrap_err();
    assert!(matches!(
        err,
        FormError::SubmissionFailed(TransportError::Network(_))
    ));
    assert_eq!(form.notice(), Some(CONTACT_OPERATOR_MESSAGE));
}

#[tokio::test]
async fn test_custom_tour_end_to_end() {
    let notion = MockServer::start().await;
    let telegram = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "tour-page" })))
        .expect(1)
        .mount(&notion)
        .await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&telegram)
        .await;

    let config = Config {
        notion_api_key: Some("key".to_string()),
        notion_database_id: Some("db".to_string()),
        notion_base_url: notion.uri(),
        telegram_bot_token: Some("bot-token".to_string()),
        telegram_chat_id: Some("1".to_string()),
        telegram_base_url: telegram.uri(),
        ..Config::default()
    };
    let app = router(Arc::new(AppState::from_config(config).unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut form = ReservationForm::new();
    form.select_service(ServiceType::CustomTour).unwrap();
    form.update_field(FieldName::Contact, "tourist").unwrap();
    form.update_field(FieldName::FlightNumber, "OZ101").unwrap();
    form.update_field(FieldName::Note, "DMZ and Suwon fortress")
        .unwrap();
    assert_eq!(form.note_label(), "원하는 투어 정보");
    form.request_review().unwrap();

    let client = HttpReservationClient::new(&format!("http://{}", addr)).unwrap();
    form.confirm(&client).await.unwrap();
    assert_eq!(form.state(), &FormState::Success);

    let page: Value = notion.received_requests().await.unwrap()[0]
        .body_json()
        .unwrap();
    assert!(page["properties"].get("Pickup Date").is_none());
    assert!(page["properties"].get("Dropoff Date").is_none());
    // hidden for tours, so never sent
    assert_eq!(
        page["properties"]["Flight Number"]["rich_text"][0]["text"]["content"],
        ""
    );

    let message: Value = telegram.received_requests().await.unwrap()[0]
        .body_json()
        .unwrap();
    let text = message["text"].as_str().unwrap();
    assert!(text.starts_with("*맞춤 투어 예약 정보:"));
    assert!(text.contains("DMZ and Suwon fortress"));
    assert!(!text.contains("OZ101"));

    form.return_home().unwrap();
    assert_eq!(form.draft().note, "");
}

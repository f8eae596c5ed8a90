use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::{ReservationRequest, SubmitResponse};
use crate::notion_client::NotionClient;
use crate::submission::SubmissionService;
use crate::telegram_client::TelegramClient;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Path the reservation form posts to.
pub const SUBMIT_PATH: &str = "/api/submit";

/// Shared application state injected into handlers.
///
/// Immutable after startup; every submission owns its own payload.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Bookings database + operator notification pipeline.
    pub submissions: SubmissionService,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let notion = NotionClient::new(&config)?;
        let telegram = TelegramClient::new(&config)?;

        Ok(Self {
            config,
            submissions: SubmissionService::new(notion, telegram),
        })
    }
}

/// Builds the HTTP router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let api_routes = Router::new()
        .route(SUBMIT_PATH, any(submit_reservation))
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-pickup-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/submit
///
/// Accepts one reservation, writes it to the bookings database and notifies
/// the operator. Any method other than POST is rejected before the body is
/// looked at. A body over `max_body_bytes` is a bad payload and gets the
/// same generic failure as malformed JSON.
///
/// Required fields are not re-checked here; the form enforces them.
pub async fn submit_reservation(
    method: Method,
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = body
        .map_err(|e| AppError::BadPayload(e.body_text()))
        .context("reading reservation body")?;

    let request: ReservationRequest = serde_json::from_slice::<ReservationRequest>(&body)
        .map_err(AppError::from)
        .context("decoding reservation body")?;

    tracing::info!(
        "POST {} - service_type={}",
        SUBMIT_PATH,
        request.service_type
    );

    state.submissions.submit(&request).await?;

    Ok(Json(SubmitResponse { success: true }))
}

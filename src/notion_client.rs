use crate::config::Config;
use crate::errors::AppError;
use crate::models::ReservationRequest;
use serde_json::{json, Value};
use std::time::Duration;

/// Status given to every reservation created from the website.
pub const INITIAL_STATUS: &str = "New Request";

/// Client for the Notion bookings database.
///
/// Only ever creates pages; reservations are never read back or updated.
#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    database_id: Option<String>,
    notion_version: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Notion client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.notion_base_url.clone(),
            api_key: config.notion_api_key.clone(),
            database_id: config.notion_database_id.clone(),
            notion_version: config.notion_version.clone(),
        })
    }

    /// Creates one page for the reservation and returns the new page id.
    pub async fn create_reservation_page(
        &self,
        request: &ReservationRequest,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured("NOTION_API_KEY is not set".to_string()))?;
        let database_id = self
            .database_id
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured("NOTION_DATABASE_ID is not set".to_string()))?;

        let url = format!("{}/v1/pages", self.base_url);
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": build_page_properties(request),
        });

        tracing::info!(
            "Creating Notion page for {} reservation",
            request.service_type
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Notion-Version", &self.notion_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Notion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Notion page creation failed {}: {}",
                status, error_text
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse Notion response: {}", e))
        })?;

        let page_id = data
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::info!("✓ Notion page created: {}", page_id);
        Ok(page_id)
    }
}

/// Property map for a reservation page in the bookings database.
///
/// Date properties are only written when a value is present; an empty date
/// would be rejected by Notion.
pub fn build_page_properties(request: &ReservationRequest) -> Value {
    let mut properties = serde_json::Map::new();

    properties.insert(
        "Name".to_string(),
        json!({ "title": [{ "text": { "content": request.name } }] }),
    );
    properties.insert("Contact".to_string(), rich_text(&request.contact));
    properties.insert(
        "Service Type".to_string(),
        json!({ "select": { "name": request.service_type.as_str() } }),
    );

    if !request.pickup_date.trim().is_empty() {
        properties.insert(
            "Pickup Date".to_string(),
            json!({ "date": { "start": request.pickup_date } }),
        );
    }
    if !request.dropoff_date.trim().is_empty() {
        properties.insert(
            "Dropoff Date".to_string(),
            json!({ "date": { "start": request.dropoff_date } }),
        );
    }

    properties.insert("Flight Number".to_string(), rich_text(&request.flight_number));
    properties.insert(
        "Meeting Address".to_string(),
        rich_text(&request.meeting_address),
    );
    properties.insert("Note".to_string(), rich_text(&request.note));
    properties.insert(
        "Status".to_string(),
        json!({ "status": { "name": INITIAL_STATUS } }),
    );

    Value::Object(properties)
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

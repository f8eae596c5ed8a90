use crate::errors::{AppError, ResultExt};
use crate::models::ReservationRequest;
use crate::notification::compose_message;
use crate::notion_client::NotionClient;
use crate::telegram_client::TelegramClient;
use uuid::Uuid;

/// Result of a fully successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub page_id: String,
}

/// Persists a reservation, then notifies the operator.
///
/// The two calls are sequential and not atomic: if the notification fails
/// after the page was created, the page stays and the whole submission is
/// reported as failed. No retries.
#[derive(Clone)]
pub struct SubmissionService {
    notion: NotionClient,
    telegram: TelegramClient,
}

impl SubmissionService {
    pub fn new(notion: NotionClient, telegram: TelegramClient) -> Self {
        Self { notion, telegram }
    }

    pub async fn submit(&self, request: &ReservationRequest) -> Result<SubmissionReceipt, AppError> {
        let submission_id = Uuid::new_v4();
        tracing::info!(
            "Submission {}: {} reservation for contact '{}'",
            submission_id,
            request.service_type,
            request.contact
        );

        // Step 1: bookings database
        let page_id = self
            .notion
            .create_reservation_page(request)
            .await
            .with_context(|| format!("submission {}: persisting reservation", submission_id))?;

        // Step 2: operator notification
        let message = compose_message(request);
        if let Err(e) = self.telegram.send_message(&message).await {
            tracing::error!(
                "Submission {}: reservation persisted as Notion page {} but operator notification failed; reconcile manually",
                submission_id,
                page_id
            );
            return Err::<SubmissionReceipt, _>(e).with_context(|| {
                format!(
                    "submission {}: notifying operator (page {} already created)",
                    submission_id, page_id
                )
            });
        }

        tracing::info!(
            "Submission {} complete: page {} created and operator notified",
            submission_id,
            page_id
        );

        Ok(SubmissionReceipt {
            submission_id,
            page_id,
        })
    }
}

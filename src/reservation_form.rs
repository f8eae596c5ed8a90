//! Reservation form controller.
//!
//! Holds the visitor's draft and walks it through
//! `Editing -> Reviewing -> Submitting -> Success`, falling back to
//! `Editing` with an inline notice when the submission fails. The draft is
//! never lost on failure, so the visitor can simply confirm again.

use crate::field_policy::{self, review_label};
use crate::handlers::SUBMIT_PATH;
use crate::models::{FieldName, ReservationRequest, ServiceType};
use crate::timestamps::{self, TimestampError};
use async_trait::async_trait;
use chrono::TimeZone;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Inline notice shown after a failed submission.
pub const CONTACT_OPERATOR_MESSAGE: &str =
    "예약 처리 중 오류가 발생했습니다. 카카오톡으로 직접 문의해주세요.";

/// Message shown once the reservation went through.
pub const SUCCESS_MESSAGE: &str =
    "예약이 성공적으로 완료되었습니다. 카카오톡으로 빠른 연락을 드리겠습니다!";

/// Placeholder for a blank meeting address in the review summary.
pub const NOT_PROVIDED: &str = "미입력";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing { notice: Option<String> },
    Reviewing,
    Submitting,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Server answered with a non-2xx status.
    Status(u16),
    /// Request never got an answer.
    Network(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status(code) => write!(f, "server answered {}", code),
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    NotEditing,
    NotReviewing,
    AlreadySubmitting,
    NotSubmitted,
    MissingRequiredFields(Vec<FieldName>),
    UnknownServiceType(String),
    InvalidDate {
        field: FieldName,
        source: TimestampError,
    },
    SubmissionFailed(TransportError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::NotEditing => write!(f, "form is not editable right now"),
            FormError::NotReviewing => write!(f, "reservation has not been reviewed"),
            FormError::AlreadySubmitting => write!(f, "reservation is already being submitted"),
            FormError::NotSubmitted => write!(f, "reservation has not been completed"),
            FormError::MissingRequiredFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.wire_name()).collect();
                write!(f, "missing required fields: {}", names.join(", "))
            }
            FormError::UnknownServiceType(value) => write!(f, "unknown service type '{}'", value),
            FormError::InvalidDate { field, source } => write!(f, "{}: {}", field, source),
            FormError::SubmissionFailed(e) => write!(f, "submission failed: {}", e),
        }
    }
}

impl std::error::Error for FormError {}

/// One read-only line of the confirmation summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub field: FieldName,
    pub label: &'static str,
    pub value: String,
}

/// Sends a finished reservation to the submission endpoint.
#[async_trait]
pub trait ReservationTransport: Send + Sync {
    async fn submit(&self, payload: &ReservationRequest) -> Result<(), TransportError>;
}

/// Posts reservations as JSON to `{base_url}/api/submit`.
#[derive(Clone)]
pub struct HttpReservationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReservationClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReservationTransport for HttpReservationClient {
    async fn submit(&self, payload: &ReservationRequest) -> Result<(), TransportError> {
        tracing::info!("Submitting reservation to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

/// Draft plus the explicit state of the review/confirm flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    draft: ReservationRequest,
    state: FormState,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationForm {
    pub fn new() -> Self {
        Self {
            draft: ReservationRequest::default(),
            state: FormState::Editing { notice: None },
        }
    }

    pub fn draft(&self) -> &ReservationRequest {
        &self.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn service_type(&self) -> ServiceType {
        self.draft.service_type
    }

    /// Inline error shown above the form, if any.
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            FormState::Editing { notice } => notice.as_deref(),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        (self.state == FormState::Success).then_some(SUCCESS_MESSAGE)
    }

    pub fn visible_fields(&self) -> BTreeSet<FieldName> {
        field_policy::visible_fields(self.draft.service_type)
    }

    pub fn required_fields(&self) -> BTreeSet<FieldName> {
        field_policy::required_fields(self.draft.service_type)
    }

    pub fn note_label(&self) -> &'static str {
        field_policy::note_label(self.draft.service_type)
    }

    /// Sets exactly one field. Only allowed while editing.
    pub fn update_field(&mut self, field: FieldName, value: &str) -> Result<(), FormError> {
        self.ensure_editing()?;

        match self.draft.text_slot(field) {
            Some(slot) => *slot = value.to_string(),
            None => {
                self.draft.service_type = value
                    .parse()
                    .map_err(|_| FormError::UnknownServiceType(value.to_string()))?;
            }
        }

        Ok(())
    }

    pub fn select_service(&mut self, service_type: ServiceType) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.service_type = service_type;
        Ok(())
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required_fields(&self) -> Vec<FieldName> {
        let service_type = self.draft.service_type;
        FieldName::ALL
            .into_iter()
            .filter(|field| field_policy::is_required(*field, service_type))
            .filter(|field| self.draft.value(*field).is_empty())
            .collect()
    }

    /// Moves to the confirmation view when every required field is filled
    /// and every visible date parses.
    pub fn request_review(&mut self) -> Result<(), FormError> {
        self.ensure_editing()?;

        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingRequiredFields(missing));
        }

        for field in [FieldName::PickupDate, FieldName::DropoffDate] {
            if field_policy::is_visible(field, self.draft.service_type) {
                timestamps::to_utc8(self.draft.value(field))
                    .map_err(|source| FormError::InvalidDate { field, source })?;
            }
        }

        self.state = FormState::Reviewing;
        Ok(())
    }

    /// Read-only summary of the fields relevant to the chosen service type.
    ///
    /// Only available on the confirmation view (and while its submission is
    /// in flight).
    pub fn review_summary(&self) -> Result<Vec<SummaryLine>, FormError> {
        if !matches!(self.state, FormState::Reviewing | FormState::Submitting) {
            return Err(FormError::NotReviewing);
        }
        let service_type = self.draft.service_type;

        let lines = self
            .visible_fields()
            .into_iter()
            .map(|field| {
                let value = match field {
                    FieldName::ServiceType => service_type.display_name().to_string(),
                    FieldName::MeetingAddress if self.draft.meeting_address.trim().is_empty() => {
                        NOT_PROVIDED.to_string()
                    }
                    other => self.draft.value(other).to_string(),
                };
                SummaryLine {
                    field,
                    label: review_label(field, service_type),
                    value,
                }
            })
            .collect();
        Ok(lines)
    }

    /// Leaves the confirmation view; the draft is untouched.
    pub fn cancel_review(&mut self) -> Result<(), FormError> {
        if self.state != FormState::Reviewing {
            return Err(FormError::NotReviewing);
        }
        self.state = FormState::Editing { notice: None };
        Ok(())
    }

    /// Payload to send, read on the machine's local clock.
    pub fn outgoing_payload(&self) -> Result<ReservationRequest, FormError> {
        self.outgoing_payload_in(&chrono::Local)
    }

    /// Payload to send: hidden fields blanked, dates normalized to UTC+8.
    pub fn outgoing_payload_in<Tz: TimeZone>(
        &self,
        local: &Tz,
    ) -> Result<ReservationRequest, FormError> {
        let service_type = self.draft.service_type;
        let mut payload = self.draft.clone();

        for field in FieldName::ALL {
            if field_policy::is_visible(field, service_type) {
                continue;
            }
            if let Some(slot) = payload.text_slot(field) {
                slot.clear();
            }
        }

        for field in [FieldName::PickupDate, FieldName::DropoffDate] {
            if let Some(slot) = payload.text_slot(field) {
                let normalized = timestamps::to_utc8_in(slot.as_str(), local)
                    .map_err(|source| FormError::InvalidDate { field, source })?;
                *slot = normalized;
            }
        }

        Ok(payload)
    }

    /// Reviewing -> Submitting. Returns the payload to send.
    ///
    /// A second call before [`Self::complete_submission`] is refused.
    pub fn begin_submission(&mut self) -> Result<ReservationRequest, FormError> {
        match self.state {
            FormState::Reviewing => {}
            FormState::Submitting => return Err(FormError::AlreadySubmitting),
            _ => return Err(FormError::NotReviewing),
        }

        let payload = self.outgoing_payload()?;
        self.state = FormState::Submitting;
        Ok(payload)
    }

    /// Submitting -> Success, or back to Editing with the contact notice.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), TransportError>,
    ) -> Result<(), FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::NotSubmitted);
        }

        match outcome {
            Ok(()) => {
                self.state = FormState::Success;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Reservation submission failed: {}", e);
                self.state = FormState::Editing {
                    notice: Some(CONTACT_OPERATOR_MESSAGE.to_string()),
                };
                Err(FormError::SubmissionFailed(e))
            }
        }
    }

    /// Confirms the reviewed reservation and sends it once.
    pub async fn confirm<T>(&mut self, transport: &T) -> Result<(), FormError>
    where
        T: ReservationTransport + ?Sized,
    {
        let payload = self.begin_submission()?;
        let outcome = transport.submit(&payload).await;
        self.complete_submission(outcome)
    }

    /// Leaves the success screen; the draft is discarded.
    pub fn return_home(&mut self) -> Result<(), FormError> {
        if self.state != FormState::Success {
            return Err(FormError::NotSubmitted);
        }
        *self = Self::new();
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Editing { .. } => Ok(()),
            _ => Err(FormError::NotEditing),
        }
    }
}

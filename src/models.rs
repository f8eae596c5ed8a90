use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of requested transport. Drives which form fields are relevant.
///
/// Wire values are the Korean option values posted by the reservation form
/// and used as select options in the bookings database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "픽업")]
    Pickup,
    #[serde(rename = "샌딩")]
    Dropoff,
    #[serde(rename = "픽업&샌딩")]
    PickupAndDropoff,
    #[serde(rename = "맞춤 투어")]
    CustomTour,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Pickup,
        ServiceType::Dropoff,
        ServiceType::PickupAndDropoff,
        ServiceType::CustomTour,
    ];

    /// Value sent over the wire and stored in the bookings database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Pickup => "픽업",
            ServiceType::Dropoff => "샌딩",
            ServiceType::PickupAndDropoff => "픽업&샌딩",
            ServiceType::CustomTour => "맞춤 투어",
        }
    }

    /// Label shown in the service type select box.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::Pickup => "공항 픽업 서비스",
            ServiceType::Dropoff => "공항 샌딩 서비스",
            ServiceType::PickupAndDropoff => "픽업 & 샌딩 서비스",
            ServiceType::CustomTour => "맞춤 투어",
        }
    }

    pub fn has_pickup_leg(&self) -> bool {
        matches!(self, ServiceType::Pickup | ServiceType::PickupAndDropoff)
    }

    pub fn has_dropoff_leg(&self) -> bool {
        matches!(self, ServiceType::Dropoff | ServiceType::PickupAndDropoff)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("unknown service type '{}'", s))
    }
}

/// Fields of the reservation form, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Name,
    Contact,
    ServiceType,
    PickupDate,
    DropoffDate,
    MeetingAddress,
    FlightNumber,
    Note,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        FieldName::Name,
        FieldName::Contact,
        FieldName::ServiceType,
        FieldName::PickupDate,
        FieldName::DropoffDate,
        FieldName::MeetingAddress,
        FieldName::FlightNumber,
        FieldName::Note,
    ];

    /// JSON key / form input name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Contact => "contact",
            FieldName::ServiceType => "serviceType",
            FieldName::PickupDate => "pickupDate",
            FieldName::DropoffDate => "dropoffDate",
            FieldName::MeetingAddress => "meetingAddress",
            FieldName::FlightNumber => "flightNumber",
            FieldName::Note => "note",
        }
    }

    /// Form label. The note label depends on the service type, see
    /// [`crate::field_policy::note_label`].
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Name => "이름",
            FieldName::Contact => "카카오톡 ID",
            FieldName::ServiceType => "서비스 유형",
            FieldName::PickupDate => "픽업 날짜",
            FieldName::DropoffDate => "샌딩 날짜",
            FieldName::MeetingAddress => "미팅 장소",
            FieldName::FlightNumber => "항공편 번호",
            FieldName::Note => "추가 요청사항",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.wire_name() == s)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Reservation payload shared by the form controller and the submission endpoint.
///
/// Every text field is a plain string; an empty string means "not provided".
/// Date fields carry absolute RFC 3339 timestamps once the form has normalized them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationRequest {
    pub name: String,
    pub contact: String,
    pub service_type: ServiceType,
    pub pickup_date: String,
    pub dropoff_date: String,
    pub flight_number: String,
    pub meeting_address: String,
    pub note: String,
}

impl ReservationRequest {
    /// Current value of a text field. `ServiceType` yields its wire value.
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Contact => &self.contact,
            FieldName::ServiceType => self.service_type.as_str(),
            FieldName::PickupDate => &self.pickup_date,
            FieldName::DropoffDate => &self.dropoff_date,
            FieldName::MeetingAddress => &self.meeting_address,
            FieldName::FlightNumber => &self.flight_number,
            FieldName::Note => &self.note,
        }
    }

    /// Mutable slot for a text field; `None` for the service type select.
    pub fn text_slot(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::Name => Some(&mut self.name),
            FieldName::Contact => Some(&mut self.contact),
            FieldName::ServiceType => None,
            FieldName::PickupDate => Some(&mut self.pickup_date),
            FieldName::DropoffDate => Some(&mut self.dropoff_date),
            FieldName::MeetingAddress => Some(&mut self.meeting_address),
            FieldName::FlightNumber => Some(&mut self.flight_number),
            FieldName::Note => Some(&mut self.note),
        }
    }
}

/// Body returned by the submission endpoint on success.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

//! Which reservation fields are shown and required for each service type.
//!
//! Both the form rendering and the review/validation step read from here, so
//! a field can never be required while it is hidden.

use crate::models::{FieldName, ServiceType};
use std::collections::BTreeSet;

/// Label for the free-text note. Custom tours reuse it for the tour wish list.
pub fn note_label(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::CustomTour => "원하는 투어 정보",
        _ => "추가 요청사항",
    }
}

/// Label for a field under the given service type.
pub fn field_label(field: FieldName, service_type: ServiceType) -> &'static str {
    match field {
        FieldName::Note => note_label(service_type),
        other => other.label(),
    }
}

/// Label for a field on the confirmation view. The meeting point only exists
/// for the dropoff leg, so the summary spells that out.
pub fn review_label(field: FieldName, service_type: ServiceType) -> &'static str {
    match field {
        FieldName::MeetingAddress => "샌딩 미팅 장소",
        other => field_label(other, service_type),
    }
}

/// Fields rendered for the service type, in form order.
pub fn visible_fields(service_type: ServiceType) -> BTreeSet<FieldName> {
    let mut fields = BTreeSet::from([
        FieldName::Name,
        FieldName::Contact,
        FieldName::ServiceType,
        FieldName::Note,
    ]);

    if service_type == ServiceType::CustomTour {
        return fields;
    }

    if service_type.has_pickup_leg() {
        fields.insert(FieldName::PickupDate);
    }
    if service_type.has_dropoff_leg() {
        fields.insert(FieldName::DropoffDate);
        fields.insert(FieldName::MeetingAddress);
    }
    fields.insert(FieldName::FlightNumber);

    fields
}

/// Fields that must be non-empty before the form can move to review.
pub fn required_fields(service_type: ServiceType) -> BTreeSet<FieldName> {
    let mut fields = BTreeSet::from([FieldName::Contact, FieldName::ServiceType]);

    if service_type.has_pickup_leg() {
        fields.insert(FieldName::PickupDate);
    }
    if service_type.has_dropoff_leg() {
        fields.insert(FieldName::DropoffDate);
        fields.insert(FieldName::MeetingAddress);
    }

    fields
}

pub fn is_visible(field: FieldName, service_type: ServiceType) -> bool {
    visible_fields(service_type).contains(&field)
}

pub fn is_required(field: FieldName, service_type: ServiceType) -> bool {
    required_fields(service_type).contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use FieldName::*;
    use crate::models::ServiceType;

    fn conditional(fields: BTreeSet<FieldName>) -> BTreeSet<FieldName> {
        fields
            .into_iter()
            .filter(|f| matches!(f, PickupDate | DropoffDate | MeetingAddress | FlightNumber))
            .collect()
    }

    #[test]
    fn test_pickup_policy() {
        let t = ServiceType::Pickup;
        assert_eq!(
            conditional(visible_fields(t)),
            BTreeSet::from([PickupDate, FlightNumber])
        );
        assert_eq!(conditional(required_fields(t)), BTreeSet::from([PickupDate]));
    }

    #[test]
    fn test_dropoff_policy() {
        let t = ServiceType::Dropoff;
        assert_eq!(
            conditional(visible_fields(t)),
            BTreeSet::from([DropoffDate, MeetingAddress, FlightNumber])
        );
        assert_eq!(
            conditional(required_fields(t)),
            BTreeSet::from([DropoffDate, MeetingAddress])
        );
    }

    #[test]
    fn test_pickup_and_dropoff_policy() {
        let t = ServiceType::PickupAndDropoff;
        assert_eq!(
            conditional(visible_fields(t)),
            BTreeSet::from([PickupDate, DropoffDate, MeetingAddress, FlightNumber])
        );
        assert_eq!(
            conditional(required_fields(t)),
            BTreeSet::from([PickupDate, DropoffDate, MeetingAddress])
        );
    }

    #[test]
    fn test_custom_tour_policy() {
        let t = ServiceType::CustomTour;
        assert!(conditional(visible_fields(t)).is_empty());
        assert!(conditional(required_fields(t)).is_empty());
        assert_eq!(note_label(t), "원하는 투어 정보");
        assert_eq!(field_label(Note, t), "원하는 투어 정보");
    }

    #[test]
    fn test_common_fields() {
        for t in ServiceType::ALL {
            assert!(is_required(Contact, t));
            assert!(!is_required(Name, t));
            assert!(!is_required(Note, t));
            assert!(is_visible(Name, t));
            assert!(is_visible(Note, t));
        }
        assert_eq!(note_label(ServiceType::Pickup), "추가 요청사항");
    }

    #[test]
    fn test_review_labels() {
        let t = ServiceType::PickupAndDropoff;
        assert_eq!(field_label(MeetingAddress, t), "미팅 장소");
        assert_eq!(review_label(MeetingAddress, t), "샌딩 미팅 장소");
        assert_eq!(review_label(PickupDate, t), "픽업 날짜");
        assert_eq!(review_label(Note, ServiceType::CustomTour), "원하는 투어 정보");
    }
}

use crate::models::ReservationRequest;
use crate::timestamps::display_utc8;

/// Builds the operator notification for a reservation.
///
/// The first line names the service type; each following line is emitted
/// only when its value is non-empty, so absent fields leave no blank lines.
pub fn compose_message(request: &ReservationRequest) -> String {
    let pickup = display_utc8(&request.pickup_date);
    let dropoff = display_utc8(&request.dropoff_date);

    let lines = [
        Some(format!("*{} 예약 정보:", request.service_type)),
        labeled("👤 이름", &request.name),
        labeled("📞 카카오 ID", &request.contact),
        pickup.map(|when| format!("📅 픽업 날짜: {}", when)),
        dropoff.map(|when| format!("📅 샌딩 날짜: {}", when)),
        labeled("🛫 항공편 번호", &request.flight_number),
        labeled("📍 미팅 장소", &request.meeting_address),
        labeled("📝 추가 요청사항", &request.note),
    ];

    lines.into_iter().flatten().collect::<Vec<_>>().join("\n")
}

fn labeled(label: &str, value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| format!("{}: {}", label, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceType;

    #[test]
    fn test_absent_fields_produce_no_lines() {
        let request = ReservationRequest {
            name: "Lee".to_string(),
            contact: "lee_kakao".to_string(),
            service_type: ServiceType::PickupAndDropoff,
            pickup_date: "2025-03-01T02:00:00Z".to_string(),
            dropoff_date: "2025-03-05T18:30:00+08:00".to_string(),
            flight_number: String::new(),
            meeting_address: "Seoul Station".to_string(),
            note: String::new(),
        };

        let message = compose_message(&request);

        assert_eq!(
            message,
            "*픽업&샌딩 예약 정보:\n\
             👤 이름: Lee\n\
             📞 카카오 ID: lee_kakao\n\
             📅 픽업 날짜: 2025-03-01 10:00\n\
             📅 샌딩 날짜: 2025-03-05 18:30\n\
             📍 미팅 장소: Seoul Station"
        );
        assert!(!message.contains("항공편"));
        assert!(!message.contains("추가 요청사항"));
        assert!(!message.contains("\n\n"));
    }

    #[test]
    fn test_whitespace_only_values_are_suppressed() {
        let request = ReservationRequest {
            contact: "c".to_string(),
            flight_number: "   ".to_string(),
            ..Default::default()
        };

        let message = compose_message(&request);
        assert_eq!(message, "*픽업 예약 정보:\n📞 카카오 ID: c");
    }

    #[test]
    fn test_custom_tour_note_line() {
        let request = ReservationRequest {
            contact: "tour".to_string(),
            service_type: ServiceType::CustomTour,
            note: "Temple stay".to_string(),
            ..Default::default()
        };

        let message = compose_message(&request);
        assert!(message.starts_with("*맞춤 투어 예약 정보:"));
        assert!(message.ends_with("📝 추가 요청사항: Temple stay"));
    }
}

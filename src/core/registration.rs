use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::core::ticket::{generate_ticket_id, ticket_payload};
use crate::models::{Event, EventType, Registration, RegistrationStatus};

/// Reasons a normal-event registration is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Not a normal event")]
    NotNormalEvent,

    #[error("Registration deadline passed")]
    DeadlinePassed,

    #[error("Registration limit reached")]
    LimitReached,

    #[error("Already registered")]
    AlreadyRegistered,
}

/// Admit a participant to a normal event
///
/// `existing` holds the registrations already recorded for this event. On
/// success the event is form-locked and its recent-registration counter
/// grows, which feeds the trending view.
pub fn register_for_event(
    event: &mut Event,
    participant_id: Uuid,
    existing: &[Registration],
    answers: serde_json::Value,
    now: DateTime<Utc>,
) -> Result<Registration, RegistrationError> {
    if event.event_type != EventType::Normal {
        return Err(RegistrationError::NotNormalEvent);
    }

    if now > event.registration_deadline {
        return Err(RegistrationError::DeadlinePassed);
    }

    let active = existing.iter().filter(|r| r.status.is_active()).count();
    if event.registration_limit > 0 && active >= event.registration_limit as usize {
        return Err(RegistrationError::LimitReached);
    }

    if existing.iter().any(|r| r.participant_id == participant_id) {
        return Err(RegistrationError::AlreadyRegistered);
    }

    let ticket_id = generate_ticket_id();
    let qr_payload = ticket_payload(&ticket_id, &event.id, &participant_id);

    let registration = Registration {
        id: Uuid::new_v4(),
        event_id: event.id,
        participant_id,
        organizer_id: event.organizer_id,
        event_type: EventType::Normal,
        status: RegistrationStatus::Registered,
        dynamic_answers: answers,
        ticket_id: Some(ticket_id),
        qr_payload: Some(qr_payload),
        merch_selection: None,
        created_at: now,
    };

    event.form_locked = true;
    event.registrations_last_24h += 1;

    Ok(registration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use chrono::Duration;

    fn create_test_event(event_type: EventType, limit: u32) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            name: "Workshop".to_string(),
            description: "desc".to_string(),
            event_type,
            eligibility: "ALL".to_string(),
            registration_deadline: now + Duration::days(1),
            event_start_date: now + Duration::days(2),
            event_end_date: now + Duration::days(3),
            registration_limit: limit,
            registration_fee: 0.0,
            organizer_id: Uuid::new_v4(),
            tags: vec![],
            status: EventStatus::Published,
            custom_form: vec![],
            form_locked: false,
            merch_item_name: None,
            merch_variants: vec![],
            purchase_limit_per_participant: 1,
            merch_stock: 0,
            registrations_last_24h: 0,
            created_at: now,
        }
    }

    #[test]
    fn test_successful_registration_updates_event() {
        let mut event = create_test_event(EventType::Normal, 0);
        let participant = Uuid::new_v4();

        let registration = register_for_event(&mut event, participant, &[], serde_json::json!({}), Utc::now())
            .expect("registration should succeed");

        assert_eq!(registration.status, RegistrationStatus::Registered);
        assert_eq!(registration.organizer_id, event.organizer_id);
        assert!(registration.ticket_id.as_deref().unwrap_or("").starts_with("TKT-"));
        assert!(event.form_locked);
        assert_eq!(event.registrations_last_24h, 1);
    }

    #[test]
    fn test_rejects_merchandise() {
        let mut event = create_test_event(EventType::Merchandise, 0);
        let result = register_for_event(&mut event, Uuid::new_v4(), &[], serde_json::Value::Null, Utc::now());
        assert_eq!(result, Err(RegistrationError::NotNormalEvent));
    }

    #[test]
    fn test_rejects_after_deadline() {
        let mut event = create_test_event(EventType::Normal, 0);
        let late = event.registration_deadline + Duration::seconds(1);
        let result = register_for_event(&mut event, Uuid::new_v4(), &[], serde_json::Value::Null, late);
        assert_eq!(result, Err(RegistrationError::DeadlinePassed));
        assert_eq!(event.registrations_last_24h, 0);
    }

    #[test]
    fn test_limit_counts_only_active_registrations() {
        let mut event = create_test_event(EventType::Normal, 1);
        let first = register_for_event(&mut event, Uuid::new_v4(), &[], serde_json::Value::Null, Utc::now()).unwrap();

        let full = register_for_event(&mut event, Uuid::new_v4(), &[first.clone()], serde_json::Value::Null, Utc::now());
        assert_eq!(full, Err(RegistrationError::LimitReached));

        let mut cancelled = first;
        cancelled.status = RegistrationStatus::Cancelled;
        assert!(register_for_event(&mut event, Uuid::new_v4(), &[cancelled], serde_json::Value::Null, Utc::now()).is_ok());
    }

    #[test]
    fn test_rejects_duplicate() {
        let mut event = create_test_event(EventType::Normal, 0);
        let participant = Uuid::new_v4();
        let first = register_for_event(&mut event, participant, &[], serde_json::Value::Null, Utc::now()).unwrap();

        let again = register_for_event(&mut event, participant, &[first], serde_json::Value::Null, Utc::now());
        assert_eq!(again, Err(RegistrationError::AlreadyRegistered));
    }
}

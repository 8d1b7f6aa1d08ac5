use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::core::ticket::{generate_ticket_id, ticket_payload};
use crate::models::{
    Event, EventType, MerchDecision, MerchSelection, PurchaseRequest, Registration, RegistrationStatus,
};

/// Reasons a merchandise order or decision is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerchError {
    #[error("Not a merchandise event")]
    NotMerchEvent,

    #[error("Purchase limit exceeded")]
    PurchaseLimitExceeded,

    #[error("Already purchased/ordered")]
    AlreadyOrdered,

    #[error("Payment proof image is required")]
    MissingPaymentProof,

    #[error("Forbidden")]
    NotYourOrder,

    #[error("Order already decided")]
    AlreadyDecided,

    #[error("Out of stock")]
    OutOfStock,
}

/// Place a merchandise order awaiting organizer approval
///
/// Stock is not reserved here; it is checked and taken on approval.
pub fn place_merch_order(
    event: &Event,
    participant_id: Uuid,
    existing: &[Registration],
    request: PurchaseRequest,
    now: DateTime<Utc>,
) -> Result<Registration, MerchError> {
    if event.event_type != EventType::Merchandise {
        return Err(MerchError::NotMerchEvent);
    }

    if request.quantity > event.purchase_limit_per_participant {
        return Err(MerchError::PurchaseLimitExceeded);
    }

    if existing.iter().any(|r| r.participant_id == participant_id) {
        return Err(MerchError::AlreadyOrdered);
    }

    let proof_image_url = request
        .proof_image_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(MerchError::MissingPaymentProof)?;

    Ok(Registration {
        id: Uuid::new_v4(),
        event_id: event.id,
        participant_id,
        organizer_id: event.organizer_id,
        event_type: EventType::Merchandise,
        status: RegistrationStatus::PendingApproval,
        dynamic_answers: serde_json::Value::Null,
        ticket_id: None,
        qr_payload: None,
        merch_selection: Some(MerchSelection {
            size: request.size,
            color: request.color,
            quantity: request.quantity,
            proof_image_url,
        }),
        created_at: now,
    })
}

/// Approve or reject a pending order on behalf of `organizer_id`
///
/// Approval takes the ordered quantity from the event stock, issues a ticket
/// and counts towards the event's recent registrations. Nothing is modified
/// when an error is returned.
pub fn decide_merch_order(
    event: &mut Event,
    order: &mut Registration,
    organizer_id: &Uuid,
    decision: MerchDecision,
) -> Result<(), MerchError> {
    if &order.organizer_id != organizer_id {
        return Err(MerchError::NotYourOrder);
    }

    if order.status != RegistrationStatus::PendingApproval {
        return Err(MerchError::AlreadyDecided);
    }

    match decision {
        MerchDecision::Approve => {
            let quantity = order.merch_selection.as_ref().map_or(1, |s| s.quantity);
            if event.merch_stock < quantity {
                return Err(MerchError::OutOfStock);
            }

            event.merch_stock -= quantity;
            event.registrations_last_24h += 1;

            let ticket_id = generate_ticket_id();
            order.qr_payload = Some(ticket_payload(&ticket_id, &event.id, &order.participant_id));
            order.ticket_id = Some(ticket_id);
            order.status = RegistrationStatus::Successful;
        }
        MerchDecision::Reject => {
            order.status = RegistrationStatus::Rejected;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use chrono::Duration;

    fn create_merch_event(stock: u32, limit: u32) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            name: "Fest Hoodie".to_string(),
            description: "Official merch".to_string(),
            event_type: EventType::Merchandise,
            eligibility: "ALL".to_string(),
            registration_deadline: now + Duration::days(5),
            event_start_date: now,
            event_end_date: now + Duration::days(5),
            registration_limit: 0,
            registration_fee: 0.0,
            organizer_id: Uuid::new_v4(),
            tags: vec![],
            status: EventStatus::Ongoing,
            custom_form: vec![],
            form_locked: false,
            merch_item_name: Some("Hoodie".to_string()),
            merch_variants: vec![],
            purchase_limit_per_participant: limit,
            merch_stock: stock,
            registrations_last_24h: 0,
            created_at: now,
        }
    }

    fn purchase(quantity: u32) -> PurchaseRequest {
        PurchaseRequest {
            size: Some("M".to_string()),
            color: None,
            quantity,
            proof_image_url: Some("/uploads/proof.png".to_string()),
        }
    }

    #[test]
    fn test_order_starts_pending_without_ticket() {
        let event = create_merch_event(10, 2);
        let order = place_merch_order(&event, Uuid::new_v4(), &[], purchase(2), Utc::now()).unwrap();

        assert_eq!(order.status, RegistrationStatus::PendingApproval);
        assert!(order.ticket_id.is_none());
        assert_eq!(order.merch_selection.map(|s| s.quantity), Some(2));
    }

    #[test]
    fn test_order_rejections() {
        let event = create_merch_event(10, 1);
        let participant = Uuid::new_v4();

        assert_eq!(
            place_merch_order(&event, participant, &[], purchase(2), Utc::now()),
            Err(MerchError::PurchaseLimitExceeded)
        );

        let mut no_proof = purchase(1);
        no_proof.proof_image_url = Some("  ".to_string());
        assert_eq!(
            place_merch_order(&event, participant, &[], no_proof, Utc::now()),
            Err(MerchError::MissingPaymentProof)
        );

        let first = place_merch_order(&event, participant, &[], purchase(1), Utc::now()).unwrap();
        assert_eq!(
            place_merch_order(&event, participant, &[first], purchase(1), Utc::now()),
            Err(MerchError::AlreadyOrdered)
        );

        let mut normal = create_merch_event(10, 1);
        normal.event_type = EventType::Normal;
        assert_eq!(
            place_merch_order(&normal, participant, &[], purchase(1), Utc::now()),
            Err(MerchError::NotMerchEvent)
        );
    }

    #[test]
    fn test_approval_takes_stock_and_feeds_trending() {
        let mut event = create_merch_event(3, 2);
        let mut order = place_merch_order(&event, Uuid::new_v4(), &[], purchase(2), Utc::now()).unwrap();
        let organizer = event.organizer_id;

        decide_merch_order(&mut event, &mut order, &organizer, MerchDecision::Approve).unwrap();

        assert_eq!(order.status, RegistrationStatus::Successful);
        assert!(order.ticket_id.as_deref().unwrap_or("").starts_with("TKT-"));
        assert_eq!(event.merch_stock, 1);
        assert_eq!(event.registrations_last_24h, 1);

        assert_eq!(
            decide_merch_order(&mut event, &mut order, &organizer, MerchDecision::Reject),
            Err(MerchError::AlreadyDecided)
        );
    }

    #[test]
    fn test_out_of_stock_leaves_order_pending() {
        let mut event = create_merch_event(1, 2);
        let mut order = place_merch_order(&event, Uuid::new_v4(), &[], purchase(2), Utc::now()).unwrap();
        let organizer = event.organizer_id;

        let result = decide_merch_order(&mut event, &mut order, &organizer, MerchDecision::Approve);

        assert_eq!(result, Err(MerchError::OutOfStock));
        assert_eq!(order.status, RegistrationStatus::PendingApproval);
        assert_eq!(event.merch_stock, 1);
        assert_eq!(event.registrations_last_24h, 0);
    }

    #[test]
    fn test_reject_and_foreign_organizer() {
        let mut event = create_merch_event(5, 1);
        let mut order = place_merch_order(&event, Uuid::new_v4(), &[], purchase(1), Utc::now()).unwrap();

        assert_eq!(
            decide_merch_order(&mut event, &mut order, &Uuid::new_v4(), MerchDecision::Approve),
            Err(MerchError::NotYourOrder)
        );

        let organizer = event.organizer_id;
        decide_merch_order(&mut event, &mut order, &organizer, MerchDecision::Reject).unwrap();
        assert_eq!(order.status, RegistrationStatus::Rejected);
        assert_eq!(event.merch_stock, 5);
    }
}

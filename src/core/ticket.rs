use rand::Rng;
use uuid::Uuid;

/// Ticket alphabet without look-alike characters (no I, O, 0, 1)
const TICKET_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const TICKET_LENGTH: usize = 10;
pub const TICKET_PREFIX: &str = "TKT-";

/// Generate a ticket id such as `TKT-7KQ2MZP9AD`
pub fn generate_ticket_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TICKET_LENGTH)
        .map(|_| TICKET_ALPHABET[rng.gen_range(0..TICKET_ALPHABET.len())] as char)
        .collect();

    format!("{}{}", TICKET_PREFIX, suffix)
}

/// JSON payload encoded into the ticket QR code
pub fn ticket_payload(ticket_id: &str, event_id: &Uuid, participant_id: &Uuid) -> String {
    serde_json::json!({
        "ticketId": ticket_id,
        "eventId": event_id.to_string(),
        "participantId": participant_id.to_string(),
    })
    .to_string()
}

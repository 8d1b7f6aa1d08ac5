use thiserror::Error;
use uuid::Uuid;

use crate::models::{Event, EventStatus, EventUpdate};

/// Fields an organizer may still change once an event is published
pub const PUBLISHED_EDITABLE: [&str; 4] = [
    "description",
    "registrationDeadline",
    "registrationLimit",
    "status",
];

/// Reasons an edit is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    #[error("Not your event")]
    NotOwner,

    #[error("Cannot edit field {0} in published state")]
    PublishedField(String),

    #[error("Only status can be changed")]
    StatusOnly,

    #[error("Form is locked after first registration")]
    FormLocked,
}

/// Check whether `actor` may apply an update touching `keys` to `event`
///
/// `keys` are the raw body keys, so unknown fields count against the
/// published and ongoing allow-lists as well.
pub fn check_edit<'a, I>(event: &Event, actor: &Uuid, keys: I) -> Result<(), EditRejection>
where
    I: IntoIterator<Item = &'a str>,
{
    if &event.organizer_id != actor {
        return Err(EditRejection::NotOwner);
    }

    let keys: Vec<&str> = keys.into_iter().collect();

    match event.status {
        EventStatus::Draft | EventStatus::Closed => {}
        EventStatus::Published => {
            if let Some(key) = keys.iter().copied().find(|k| !PUBLISHED_EDITABLE.contains(k)) {
                return Err(EditRejection::PublishedField(key.to_string()));
            }
        }
        EventStatus::Ongoing | EventStatus::Completed => {
            if keys.iter().any(|k| *k != "status") {
                return Err(EditRejection::StatusOnly);
            }
        }
    }

    if event.form_locked && keys.contains(&"customForm") {
        return Err(EditRejection::FormLocked);
    }

    Ok(())
}

/// Apply the present fields of an update onto the event
pub fn apply_update(event: &mut Event, update: EventUpdate) {
    if let Some(name) = update.name {
        event.name = name;
    }
    if let Some(description) = update.description {
        event.description = description;
    }
    if let Some(eligibility) = update.eligibility {
        event.eligibility = eligibility;
    }
    if let Some(deadline) = update.registration_deadline {
        event.registration_deadline = deadline;
    }
    if let Some(start) = update.event_start_date {
        event.event_start_date = start;
    }
    if let Some(end) = update.event_end_date {
        event.event_end_date = end;
    }
    if let Some(limit) = update.registration_limit {
        event.registration_limit = limit;
    }
    if let Some(fee) = update.registration_fee {
        event.registration_fee = fee;
    }
    if let Some(tags) = update.tags {
        event.tags = tags;
    }
    if let Some(status) = update.status {
        event.status = status;
    }
    if let Some(form) = update.custom_form {
        event.custom_form = form;
    }
    if let Some(item) = update.merch_item_name {
        event.merch_item_name = Some(item);
    }
    if let Some(variants) = update.merch_variants {
        event.merch_variants = variants;
    }
    if let Some(limit) = update.purchase_limit_per_participant {
        event.purchase_limit_per_participant = limit;
    }
    if let Some(stock) = update.merch_stock {
        event.merch_stock = stock;
    }
}

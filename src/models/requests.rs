use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{EventStatus, EventType, FormField, MerchVariant, ParticipantType};

/// Query string of the browse endpoint
///
/// Every field is optional and kept as the raw string; parsing happens in the
/// handler so malformed values degrade to "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "eventType", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(rename = "fromDate", default)]
    pub from_date: Option<String>,
    #[serde(rename = "toDate", default)]
    pub to_date: Option<String>,
    #[serde(rename = "followedOnly", default)]
    pub followed_only: Option<String>,
    #[serde(rename = "participantId", default)]
    pub participant_id: Option<String>,
}

/// Request to create an event (always starts as a draft)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(rename = "registrationDeadline")]
    pub registration_deadline: DateTime<Utc>,
    #[serde(rename = "eventStartDate")]
    pub event_start_date: DateTime<Utc>,
    #[serde(rename = "eventEndDate")]
    pub event_end_date: DateTime<Utc>,
    #[serde(rename = "registrationLimit", default)]
    pub registration_limit: u32,
    #[serde(rename = "registrationFee", default)]
    pub registration_fee: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "customForm", default)]
    pub custom_form: Vec<FormField>,
    #[serde(rename = "merchItemName", default)]
    pub merch_item_name: Option<String>,
    #[serde(rename = "merchVariants", default)]
    pub merch_variants: Vec<MerchVariant>,
    #[serde(rename = "purchaseLimitPerParticipant", default)]
    pub purchase_limit_per_participant: Option<u32>,
    #[serde(rename = "merchStock", default)]
    pub merch_stock: u32,
}

/// Partial event update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(rename = "registrationDeadline", default)]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[serde(rename = "eventStartDate", default)]
    pub event_start_date: Option<DateTime<Utc>>,
    #[serde(rename = "eventEndDate", default)]
    pub event_end_date: Option<DateTime<Utc>>,
    #[serde(rename = "registrationLimit", default)]
    pub registration_limit: Option<u32>,
    #[serde(rename = "registrationFee", default)]
    pub registration_fee: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(rename = "customForm", default)]
    pub custom_form: Option<Vec<FormField>>,
    #[serde(rename = "merchItemName", default)]
    pub merch_item_name: Option<String>,
    #[serde(rename = "merchVariants", default)]
    pub merch_variants: Option<Vec<MerchVariant>>,
    #[serde(rename = "purchaseLimitPerParticipant", default)]
    pub purchase_limit_per_participant: Option<u32>,
    #[serde(rename = "merchStock", default)]
    pub merch_stock: Option<u32>,
}

/// Registration for a normal event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub answers: Option<serde_json::Value>,
}

/// Participant self-signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParticipantSignupRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1))]
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(rename = "participantType")]
    pub participant_type: ParticipantType,
    #[serde(rename = "collegeOrOrgName", default)]
    pub college_or_org_name: Option<String>,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: Option<String>,
}

/// Editable participant profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantProfileUpdate {
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: Option<String>,
    #[serde(rename = "collegeOrOrgName", default)]
    pub college_or_org_name: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(rename = "followedOrganizers", default)]
    pub followed_organizers: Option<Vec<Uuid>>,
}

/// Merchandise order; the payment proof is uploaded elsewhere and referenced by URL
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseRequest {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(rename = "proofImageUrl", default)]
    pub proof_image_url: Option<String>,
}

fn default_quantity() -> u32 { 1 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MerchDecision {
    Approve,
    Reject,
}

/// Organizer verdict on a pending merchandise order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchDecisionRequest {
    pub decision: MerchDecision,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Admin request to provision an organizer account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrganizerRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "organizerName")]
    pub organizer_name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizerAction {
    #[default]
    Disable,
    Archive,
    Delete,
}

/// Body of the organizer disable endpoint; an absent action disables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerActionRequest {
    #[serde(default)]
    pub action: OrganizerAction,
}

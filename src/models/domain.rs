use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Normal,
    Merchandise,
}

impl EventType {
    /// Wire name, used for equality filtering on raw query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Normal => "NORMAL",
            EventType::Merchandise => "MERCHANDISE",
        }
    }
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Ongoing,
    Completed,
    Closed,
}

impl EventStatus {
    /// Statuses shown to participants when browsing
    pub fn is_browsable(&self) -> bool {
        matches!(self, EventStatus::Published | EventStatus::Ongoing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    Text,
    Dropdown,
    Checkbox,
    File,
    Number,
}

/// Field of an organizer-defined registration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FormFieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchVariant {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

/// Event document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    #[serde(default = "default_eligibility")]
    pub eligibility: String,
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
    #[serde(rename = "organizerId")]
    pub organizer_id: Uuid,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(rename = "customForm", default)]
    pub custom_form: Vec<FormField>,
    #[serde(rename = "formLocked", default)]
    pub form_locked: bool,
    #[serde(rename = "merchItemName", default)]
    pub merch_item_name: Option<String>,
    #[serde(rename = "merchVariants", default)]
    pub merch_variants: Vec<MerchVariant>,
    #[serde(rename = "purchaseLimitPerParticipant", default = "default_purchase_limit")]
    pub purchase_limit_per_participant: u32,
    #[serde(rename = "merchStock", default)]
    pub merch_stock: u32,
    #[serde(rename = "registrationsLast24h", default)]
    pub registrations_last_24h: u32,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_eligibility() -> String { "ALL".to_string() }
fn default_purchase_limit() -> u32 { 1 }

/// Organizer fields joined onto events for display and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerSummary {
    pub id: Uuid,
    #[serde(rename = "organizerName")]
    pub organizer_name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Event joined with its organizer, the unit the ranking engine orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEvent {
    #[serde(flatten)]
    pub event: Event,
    #[serde(default)]
    pub organizer: Option<OrganizerSummary>,
}

impl CatalogEvent {
    /// Organizer display name, empty when the organizer is unknown
    pub fn organizer_name(&self) -> &str {
        self.organizer
            .as_ref()
            .map(|o| o.organizer_name.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantType {
    Iiit,
    NonIiit,
}

/// Participant account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "participantType")]
    pub participant_type: ParticipantType,
    #[serde(rename = "collegeOrOrgName", default)]
    pub college_or_org_name: Option<String>,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "followedOrganizers", default)]
    pub followed_organizers: Vec<Uuid>,
}

impl Participant {
    pub fn profile(&self) -> ParticipantProfile {
        ParticipantProfile {
            interests: self.interests.clone(),
            followed_organizers: self.followed_organizers.clone(),
        }
    }
}

/// The personalization subset of a participant used by ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "followedOrganizers", default)]
    pub followed_organizers: Vec<Uuid>,
}

/// Organizer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: Uuid,
    #[serde(rename = "organizerName")]
    pub organizer_name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: Option<String>,
    /// Generated sign-in address, set when an admin provisions the account
    #[serde(rename = "loginEmail", default)]
    pub login_email: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Organizer {
    pub fn summary(&self) -> OrganizerSummary {
        OrganizerSummary {
            id: self.id,
            organizer_name: self.organizer_name.clone(),
            category: Some(self.category.clone()),
        }
    }
}

/// Admin account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
    Rejected,
    PendingApproval,
    Successful,
}

impl RegistrationStatus {
    /// Whether the registration holds a seat against the event limit
    pub fn is_active(&self) -> bool {
        matches!(self, RegistrationStatus::Registered | RegistrationStatus::Successful)
    }
}

/// Registration of a participant for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    #[serde(rename = "participantId")]
    pub participant_id: Uuid,
    #[serde(rename = "organizerId")]
    pub organizer_id: Uuid,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    pub status: RegistrationStatus,
    #[serde(rename = "dynamicAnswers", default)]
    pub dynamic_answers: serde_json::Value,
    #[serde(rename = "ticketId", default)]
    pub ticket_id: Option<String>,
    #[serde(rename = "qrPayload", default)]
    pub qr_payload: Option<String>,
    #[serde(rename = "merchSelection", default, skip_serializing_if = "Option::is_none")]
    pub merch_selection: Option<MerchSelection>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Variant and quantity picked in a merchandise order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchSelection {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(rename = "proofImageUrl")]
    pub proof_image_url: String,
}

fn default_quantity() -> u32 { 1 }

/// Ranking weights for personalization signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub interest_tag: f64,
    pub followed_organizer: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            interest_tag: 2.0,
            followed_organizer: 3.0,
        }
    }
}

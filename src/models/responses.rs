use serde::{Deserialize, Serialize};
use crate::models::domain::{CatalogEvent, Event, Organizer, Participant, Registration, Role};
use uuid::Uuid;

/// Response for the browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    pub events: Vec<CatalogEvent>,
    pub trending: Vec<CatalogEvent>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEventResponse {
    pub event: CatalogEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub registration: Registration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationsResponse {
    pub registrations: Vec<Registration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Registration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerResponse {
    pub organizer: Organizer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizersResponse {
    pub organizers: Vec<Organizer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub user: Participant,
}

/// Profile of the authenticated account, shaped by its role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AccountView {
    Participant { user: Participant },
    Organizer { user: Organizer },
    Admin { id: Uuid },
}

impl AccountView {
    pub fn role(&self) -> Role {
        match self {
            AccountView::Participant { .. } => Role::Participant,
            AccountView::Organizer { .. } => Role::Organizer,
            AccountView::Admin { .. } => Role::Admin,
        }
    }
}

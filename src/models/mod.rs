// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Admin, CatalogEvent, Event, EventStatus, EventType, FormField, FormFieldKind, MerchSelection,
    MerchVariant, Organizer, OrganizerSummary, Participant, ParticipantProfile, ParticipantType,
    RankingWeights, Registration, RegistrationStatus, Role,
};
pub use requests::{
    BrowseQuery, CreateEventRequest, CreateOrganizerRequest, EventUpdate, MerchDecision,
    MerchDecisionRequest, OrganizerAction, OrganizerActionRequest, ParticipantProfileUpdate,
    ParticipantSignupRequest, PurchaseRequest, RegisterRequest,
};
pub use responses::{
    AccountView, BrowseResponse, CatalogEventResponse, ErrorResponse, EventResponse, EventsResponse,
    HealthResponse, MessageResponse, OrdersResponse, OrganizerResponse, OrganizersResponse,
    ParticipantResponse, RegistrationResponse, RegistrationsResponse,
};

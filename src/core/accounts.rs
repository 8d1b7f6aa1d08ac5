use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

use crate::models::{
    CreateOrganizerRequest, Organizer, Participant, ParticipantProfileUpdate, ParticipantSignupRequest,
    ParticipantType,
};

pub const DEFAULT_ALLOWED_DOMAINS: [&str; 3] = [
    "iiit.ac.in",
    "students.iiit.ac.in",
    "research.iiit.ac.in",
];

/// Reasons a participant signup is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("IIIT participants must use one of: {0}")]
    DomainNotAllowed(String),
}

/// Email domains accepted for institute participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPolicy {
    allowed_domains: BTreeSet<String>,
}

impl EmailPolicy {
    /// Build a policy; domains are trimmed, lower-cased and blanks dropped
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { allowed_domains }
    }

    /// Parse a comma separated domain list
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_allowed(&self, email: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|domain| email.ends_with(&format!("@{}", domain)))
    }

    /// Human readable list, e.g. `@iiit.ac.in, @research.iiit.ac.in`
    pub fn describe(&self) -> String {
        self.allowed_domains
            .iter()
            .map(|d| format!("@{}", d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DOMAINS)
    }
}

/// Lower-case and trim an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a signup and build the participant it describes
///
/// Uniqueness of the email is checked by the store.
pub fn prepare_signup(
    request: ParticipantSignupRequest,
    policy: &EmailPolicy,
) -> Result<Participant, SignupError> {
    if request.validate().is_err() {
        return Err(SignupError::MissingFields);
    }

    let email = normalize_email(&request.email);
    if !email.validate_email() {
        return Err(SignupError::InvalidEmail);
    }

    match request.participant_type {
        ParticipantType::Iiit if !policy.is_allowed(&email) => {
            return Err(SignupError::DomainNotAllowed(policy.describe()));
        }
        ParticipantType::Iiit | ParticipantType::NonIiit => {}
    }

    Ok(Participant {
        id: Uuid::new_v4(),
        email,
        first_name: request.first_name,
        last_name: request.last_name,
        participant_type: request.participant_type,
        college_or_org_name: request.college_or_org_name,
        contact_number: request.contact_number,
        interests: vec![],
        followed_organizers: vec![],
    })
}

const ORGANIZER_LOGIN_DOMAIN: &str = "felicity-organizer.local";
const LOGIN_SLUG_LENGTH: usize = 20;

/// Sign-in address for a provisioned organizer, e.g. `techsociety.1700000000000@felicity-organizer.local`
pub fn organizer_login_email(organizer_name: &str, now: DateTime<Utc>) -> String {
    let slug: String = organizer_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(LOGIN_SLUG_LENGTH)
        .collect();
    format!("{}.{}@{}", slug, now.timestamp_millis(), ORGANIZER_LOGIN_DOMAIN)
}

/// Build an organizer account from an admin request
///
/// The password for the login email is issued by the account service.
pub fn provision_organizer(request: CreateOrganizerRequest, now: DateTime<Utc>) -> Organizer {
    let organizer_name = request.organizer_name.trim().to_string();
    Organizer {
        id: Uuid::new_v4(),
        login_email: Some(organizer_login_email(&organizer_name, now)),
        organizer_name,
        category: request.category.trim().to_string(),
        description: request.description,
        contact_email: request.contact_email,
        disabled: false,
        archived: false,
    }
}

/// Apply the editable profile fields present in `update`
pub fn apply_profile_update(participant: &mut Participant, update: ParticipantProfileUpdate) {
    if let Some(first_name) = update.first_name {
        participant.first_name = first_name;
    }
    if let Some(last_name) = update.last_name {
        participant.last_name = last_name;
    }
    if let Some(contact) = update.contact_number {
        participant.contact_number = Some(contact);
    }
    if let Some(college) = update.college_or_org_name {
        participant.college_or_org_name = Some(college);
    }
    if let Some(interests) = update.interests {
        participant.interests = interests;
    }
    if let Some(followed) = update.followed_organizers {
        participant.followed_organizers = followed;
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::CatalogFilter;
use crate::models::{Admin, CatalogEvent, Event, EventType, Organizer, Participant, Registration, Role};

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    SeedFormat(#[from] serde_json::Error),

    #[error("Email already registered")]
    DuplicateEmail,
}

/// Initial documents loaded at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub organizers: Vec<Organizer>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

#[derive(Debug, Default)]
struct Documents {
    // insertion order is the catalog order
    events: Vec<Event>,
    admins: HashMap<Uuid, Admin>,
    organizers: HashMap<Uuid, Organizer>,
    participants: HashMap<Uuid, Participant>,
    registrations: Vec<Registration>,
}

impl Documents {
    fn join(&self, event: &Event) -> CatalogEvent {
        CatalogEvent {
            event: event.clone(),
            organizer: self.organizers.get(&event.organizer_id).map(Organizer::summary),
        }
    }
}

/// In-memory document store for events, accounts and registrations
///
/// Readers take a snapshot under the read lock and work on owned copies, so
/// ranking never holds the lock.
#[derive(Debug, Default)]
pub struct CatalogStore {
    documents: RwLock<Documents>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let documents = Documents {
            events: seed.events,
            admins: seed.admins.into_iter().map(|a| (a.id, a)).collect(),
            organizers: seed.organizers.into_iter().map(|o| (o.id, o)).collect(),
            participants: seed.participants.into_iter().map(|p| (p.id, p)).collect(),
            registrations: seed.registrations,
        };
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Load a JSON seed file
    pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let seed: Seed = serde_json::from_str(&raw)?;
        tracing::info!(
            "Loaded seed: {} events, {} organizers, {} participants",
            seed.events.len(),
            seed.organizers.len(),
            seed.participants.len()
        );
        Ok(Self::from_seed(seed))
    }

    /// Browsable events matching the filter, in catalog order
    pub async fn catalog(&self, filter: &CatalogFilter) -> Vec<CatalogEvent> {
        let documents = self.documents.read().await;
        documents
            .events
            .iter()
            .filter(|event| filter.matches(event))
            .map(|event| documents.join(event))
            .collect()
    }

    pub async fn catalog_event(&self, id: &Uuid) -> Option<CatalogEvent> {
        let documents = self.documents.read().await;
        documents
            .events
            .iter()
            .find(|event| &event.id == id)
            .map(|event| documents.join(event))
    }

    pub async fn event(&self, id: &Uuid) -> Option<Event> {
        let documents = self.documents.read().await;
        documents.events.iter().find(|event| &event.id == id).cloned()
    }

    pub async fn insert_event(&self, event: Event) {
        self.documents.write().await.events.push(event);
    }

    /// Events owned by an organizer, newest first
    pub async fn events_by_organizer(&self, organizer_id: &Uuid) -> Vec<Event> {
        let documents = self.documents.read().await;
        let mut events: Vec<Event> = documents
            .events
            .iter()
            .filter(|event| &event.organizer_id == organizer_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }

    /// Run `f` against a mutable event under the write lock
    ///
    /// Returns `None` when the event does not exist.
    pub async fn update_event<F, T>(&self, id: &Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Event) -> T,
    {
        let mut documents = self.documents.write().await;
        documents.events.iter_mut().find(|event| &event.id == id).map(f)
    }

    /// Admit a registration decided by `f` under a single write lock
    ///
    /// `f` receives the event and its existing registrations; an `Ok`
    /// registration is stored. Returns `None` when the event does not exist.
    pub async fn register<F, E>(&self, event_id: &Uuid, f: F) -> Option<Result<Registration, E>>
    where
        F: FnOnce(&mut Event, &[Registration]) -> Result<Registration, E>,
    {
        let mut documents = self.documents.write().await;
        let Documents { events, registrations, .. } = &mut *documents;

        let event = events.iter_mut().find(|event| &event.id == event_id)?;
        let existing: Vec<Registration> = registrations
            .iter()
            .filter(|r| &r.event_id == event_id)
            .cloned()
            .collect();

        let result = f(event, &existing);
        if let Ok(registration) = &result {
            registrations.push(registration.clone());
        }
        Some(result)
    }

    /// Registrations of a participant, newest first
    pub async fn registrations_for_participant(&self, participant_id: &Uuid) -> Vec<Registration> {
        let documents = self.documents.read().await;
        let mut registrations: Vec<Registration> = documents
            .registrations
            .iter()
            .filter(|r| &r.participant_id == participant_id)
            .cloned()
            .collect();
        registrations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        registrations
    }

    /// Whether a token subject names an existing, enabled account of `role`
    pub async fn is_active_account(&self, id: &Uuid, role: Role) -> bool {
        let documents = self.documents.read().await;
        match role {
            Role::Participant => documents.participants.contains_key(id),
            Role::Organizer => documents.organizers.get(id).is_some_and(|o| !o.disabled),
            Role::Admin => documents.admins.contains_key(id),
        }
    }

    /// Run `f` against an order and its event under a single write lock
    ///
    /// Returns `None` when the order or its event does not exist.
    pub async fn decide_order<F, T, E>(&self, registration_id: &Uuid, f: F) -> Option<Result<T, E>>
    where
        F: FnOnce(&mut Event, &mut Registration) -> Result<T, E>,
    {
        let mut documents = self.documents.write().await;
        let Documents { events, registrations, .. } = &mut *documents;

        let order = registrations.iter_mut().find(|r| &r.id == registration_id)?;
        let event = events.iter_mut().find(|event| event.id == order.event_id)?;
        Some(f(event, order))
    }

    /// Merchandise orders received by an organizer, newest first
    pub async fn merch_orders_for_organizer(&self, organizer_id: &Uuid) -> Vec<Registration> {
        let documents = self.documents.read().await;
        let mut orders: Vec<Registration> = documents
            .registrations
            .iter()
            .filter(|r| &r.organizer_id == organizer_id && r.event_type == EventType::Merchandise)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    pub async fn organizer(&self, id: &Uuid) -> Option<Organizer> {
        self.documents.read().await.organizers.get(id).cloned()
    }

    pub async fn insert_organizer(&self, organizer: Organizer) {
        self.documents
            .write()
            .await
            .organizers
            .insert(organizer.id, organizer);
    }

    /// Enabled organizers sorted by name
    pub async fn enabled_organizers(&self) -> Vec<Organizer> {
        let mut organizers = self.all_organizers().await;
        organizers.retain(|o| !o.disabled);
        organizers
    }

    /// Every organizer account, disabled ones included, sorted by name
    pub async fn all_organizers(&self) -> Vec<Organizer> {
        let documents = self.documents.read().await;
        let mut organizers: Vec<Organizer> = documents.organizers.values().cloned().collect();
        organizers.sort_by(|a, b| a.organizer_name.cmp(&b.organizer_name));
        organizers
    }

    pub async fn update_organizer<F, T>(&self, id: &Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Organizer) -> T,
    {
        self.documents.write().await.organizers.get_mut(id).map(f)
    }

    pub async fn remove_organizer(&self, id: &Uuid) -> Option<Organizer> {
        self.documents.write().await.organizers.remove(id)
    }

    pub async fn participant(&self, id: &Uuid) -> Option<Participant> {
        self.documents.read().await.participants.get(id).cloned()
    }

    /// Insert a participant, rejecting an email that is already taken
    pub async fn insert_participant(&self, participant: Participant) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.participants.values().any(|p| p.email == participant.email) {
            return Err(StoreError::DuplicateEmail);
        }
        documents.participants.insert(participant.id, participant);
        Ok(())
    }

    pub async fn update_participant<F, T>(&self, id: &Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut Participant) -> T,
    {
        self.documents.write().await.participants.get_mut(id).map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventStatus, EventType, ParticipantType};
    use chrono::{Duration, Utc};

    fn create_organizer(name: &str, disabled: bool) -> Organizer {
        Organizer {
            id: Uuid::new_v4(),
            organizer_name: name.to_string(),
            category: "Technical".to_string(),
            description: None,
            contact_email: None,
            login_email: None,
            disabled,
            archived: false,
        }
    }

    fn create_event(name: &str, organizer_id: Uuid, status: EventStatus) -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "desc".to_string(),
            event_type: EventType::Normal,
            eligibility: "ALL".to_string(),
            registration_deadline: now + Duration::days(1),
            event_start_date: now + Duration::days(2),
            event_end_date: now + Duration::days(3),
            registration_limit: 0,
            registration_fee: 0.0,
            organizer_id,
            tags: vec![],
            status,
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

    fn create_participant(email: &str) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            participant_type: ParticipantType::NonIiit,
            college_or_org_name: None,
            contact_number: None,
            interests: vec![],
            followed_organizers: vec![],
        }
    }

    #[tokio::test]
    async fn test_catalog_joins_organizer_and_keeps_order() {
        let organizer = create_organizer("Tech Society", false);
        let seed = Seed {
            events: vec![
                create_event("First", organizer.id, EventStatus::Published),
                create_event("Hidden", organizer.id, EventStatus::Draft),
                create_event("Second", organizer.id, EventStatus::Ongoing),
            ],
            organizers: vec![organizer.clone()],
            ..Default::default()
        };
        let store = CatalogStore::from_seed(seed);

        let catalog = store.catalog(&CatalogFilter::default()).await;

        let names: Vec<&str> = catalog.iter().map(|e| e.event.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(catalog[0].organizer_name(), "Tech Society");
    }

    #[tokio::test]
    async fn test_duplicate_participant_email() {
        let store = CatalogStore::new();
        store.insert_participant(create_participant("a@b.com")).await.unwrap();
        let again = store.insert_participant(create_participant("a@b.com")).await;
        assert!(matches!(again, Err(StoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_stores_only_successful_results() {
        let organizer = create_organizer("Org", false);
        let event = create_event("Workshop", organizer.id, EventStatus::Published);
        let event_id = event.id;
        let store = CatalogStore::from_seed(Seed {
            events: vec![event],
            ..Default::default()
        });
        let participant = Uuid::new_v4();

        let refused: Option<Result<Registration, &str>> = store.register(&event_id, |_, _| Err("no")).await;
        assert_eq!(refused, Some(Err("no")));
        assert!(store.registrations_for_participant(&participant).await.is_empty());

        let accepted = store
            .register(&event_id, |event, existing| {
                crate::core::register_for_event(event, participant, existing, serde_json::Value::Null, Utc::now())
            })
            .await;
        assert!(matches!(accepted, Some(Ok(_))));
        assert_eq!(store.registrations_for_participant(&participant).await.len(), 1);
        assert_eq!(store.event(&event_id).await.map(|e| e.registrations_last_24h), Some(1));

        let missing = store.register(&Uuid::new_v4(), |_, _| Err::<Registration, ()>(())).await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_active_account_lookup() {
        let enabled = create_organizer("Open", false);
        let disabled = create_organizer("Closed", true);
        let participant = create_participant("p@x.com");
        let admin = Admin { id: Uuid::new_v4(), email: "admin@x.com".to_string() };
        let store = CatalogStore::from_seed(Seed {
            admins: vec![admin.clone()],
            organizers: vec![enabled.clone(), disabled.clone()],
            participants: vec![participant.clone()],
            ..Default::default()
        });

        assert!(store.is_active_account(&enabled.id, Role::Organizer).await);
        assert!(!store.is_active_account(&disabled.id, Role::Organizer).await);
        assert!(store.is_active_account(&participant.id, Role::Participant).await);
        assert!(store.is_active_account(&admin.id, Role::Admin).await);
        // the role in the token must match the account kind
        assert!(!store.is_active_account(&participant.id, Role::Organizer).await);
        assert!(!store.is_active_account(&Uuid::new_v4(), Role::Participant).await);
    }

    #[tokio::test]
    async fn test_decide_order_missing() {
        let store = CatalogStore::new();
        let result = store
            .decide_order(&Uuid::new_v4(), |_, _| Ok::<(), ()>(()))
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_enabled_organizers_sorted() {
        let store = CatalogStore::new();
        store.insert_organizer(create_organizer("Zeta", false)).await;
        store.insert_organizer(create_organizer("Alpha", false)).await;
        store.insert_organizer(create_organizer("Gone", true)).await;

        let names: Vec<String> = store
            .enabled_organizers()
            .await
            .into_iter()
            .map(|o| o.organizer_name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(store.all_organizers().await.len(), 3);
    }
}

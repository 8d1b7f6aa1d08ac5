// Unit tests for the Felicity EMS discovery engine

use chrono::{Duration, Utc};
use felicity_ems::core::{
    composite_score, match_score, normalize, CatalogFilter, Personalization, Ranker, RankingQuery,
    TRENDING_SIZE,
};
use felicity_ems::models::{
    BrowseQuery, CatalogEvent, Event, EventStatus, EventType, OrganizerSummary, ParticipantProfile,
    RankingWeights,
};
use uuid::Uuid;

fn create_entry(name: &str, organizer: (Uuid, &str), tags: &[&str], recent: u32) -> CatalogEvent {
    let now = Utc::now();
    CatalogEvent {
        event: Event {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            event_type: EventType::Normal,
            eligibility: "ALL".to_string(),
            registration_deadline: now + Duration::days(1),
            event_start_date: now + Duration::days(2),
            event_end_date: now + Duration::days(3),
            registration_limit: 0,
            registration_fee: 0.0,
            organizer_id: organizer.0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: EventStatus::Published,
            custom_form: vec![],
            form_locked: false,
            merch_item_name: None,
            merch_variants: vec![],
            purchase_limit_per_participant: 1,
            merch_stock: 0,
            registrations_last_24h: recent,
            created_at: now,
        },
        organizer: Some(OrganizerSummary {
            id: organizer.0,
            organizer_name: organizer.1.to_string(),
            category: None,
        }),
    }
}

fn names(entries: &[CatalogEvent]) -> Vec<&str> {
    entries.iter().map(|e| e.event.name.as_str()).collect()
}

#[test]
fn test_normalize_collapses_punctuation() {
    assert_eq!(normalize("  Felicity_Hack   Night!! 2030 "), "felicity hack night 2030");
    assert_eq!(normalize("***"), "");
}

#[test]
fn test_match_score_paths() {
    // exact substring at normalized index 9
    assert_eq!(match_score("Felicity Hack Night", "hack"), 91);
    // subsequence with gaps
    assert_eq!(match_score("Felicity Hack Night", "fhn"), 48);
    assert_eq!(match_score("Felicity Hack Night", "fxz"), 0);
    // empty inputs
    assert_eq!(match_score("", "hack"), 0);
    assert_eq!(match_score("Hack", "!!"), 0);
}

#[test]
fn test_match_score_is_case_and_punctuation_insensitive() {
    assert_eq!(
        match_score("ROBO-WARS", "robo wars"),
        match_score("robo wars", "ROBO WARS")
    );
}

#[test]
fn test_composite_score_components() {
    let organizer = Uuid::new_v4();
    let entry = create_entry("Open Mic", (organizer, "Music Club"), &["Music", "poetry"], 4);
    let profile = ParticipantProfile {
        interests: vec!["music".to_string()],
        followed_organizers: vec![organizer],
    };
    let personalization = Personalization::from_profile(&profile);

    let score = composite_score(&entry, &personalization, Some(50), &RankingWeights::default());
    assert!((score - (2.0 + 3.0 + 4.0 + 0.5)).abs() < 1e-9);

    let heavier = RankingWeights { interest_tag: 10.0, followed_organizer: 0.0 };
    let score = composite_score(&entry, &personalization, None, &heavier);
    assert!((score - 14.0).abs() < 1e-9);
}

#[test]
fn test_search_then_personalize() {
    let tech = Uuid::new_v4();
    let music = Uuid::new_v4();
    let catalog = vec![
        create_entry("Night Market", (tech, "Tech Society"), &[], 0),
        create_entry("Hack Night", (tech, "Tech Society"), &["coding"], 0),
        create_entry("Music Night", (music, "Music Club"), &["music"], 0),
        create_entry("Quiz", (tech, "Tech Society"), &[], 50),
    ];
    let ranker = Ranker::default();

    let plain = ranker.rank(&catalog, &RankingQuery { term: Some("night"), ..Default::default() });
    // "night" sits earliest in "Night Market"
    assert_eq!(names(&plain.events), vec!["Night Market", "Hack Night", "Music Night"]);

    let profile = ParticipantProfile {
        interests: vec!["music".to_string()],
        followed_organizers: vec![music],
    };
    let personal = ranker.rank(
        &catalog,
        &RankingQuery { term: Some("night"), participant: Some(&profile), followed_only: false },
    );
    assert_eq!(personal.events[0].event.name, "Music Night");

    let followed = ranker.rank(
        &catalog,
        &RankingQuery { term: None, participant: Some(&profile), followed_only: true },
    );
    assert_eq!(names(&followed.events), vec!["Music Night"]);
}

#[test]
fn test_trending_is_top_five_by_recent_registrations() {
    let organizer = (Uuid::new_v4(), "Tech Society");
    let catalog: Vec<CatalogEvent> = (0..8)
        .map(|i| create_entry(&format!("Event {}", i), organizer, &[], i * 3))
        .collect();

    let view = Ranker::default().rank(&catalog, &RankingQuery::default());

    assert_eq!(view.events.len(), 8);
    assert_eq!(view.trending.len(), TRENDING_SIZE);
    assert_eq!(
        names(&view.trending),
        vec!["Event 7", "Event 6", "Event 5", "Event 4", "Event 3"]
    );
}

#[test]
fn test_catalog_filter_from_query() {
    let organizer = (Uuid::new_v4(), "Tech Society");
    let mut merch = create_entry("Hoodie", organizer, &[], 0).event;
    merch.event_type = EventType::Merchandise;
    let normal = create_entry("Talk", organizer, &[], 0).event;

    let query = BrowseQuery {
        event_type: Some("MERCHANDISE".to_string()),
        eligibility: Some(String::new()),
        ..Default::default()
    };
    let filter = CatalogFilter::from_query(&query);

    assert!(filter.matches(&merch));
    assert!(!filter.matches(&normal));

    let mut draft = merch.clone();
    draft.status = EventStatus::Draft;
    assert!(!filter.matches(&draft));
}

use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{CatalogEvent, ParticipantProfile, RankingWeights};

/// Participant signals prepared once per ranking pass
#[derive(Debug, Clone, Default)]
pub struct Personalization {
    interests: HashSet<String>,
    followed: HashSet<Uuid>,
}

impl Personalization {
    pub fn from_profile(profile: &ParticipantProfile) -> Self {
        Self {
            interests: profile.interests.iter().map(|i| i.to_lowercase()).collect(),
            followed: profile.followed_organizers.iter().copied().collect(),
        }
    }

    pub fn follows(&self, organizer_id: &Uuid) -> bool {
        self.followed.contains(organizer_id)
    }

    /// Number of event tags the participant is interested in (case-insensitive)
    pub fn interest_hits(&self, tags: &[String]) -> usize {
        tags.iter()
            .filter(|tag| self.interests.contains(&tag.to_lowercase()))
            .count()
    }
}

/// Composite ordering score for a participant
///
/// score = interest_tag × matching tags
///       + followed_organizer (if the organizer is followed)
///       + registrations in the last 24h
///       + match score / 100 (only while searching)
pub fn composite_score(
    entry: &CatalogEvent,
    personalization: &Personalization,
    match_score: Option<u32>,
    weights: &RankingWeights,
) -> f64 {
    let event = &entry.event;
    let mut score = personalization.interest_hits(&event.tags) as f64 * weights.interest_tag;

    if personalization.follows(&event.organizer_id) {
        score += weights.followed_organizer;
    }

    score += event.registrations_last_24h as f64;

    if let Some(relevance) = match_score {
        score += relevance as f64 / 100.0;
    }

    score
}

use crate::core::{
    matcher::match_score,
    scoring::{composite_score, Personalization},
};
use crate::models::{CatalogEvent, ParticipantProfile, RankingWeights};

/// Number of entries in the trending view
pub const TRENDING_SIZE: usize = 5;

/// Inputs of a ranking pass besides the catalog itself
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingQuery<'a> {
    pub term: Option<&'a str>,
    pub participant: Option<&'a ParticipantProfile>,
    pub followed_only: bool,
}

/// Ordered view over a catalog
#[derive(Debug, Clone, Default)]
pub struct RankedView {
    pub events: Vec<CatalogEvent>,
    pub trending: Vec<CatalogEvent>,
}

/// Event discovery ranking engine
///
/// # Pipeline Stages
/// 1. Relevance: score name and organizer name against the search term,
///    drop non-matches, order by relevance
/// 2. Followed-only filter
/// 3. Personalization: interests, followed organizers, recent popularity
/// 4. Trending: top entries by recent registrations
///
/// All sorts are stable, so ties keep the order of the previous stage.
/// The catalog is never mutated; entries are cloned into the view.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: RankingWeights,
}

impl Ranker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn rank(&self, catalog: &[CatalogEvent], query: &RankingQuery<'_>) -> RankedView {
        let term = query.term.filter(|t| !t.is_empty());

        // Stage 1: relevance
        let mut scored: Vec<(&CatalogEvent, Option<u32>)> = match term {
            Some(term) => {
                let mut matched: Vec<(&CatalogEvent, Option<u32>)> = catalog
                    .iter()
                    .filter_map(|entry| {
                        let score = match_score(&entry.event.name, term)
                            .max(match_score(entry.organizer_name(), term));
                        (score > 0).then_some((entry, Some(score)))
                    })
                    .collect();
                matched.sort_by(|a, b| b.1.cmp(&a.1));
                matched
            }
            None => catalog.iter().map(|entry| (entry, None)).collect(),
        };

        let personalization = query.participant.map(Personalization::from_profile);

        // Stage 2: followed-only
        if query.followed_only {
            if let Some(personalization) = &personalization {
                scored.retain(|(entry, _)| personalization.follows(&entry.event.organizer_id));
            }
        }

        // Stage 3: personalization
        if let Some(personalization) = &personalization {
            let mut keyed: Vec<(f64, &CatalogEvent, Option<u32>)> = scored
                .into_iter()
                .map(|(entry, relevance)| {
                    let key = composite_score(entry, personalization, relevance, &self.weights);
                    (key, entry, relevance)
                })
                .collect();
            keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
            scored = keyed
                .into_iter()
                .map(|(_, entry, relevance)| (entry, relevance))
                .collect();
        }

        let events: Vec<CatalogEvent> = scored.into_iter().map(|(entry, _)| entry.clone()).collect();

        // Stage 4: trending
        let mut trending = events.clone();
        trending.sort_by(|a, b| {
            b.event
                .registrations_last_24h
                .cmp(&a.event.registrations_last_24h)
        });
        trending.truncate(TRENDING_SIZE);

        tracing::debug!(
            "Ranked {} of {} catalog events (search: {}, personalized: {})",
            events.len(),
            catalog.len(),
            term.is_some(),
            personalization.is_some()
        );

        RankedView { events, trending }
    }
}

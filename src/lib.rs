//! Felicity EMS - event discovery and management service
//!
//! The core of the crate is the discovery ranker: events are searched with a
//! fuzzy text matcher, personalized by a participant's interests and followed
//! organizers, and paired with a trending view.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{match_score, normalize, RankedView, Ranker, RankingQuery};
pub use error::AppError;
pub use models::{CatalogEvent, Event, ParticipantProfile, RankingWeights};
pub use services::CatalogStore;

// Core algorithm exports
pub mod accounts;
pub mod calendar;
pub mod filters;
pub mod lifecycle;
pub mod matcher;
pub mod merch;
pub mod normalize;
pub mod ranker;
pub mod registration;
pub mod scoring;
pub mod ticket;

pub use accounts::{apply_profile_update, prepare_signup, provision_organizer, EmailPolicy, SignupError};
pub use calendar::{calendar_export, CalendarExport};
pub use filters::CatalogFilter;
pub use lifecycle::{apply_update, check_edit, EditRejection};
pub use matcher::match_score;
pub use merch::{decide_merch_order, place_merch_order, MerchError};
pub use normalize::normalize;
pub use ranker::{RankedView, Ranker, RankingQuery, TRENDING_SIZE};
pub use registration::{register_for_event, RegistrationError};
pub use scoring::{composite_score, Personalization};
pub use ticket::generate_ticket_id;

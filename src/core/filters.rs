use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{BrowseQuery, Event};

/// Pre-ranking catalog constraints derived from the browse query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub event_type: Option<String>,
    pub eligibility: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl CatalogFilter {
    /// Build a filter from raw query values
    ///
    /// Empty strings count as absent. Dates that fail to parse are ignored.
    pub fn from_query(query: &BrowseQuery) -> Self {
        Self {
            event_type: non_empty(&query.event_type),
            eligibility: non_empty(&query.eligibility),
            from: query.from_date.as_deref().and_then(parse_date_bound),
            to: query.to_date.as_deref().and_then(parse_date_bound),
        }
    }

    /// Check if an event belongs in the browsable catalog
    #[inline]
    pub fn matches(&self, event: &Event) -> bool {
        if !event.status.is_browsable() {
            return false;
        }

        if let Some(event_type) = &self.event_type {
            if event.event_type.as_str() != event_type {
                return false;
            }
        }

        if let Some(eligibility) = &self.eligibility {
            if &event.eligibility != eligibility {
                return false;
            }
        }

        if let Some(from) = self.from {
            if event.event_start_date < from {
                return false;
            }
        }

        if let Some(to) = self.to {
            if event.event_start_date > to {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight)
pub fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
        Err(_) => {
            tracing::debug!("Ignoring malformed date bound: {}", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventStatus, EventType};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn create_test_event(status: EventStatus, event_type: EventType, start: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "Test Event".to_string(),
            description: "desc".to_string(),
            event_type,
            eligibility: "ALL".to_string(),
            registration_deadline: start,
            event_start_date: start,
            event_end_date: start,
            registration_limit: 0,
            registration_fee: 0.0,
            organizer_id: Uuid::new_v4(),
            tags: vec![],
            status,
            custom_form: vec![],
            form_locked: false,
            merch_item_name: None,
            merch_variants: vec![],
            purchase_limit_per_participant: 1,
            merch_stock: 0,
            registrations_last_24h: 0,
            created_at: start,
        }
    }

    fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_only_published_and_ongoing_are_browsable() {
        let filter = CatalogFilter::default();
        for (status, expected) in [
            (EventStatus::Draft, false),
            (EventStatus::Published, true),
            (EventStatus::Ongoing, true),
            (EventStatus::Completed, false),
            (EventStatus::Closed, false),
        ] {
            let event = create_test_event(status, EventType::Normal, march(1));
            assert_eq!(filter.matches(&event), expected, "{:?}", status);
        }
    }

    #[test]
    fn test_event_type_and_eligibility() {
        let query = BrowseQuery {
            event_type: Some("MERCHANDISE".to_string()),
            eligibility: Some("IIIT".to_string()),
            ..Default::default()
        };
        let filter = CatalogFilter::from_query(&query);

        let mut merch = create_test_event(EventStatus::Published, EventType::Merchandise, march(1));
        assert!(!filter.matches(&merch));
        merch.eligibility = "IIIT".to_string();
        assert!(filter.matches(&merch));

        let mut normal = create_test_event(EventStatus::Published, EventType::Normal, march(1));
        normal.eligibility = "IIIT".to_string();
        assert!(!filter.matches(&normal));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let query = BrowseQuery {
            from_date: Some("2025-03-05".to_string()),
            to_date: Some("2025-03-10T12:00:00Z".to_string()),
            ..Default::default()
        };
        let filter = CatalogFilter::from_query(&query);

        assert!(!filter.matches(&create_test_event(EventStatus::Published, EventType::Normal, march(4))));
        assert!(filter.matches(&create_test_event(EventStatus::Published, EventType::Normal, march(5))));
        assert!(filter.matches(&create_test_event(EventStatus::Published, EventType::Normal, march(10))));
        assert!(!filter.matches(&create_test_event(EventStatus::Published, EventType::Normal, march(11))));
    }

    #[test]
    fn test_malformed_and_empty_values_are_ignored() {
        let query = BrowseQuery {
            event_type: Some(String::new()),
            from_date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        let filter = CatalogFilter::from_query(&query);

        assert_eq!(filter, CatalogFilter::default());
    }
}

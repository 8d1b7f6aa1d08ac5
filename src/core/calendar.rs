use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::Event;

const PRODUCT_ID: &str = "-//Felicity EMS//EN";
const UID_DOMAIN: &str = "felicity-ems";

/// Calendar artefacts for a single event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarExport {
    pub ics: String,
    pub google_link: String,
    pub outlook_link: String,
    pub filename: String,
}

/// Compact UTC form used by iCalendar, e.g. `20250305T180000Z`
pub fn ics_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build the iCalendar document and deep links for an event
///
/// `now` becomes DTSTAMP.
pub fn calendar_export(event: &Event, now: DateTime<Utc>) -> CalendarExport {
    let start = ics_timestamp(&event.event_start_date);
    let end = ics_timestamp(&event.event_end_date);

    let ics = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODUCT_ID),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@{}", event.id, UID_DOMAIN),
        format!("DTSTAMP:{}", ics_timestamp(&now)),
        format!("DTSTART:{}", start),
        format!("DTEND:{}", end),
        format!("SUMMARY:{}", event.name),
        format!("DESCRIPTION:{}", event.description.replace('\n', "\\n")),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n");

    let google_link = format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}&details={}",
        urlencoding::encode(&event.name),
        urlencoding::encode(&format!("{}/{}", start, end)),
        urlencoding::encode(&event.description),
    );

    let outlook_link = format!(
        "https://outlook.live.com/calendar/0/deeplink/compose?subject={}&startdt={}&enddt={}&body={}",
        urlencoding::encode(&event.name),
        urlencoding::encode(&event.event_start_date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        urlencoding::encode(&event.event_end_date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        urlencoding::encode(&event.description),
    );

    CalendarExport {
        ics,
        google_link,
        outlook_link,
        filename: calendar_filename(&event.name),
    }
}

/// `Hack Night 2025` -> `hack-night-2025.ics`
pub fn calendar_filename(name: &str) -> String {
    format!("{}.ics", name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
}

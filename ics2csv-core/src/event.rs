//! Decoded event records.
//!
//! `CalendarEvent` is what the decoder produces for one VEVENT.
//! `ClassifiedEvent` adds the derived flags computed by `classify`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A DTSTART/DTEND value as declared in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// `VALUE=DATE`, no time of day
    Date(NaiveDate),
    /// `...Z` suffix
    DateTimeUtc(DateTime<Utc>),
    /// No zone information: wall-clock time wherever the reader is
    DateTimeFloating(NaiveDateTime),
    /// `TZID=...` parameter
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
    /// Present in the source but not a real instant
    Unparsed(String),
}

impl EventTime {
    /// Resolve to an absolute instant.
    ///
    /// Dates and floating times are read as wall-clock time in `local`.
    /// Returns `None` for unparsed values and for local times that do not
    /// exist in the zone (DST gaps).
    pub fn resolve(&self, local: Tz) -> Option<DateTime<Utc>> {
        match self {
            // Midnight can fall in a DST gap; the day still starts an hour later
            EventTime::Date(d) => localize(d.and_hms_opt(0, 0, 0)?, local)
                .or_else(|| localize(d.and_hms_opt(1, 0, 0)?, local)),
            EventTime::DateTimeUtc(dt) => Some(*dt),
            EventTime::DateTimeFloating(naive) => localize(*naive, local),
            EventTime::DateTimeZoned { datetime, tzid } => {
                let tz = tzid.parse::<Tz>().unwrap_or_else(|_| {
                    tracing::debug!(tzid = %tzid, "unknown TZID, reading as output zone");
                    local
                });
                localize(*datetime, tz)
            }
            EventTime::Unparsed(_) => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// One VEVENT as decoded from the source. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    /// DTSTART declared a date-only value
    pub is_date_only: bool,
}

/// A `CalendarEvent` plus the flags derived from its instants.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub event: CalendarEvent,
    /// Resolved start instant, `None` when absent or invalid
    pub start: Option<DateTime<Utc>>,
    /// Resolved end instant, `None` when absent or invalid
    pub end: Option<DateTime<Utc>>,
    pub is_all_day: bool,
}

impl ClassifiedEvent {
    pub fn start_valid(&self) -> bool {
        self.start.is_some()
    }

    pub fn end_valid(&self) -> bool {
        self.end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Sao_Paulo;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S").unwrap()
    }

    #[test]
    fn test_floating_time_reads_as_output_zone() {
        let time = EventTime::DateTimeFloating(naive("20240105T140000"));
        let instant = time.resolve(Sao_Paulo).unwrap();
        // Sao Paulo is UTC-3 in 2024
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_date_resolves_to_local_midnight() {
        let time = EventTime::Date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let instant = time.resolve(Sao_Paulo).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_zoned_time_uses_its_own_tzid() {
        let time = EventTime::DateTimeZoned {
            datetime: naive("20240105T090000"),
            tzid: "America/New_York".to_string(),
        };
        let instant = time.resolve(Sao_Paulo).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 5, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_unknown_tzid_falls_back_to_output_zone() {
        let time = EventTime::DateTimeZoned {
            datetime: naive("20240105T140000"),
            tzid: "Custom/Nowhere".to_string(),
        };
        let instant = time.resolve(Sao_Paulo).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_unparsed_has_no_instant() {
        let time = EventTime::Unparsed("not-a-date".to_string());
        assert_eq!(time.resolve(Sao_Paulo), None);
    }

    #[test]
    fn test_dst_gap_has_no_instant() {
        // Clocks jumped from 00:00 to 01:00 in Sao Paulo on 2018-11-04
        let time = EventTime::DateTimeFloating(naive("20181104T003000"));
        assert_eq!(time.resolve(Sao_Paulo), None);
    }

    #[test]
    fn test_date_on_dst_change_day_still_resolves() {
        let time = EventTime::Date(NaiveDate::from_ymd_opt(2018, 11, 4).unwrap());
        let instant = time.resolve(Sao_Paulo).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
    }
}

//! All-day and validity classification.

use chrono::Duration;
use chrono_tz::Tz;

use crate::event::{CalendarEvent, ClassifiedEvent};

/// Minimum span for a timed event to count as all-day: 24h minus one
/// second, absorbing producers that write `23:59:59` end times.
pub const ALL_DAY_THRESHOLD_SECS: i64 = 24 * 60 * 60 - 1;

/// Derive validity and all-day flags for one event.
///
/// Never fails. A malformed instant degrades to invalid, and an invalid
/// instant can never make an event all-day.
pub fn classify(event: &CalendarEvent, tz: Tz) -> ClassifiedEvent {
    let start = event.start.as_ref().and_then(|t| t.resolve(tz));
    let end = event.end.as_ref().and_then(|t| t.resolve(tz));

    let spans_a_day = match (start, end) {
        (Some(start), Some(end)) => end - start >= Duration::seconds(ALL_DAY_THRESHOLD_SECS),
        _ => false,
    };

    ClassifiedEvent {
        event: event.clone(),
        start,
        end,
        is_all_day: event.is_date_only || spans_a_day,
    }
}

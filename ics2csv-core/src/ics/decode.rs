//! VEVENT extraction using the icalendar crate's parser.

use icalendar::{
    CalendarDateTime, DatePerhapsTime, ValueType,
    parser::{Component, Property, read_calendar, unfold},
};

use crate::error::{ConvertError, ConvertResult};
use crate::event::{CalendarEvent, EventTime};

/// Events found in one ICS document, in source order.
#[derive(Debug, Clone, Default)]
pub struct DecodedCalendar {
    pub events: Vec<CalendarEvent>,
    /// Non-VEVENT components that were discarded (VTODO, VTIMEZONE, ...)
    pub skipped: usize,
}

/// Decode raw ICS text into its VEVENT records.
///
/// Fails with `ConvertError::Decode` when the text is not iCalendar syntax.
/// A well-formed calendar without events decodes to an empty list.
pub fn decode_events(raw: &str) -> ConvertResult<DecodedCalendar> {
    if !has_calendar_marker(raw) {
        return Err(ConvertError::Decode(
            "BEGIN:VCALENDAR not found".to_string(),
        ));
    }

    let unfolded = unfold(raw);
    let calendar = read_calendar(&unfolded).map_err(|e| ConvertError::Decode(e.to_string()))?;

    let mut decoded = DecodedCalendar::default();
    collect(&calendar.components, &mut decoded);

    tracing::debug!(
        events = decoded.events.len(),
        skipped = decoded.skipped,
        "decoded calendar"
    );

    Ok(decoded)
}

fn has_calendar_marker(raw: &str) -> bool {
    raw.lines()
        .any(|line| line.trim().eq_ignore_ascii_case("BEGIN:VCALENDAR"))
}

/// Walk top-level components, descending into VCALENDAR wrappers only.
/// Sub-components of an event (VALARM) are never visited.
fn collect(components: &[Component], decoded: &mut DecodedCalendar) {
    for component in components {
        let name = component.name.as_str();
        if name.eq_ignore_ascii_case("VEVENT") {
            decoded.events.push(to_calendar_event(component));
        } else if name.eq_ignore_ascii_case("VCALENDAR") {
            collect(&component.components, decoded);
        } else {
            tracing::debug!(component = %component.name, "skipping non-event component");
            decoded.skipped += 1;
        }
    }
}

fn to_calendar_event(vevent: &Component) -> CalendarEvent {
    let text = |name: &str| find_prop(vevent, name).map(text_value);

    let dtstart = find_prop(vevent, "DTSTART");
    let start = dtstart.map(parse_event_time);
    let end = find_prop(vevent, "DTEND").map(parse_event_time);

    let declares_date = dtstart.is_some_and(is_date_value);
    let is_date_only = declares_date || start.as_ref().is_some_and(EventTime::is_date);

    CalendarEvent {
        summary: text("SUMMARY"),
        description: text("DESCRIPTION"),
        location: text("LOCATION"),
        start,
        end,
        is_date_only,
    }
}

/// Parse a DTSTART/DTEND property. Never fails: a value the parser rejects
/// is kept as `EventTime::Unparsed`.
fn parse_event_time(prop: &Property) -> EventTime {
    match DatePerhapsTime::try_from(prop) {
        Ok(dpt) => to_event_time(dpt),
        Err(_) => {
            tracing::debug!(value = %prop.val, "unparseable date value");
            EventTime::Unparsed(prop.val.to_string())
        }
    }
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}

fn is_date_value(prop: &Property) -> bool {
    prop.params.iter().any(|p| {
        p.key.as_str().eq_ignore_ascii_case("VALUE")
            && p.val
                .as_ref()
                .is_some_and(|v| v.as_str().eq_ignore_ascii_case("DATE"))
    })
}

/// Property names are case-insensitive (RFC 5545 section 3.1).
fn find_prop<'c>(component: &'c Component, name: &str) -> Option<&'c Property<'c>> {
    component
        .properties
        .iter()
        .find(|p| p.name.as_str().eq_ignore_ascii_case(name))
}

/// A TEXT value with its escapes resolved exactly once.
fn text_value(prop: &Property) -> String {
    if parser_unescaped(prop) {
        prop.val.as_str().to_owned()
    } else {
        prop.val.clone().unescape_text().as_str().to_owned()
    }
}

/// The parser only unescapes properties it types as TEXT: an explicit
/// `VALUE=TEXT`, or a known TEXT property spelled in uppercase.
fn parser_unescaped(prop: &Property) -> bool {
    let declared = prop
        .params
        .iter()
        .find(|p| p.key == "VALUE")
        .and_then(|p| p.val.as_ref())
        .and_then(|v| v.as_str().parse::<ValueType>().ok());

    match declared {
        Some(value_type) => value_type == ValueType::Text,
        None => !prop.name.as_str().chars().any(char::is_lowercase),
    }
}

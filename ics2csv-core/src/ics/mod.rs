//! ICS decoding.
//!
//! Wraps the `icalendar` crate's RFC 5545 parser and turns VEVENT
//! components into `CalendarEvent` records.

mod decode;

pub use decode::{DecodedCalendar, decode_events};

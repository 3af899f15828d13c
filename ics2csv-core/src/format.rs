//! Field rendering: dates, times and CSV text escaping.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Zone every date and time is rendered in unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// `DD/MM/YYYY` in `tz`, empty when the instant is invalid.
pub fn format_date(instant: Option<DateTime<Utc>>, tz: Tz) -> String {
    instant
        .map(|dt| dt.with_timezone(&tz).format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// 24-hour `HH:MM:SS` in `tz`, empty when the instant is invalid or the
/// event is all-day.
pub fn format_time(instant: Option<DateTime<Utc>>, all_day: bool, tz: Tz) -> String {
    match instant {
        Some(dt) if !all_day => dt.with_timezone(&tz).format(TIME_FORMAT).to_string(),
        _ => String::new(),
    }
}

/// How text fields are protected for the target delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// Quote only when needed (comma-delimited output)
    Minimal,
    /// Always quote, newlines folded to spaces (semicolon-delimited output)
    Quoted,
}

impl Escaping {
    pub fn apply(self, field: &str) -> String {
        match self {
            Escaping::Minimal => escape_minimal(field),
            Escaping::Quoted => escape_quoted(field),
        }
    }
}

/// Wrap in double quotes only when the field holds a comma, a double
/// quote, CR or LF. Interior quotes are doubled.
pub fn escape_minimal(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Always wrap in double quotes. Interior quotes are doubled and every
/// line break (CRLF, CR or LF) becomes a single space before trimming.
pub fn escape_quoted(field: &str) -> String {
    let flattened = field
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace('"', "\"\"");
    format!("\"{}\"", flattened.trim())
}

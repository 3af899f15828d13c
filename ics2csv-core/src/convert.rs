//! The conversion pipeline: decode, classify, assemble, serialize.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::error::{ConvertError, ConvertResult};
use crate::format::DEFAULT_TIMEZONE;
use crate::ics::decode_events;
use crate::row::{OutputRow, assemble_row};
use crate::serialize::serialize;
use crate::variant::Variant;

/// Pipeline settings for one output shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converter {
    pub variant: Variant,
    pub timezone: Tz,
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(Variant::default())
    }
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub csv: String,
    /// Data rows written, excluding the header
    pub rows: usize,
    /// Non-VEVENT components ignored while decoding
    pub skipped: usize,
}

impl Converter {
    pub fn new(variant: Variant) -> Self {
        Converter {
            variant,
            timezone: DEFAULT_TIMEZONE,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Convert raw ICS text into CSV.
    ///
    /// Every VEVENT yields exactly one row. Fails only on file-level
    /// conditions: empty text, undecodable text, or no events at all.
    pub fn convert(&self, raw: &str) -> ConvertResult<Conversion> {
        if raw.trim().is_empty() {
            return Err(ConvertError::EmptyContent);
        }

        let decoded = decode_events(raw)?;

        let rows: Vec<OutputRow> = decoded
            .events
            .iter()
            .map(|event| classify(event, self.timezone))
            .map(|classified| assemble_row(&classified, self.variant, self.timezone))
            .collect();

        if rows.is_empty() {
            return Err(ConvertError::NoEvents);
        }

        let csv = serialize(&self.variant.header(), &rows, self.variant.delimiter());

        tracing::debug!(
            variant = %self.variant,
            rows = rows.len(),
            skipped = decoded.skipped,
            "converted calendar"
        );

        Ok(Conversion {
            csv,
            rows: rows.len(),
            skipped: decoded.skipped,
        })
    }
}

/// Request outcome as a single value: CSV body or error message, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionResult {
    Csv(String),
    Error(String),
}

impl From<ConvertResult<Conversion>> for ConversionResult {
    fn from(result: ConvertResult<Conversion>) -> Self {
        match result {
            Ok(conversion) => ConversionResult::Csv(conversion.csv),
            Err(e) => {
                if !e.is_client_error() {
                    tracing::error!(error = ?e, "conversion failed");
                }
                ConversionResult::Error(e.user_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEETING: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:1\r\n\
SUMMARY:Reunião\\, Projeto\r\n\
DTSTART:20240105T140000\r\n\
DTEND:20240105T150000\r\n\
LOCATION:Sala 2\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_simple_conversion() {
        let conversion = Converter::new(Variant::Simple).convert(MEETING).unwrap();
        let lines: Vec<&str> = conversion.csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Assunto,Data de Início,Hora de Início,Data de Fim,Hora de Fim,Dia Inteiro,Descrição,Local",
                "\"Reunião, Projeto\",05/01/2024,14:00:00,05/01/2024,15:00:00,Não,,Sala 2",
            ]
        );
        assert_eq!(conversion.rows, 1);
        assert_eq!(conversion.skipped, 0);
    }

    #[test]
    fn test_empty_text_is_empty_content() {
        let result = Converter::default().convert("  \r\n");
        assert!(matches!(result, Err(ConvertError::EmptyContent)));
    }

    #[test]
    fn test_calendar_without_events_is_no_events() {
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\nEND:VCALENDAR\r\n";
        let result = Converter::default().convert(ics);
        assert!(matches!(result, Err(ConvertError::NoEvents)));
    }

    #[test]
    fn test_conversion_result_serializes_one_side() {
        let ok: ConversionResult = Converter::default().convert(MEETING).into();
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("csv").is_some());
        assert!(json.get("error").is_none());

        let err: ConversionResult = Converter::default().convert("").into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json["error"],
            "O arquivo .ics está vazio ou não pôde ser lido."
        );
        assert!(json.get("csv").is_none());
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let converter = Converter::new(Variant::Extended);
        assert_eq!(
            converter.convert(MEETING).unwrap(),
            converter.convert(MEETING).unwrap()
        );
    }

    #[test]
    fn test_timezone_override() {
        let conversion = Converter::new(Variant::Simple)
            .with_timezone(chrono_tz::UTC)
            .convert(&MEETING.replace("T140000", "T140000Z").replace("T150000", "T150000Z"))
            .unwrap();
        assert!(conversion.csv.contains("05/01/2024,14:00:00,05/01/2024,15:00:00"));
    }
}

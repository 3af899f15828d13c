//! Core pipeline for converting iCalendar data into CSV.
//!
//! The pipeline is shared by every delivery path (CLI, HTTP server):
//! - `ics` decodes raw text into `CalendarEvent` records (VEVENT only)
//! - `classify` derives all-day and validity flags
//! - `format`, `split` and `row` render each event into an `OutputRow`
//! - `serialize` joins header and rows into one text blob
//!
//! Output shape is selected with a `Variant`.

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod format;
pub mod ics;
pub mod row;
pub mod serialize;
pub mod split;
pub mod upload;
pub mod variant;

pub use config::Ics2CsvConfig;
pub use convert::{Conversion, ConversionResult, Converter};
pub use error::{ConvertError, ConvertResult};
pub use event::{CalendarEvent, ClassifiedEvent, EventTime};
pub use upload::Upload;
pub use variant::Variant;

//! The file boundary shared by the delivery paths.
//!
//! Turns an uploaded (or locally read) file into pipeline input and the
//! pipeline output into a downloadable file.

use crate::convert::{Conversion, Converter};
use crate::error::{ConvertError, ConvertResult};

/// MIME type an `.ics` upload is expected to declare.
pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar";

/// MIME type of the CSV download.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// UTF-8 byte-order mark, so spreadsheets pick the right encoding for accents.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const FALLBACK_FILE_NAME: &str = "calendario";

/// One supplied file.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Upload {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Name of the CSV produced from this upload.
    pub fn output_file_name(&self) -> String {
        output_file_name(self.file_name.as_deref())
    }
}

impl Converter {
    /// Convert a supplied file.
    ///
    /// A missing or zero-length file is `NoFile`. The declared MIME type is
    /// only checked for a warning; conversion proceeds regardless.
    pub fn convert_upload(&self, upload: Option<&Upload>) -> ConvertResult<Conversion> {
        let upload = upload.ok_or(ConvertError::NoFile)?;
        if upload.bytes.is_empty() {
            return Err(ConvertError::NoFile);
        }

        match upload.content_type.as_deref() {
            Some(ct) if is_calendar_type(ct) => {}
            declared => tracing::warn!(
                content_type = declared.unwrap_or("<none>"),
                "unexpected file type, converting anyway"
            ),
        }

        let text = String::from_utf8_lossy(&upload.bytes);
        self.convert(strip_bom(&text))
    }
}

fn is_calendar_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CALENDAR_CONTENT_TYPE))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Replace a trailing `.ics` with `.csv`; other names just gain `.csv`.
pub fn output_file_name(input: Option<&str>) -> String {
    let base = input
        .map(|name| {
            // Browsers may send a full client path
            let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
            match name.len().checked_sub(4) {
                Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".ics") => {
                    &name[..cut]
                }
                _ => name,
            }
        })
        .filter(|base| !base.trim().is_empty())
        .unwrap_or(FALLBACK_FILE_NAME);

    format!("{base}.csv")
}

/// Prefix the CSV text with the UTF-8 byte-order mark.
pub fn with_bom(csv: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(csv.as_bytes());
    bytes
}

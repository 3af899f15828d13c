//! Summary splitting for the extended export.
//!
//! Some calendars pack several values into SUMMARY, joined with `;`
//! (`Nome;Documento;Atendente;...`). This is a local convention, not RFC 5545.

/// Number of summary slots in the extended layout.
pub const SUMMARY_SLOTS: usize = 8;

/// Split on `;` and pad or truncate to exactly `SUMMARY_SLOTS` parts.
/// Missing parts are empty strings; parts past the last slot are dropped.
pub fn split_summary(summary: &str) -> [String; SUMMARY_SLOTS] {
    let mut slots: [String; SUMMARY_SLOTS] = Default::default();
    for (slot, part) in slots.iter_mut().zip(summary.split(';')) {
        *slot = part.to_string();
    }
    slots
}

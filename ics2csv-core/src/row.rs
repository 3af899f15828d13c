//! Row assembly: one output row per classified event.

use chrono_tz::Tz;

use crate::event::ClassifiedEvent;
use crate::format::{format_date, format_time};
use crate::split::split_summary;
use crate::variant::{Column, Variant};

/// Formatted fields of one event, aligned to the variant's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow(pub Vec<String>);

impl OutputRow {
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the row for `event` in `variant`'s column order.
///
/// Never fails; missing values are already empty strings at this point.
pub fn assemble_row(event: &ClassifiedEvent, variant: Variant, tz: Tz) -> OutputRow {
    let escaping = variant.escaping();
    let summary = event.event.summary.as_deref().unwrap_or_default();
    let slots = variant.splits_summary().then(|| split_summary(summary));

    let fields: Vec<String> = variant
        .columns()
        .iter()
        .map(|(_, column)| {
            let value = match column {
                Column::Summary => summary.to_string(),
                Column::SummarySlot(i) => slots
                    .as_ref()
                    .and_then(|s| s.get(*i))
                    .cloned()
                    .unwrap_or_default(),
                Column::StartDate => format_date(event.start, tz),
                Column::StartTime => format_time(event.start, event.is_all_day, tz),
                Column::EndDate => format_date(event.end, tz),
                Column::EndTime => format_time(event.end, event.is_all_day, tz),
                Column::AllDay => (if event.is_all_day { "Sim" } else { "Não" }).to_string(),
                Column::Description => event.event.description.clone().unwrap_or_default(),
                Column::Location => event.event.location.clone().unwrap_or_default(),
            };
            escaping.apply(&value)
        })
        .collect();

    debug_assert_eq!(fields.len(), variant.columns().len());
    OutputRow(fields)
}

//! Terminal rendering for conversion results.
//!
//! Extension traits that add colored output to ics2csv-core types
//! using owo_colors.

use ics2csv_core::Conversion;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Conversion {
    fn render(&self) -> String {
        let rows = format!("{} {}", self.rows, pluralize("event", self.rows));
        let mut line = format!("{} Converted {}", "✓".green(), rows.bold());

        if self.skipped > 0 {
            let skipped = format!(
                "({} other {} ignored)",
                self.skipped,
                pluralize("component", self.skipped)
            );
            line.push_str(&format!(" {}", skipped.dimmed()));
        }

        line
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

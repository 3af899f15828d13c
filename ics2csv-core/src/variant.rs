//! Output layouts.
//!
//! Each variant fixes the delimiter, the escaping policy and the ordered
//! column table. Header and rows are both derived from the same table, so
//! they always have the same length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format::Escaping;

/// Where a column takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Summary,
    /// One slot of the `;`-split summary
    SummarySlot(usize),
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    AllDay,
    Description,
    Location,
}

const SIMPLE_COLUMNS: &[(&str, Column)] = &[
    ("Assunto", Column::Summary),
    ("Data de Início", Column::StartDate),
    ("Hora de Início", Column::StartTime),
    ("Data de Fim", Column::EndDate),
    ("Hora de Fim", Column::EndTime),
    ("Dia Inteiro", Column::AllDay),
    ("Descrição", Column::Description),
    ("Local", Column::Location),
];

const EXTENDED_COLUMNS: &[(&str, Column)] = &[
    ("Coluna 1", Column::SummarySlot(0)),
    ("Coluna 2", Column::SummarySlot(1)),
    ("Coluna 3", Column::SummarySlot(2)),
    ("Nome", Column::SummarySlot(3)),
    ("Documento", Column::SummarySlot(4)),
    ("Atendente", Column::SummarySlot(5)),
    ("Setor", Column::SummarySlot(6)),
    ("Processo", Column::SummarySlot(7)),
    ("Data de Início", Column::StartDate),
    ("Hora de Início", Column::StartTime),
    ("Data de Fim", Column::EndDate),
    ("Hora de Fim", Column::EndTime),
    ("Dia Inteiro", Column::AllDay),
    ("Descrição Original", Column::Description),
    ("Local", Column::Location),
];

/// The supported CSV shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Comma-delimited, 8 columns, quoting only when needed
    #[default]
    Simple,
    /// Semicolon-delimited, 15 columns, summary split into 8 slots, always quoted
    Extended,
}

impl Variant {
    pub fn delimiter(self) -> char {
        match self {
            Variant::Simple => ',',
            Variant::Extended => ';',
        }
    }

    pub fn escaping(self) -> Escaping {
        match self {
            Variant::Simple => Escaping::Minimal,
            Variant::Extended => Escaping::Quoted,
        }
    }

    pub fn columns(self) -> &'static [(&'static str, Column)] {
        match self {
            Variant::Simple => SIMPLE_COLUMNS,
            Variant::Extended => EXTENDED_COLUMNS,
        }
    }

    pub fn header(self) -> Vec<String> {
        self.columns()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn splits_summary(self) -> bool {
        self.columns()
            .iter()
            .any(|(_, c)| matches!(c, Column::SummarySlot(_)))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Simple => "simple",
            Variant::Extended => "extended",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "a" => Ok(Variant::Simple),
            "extended" | "b" => Ok(Variant::Extended),
            other => Err(format!(
                "Unknown variant '{other}'. Expected 'simple' or 'extended'"
            )),
        }
    }
}

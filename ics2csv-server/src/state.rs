use std::sync::Arc;

use anyhow::Result;
use ics2csv_core::{Converter, Ics2CsvConfig, Variant};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<Ics2CsvConfig>,
    converter: Converter,
}

impl AppState {
    pub fn new(config: Ics2CsvConfig) -> Result<Self> {
        // Reject a bad timezone at startup rather than on the first upload
        let converter = config.converter()?;
        Ok(AppState {
            config: Arc::new(config),
            converter,
        })
    }

    pub fn config(&self) -> &Ics2CsvConfig {
        &self.config
    }

    /// Converter for one request, optionally overriding the configured variant.
    pub fn converter(&self, variant: Option<Variant>) -> Converter {
        match variant {
            Some(variant) => Converter {
                variant,
                ..self.converter
            },
            None => self.converter,
        }
    }
}

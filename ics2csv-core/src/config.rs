//! User configuration at ~/.config/ics2csv/config.toml
//!
//! Every key is optional. `ICS2CSV_*` environment variables override the
//! file (`ICS2CSV_VARIANT=extended`, `ICS2CSV_SERVER__ADDR=0.0.0.0:8080`).

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::convert::Converter;
use crate::error::{ConvertError, ConvertResult};
use crate::format::DEFAULT_TIMEZONE;
use crate::variant::Variant;

static DEFAULT_ADDR: &str = "127.0.0.1:4096";

/// Upload ceiling of the original web form.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.name().to_string()
}

fn default_true() -> bool {
    true
}

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ics2CsvConfig {
    #[serde(default)]
    pub variant: Variant,

    /// IANA zone dates and times are rendered in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Prefix downloads with a UTF-8 byte-order mark
    #[serde(default = "default_true")]
    pub bom: bool,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: default_addr(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for Ics2CsvConfig {
    fn default() -> Self {
        Ics2CsvConfig {
            variant: Variant::default(),
            timezone: default_timezone(),
            bom: true,
            server: ServerConfig::default(),
        }
    }
}

impl Ics2CsvConfig {
    pub fn config_path() -> ConvertResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConvertError::Config("Could not determine config directory".into()))?
            .join("ics2csv");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, creating a commented template on first run.
    pub fn load() -> ConvertResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!(path = %config_path.display(), error = %e, "could not create default config");
            }
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus environment overrides.
    pub fn load_from(path: &Path) -> ConvertResult<Self> {
        let config: Ics2CsvConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("ICS2CSV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConvertError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConvertError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ConvertResult<()> {
        let contents = format!(
            "\
# ics2csv configuration

# Output layout: \"simple\" (comma, 8 columns) or \"extended\" (semicolon, 15 columns)
# variant = \"simple\"

# Timezone dates and times are written in:
# timezone = \"{}\"

# Prefix CSV downloads with a UTF-8 byte-order mark:
# bom = true

# [server]
# addr = \"{}\"
# max_upload_bytes = {}
",
            DEFAULT_TIMEZONE.name(),
            DEFAULT_ADDR,
            DEFAULT_MAX_UPLOAD_BYTES,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConvertError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ConvertError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn timezone(&self) -> ConvertResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConvertError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Pipeline settings described by this config.
    pub fn converter(&self) -> ConvertResult<Converter> {
        Ok(Converter::new(self.variant).with_timezone(self.timezone()?))
    }

    /// Effective settings, as they would be written to the config file.
    pub fn to_toml(&self) -> ConvertResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConvertError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Ics2CsvConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.variant, Variant::Simple);
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert!(config.bom);
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_commented_template_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Ics2CsvConfig::create_default_config(&path).unwrap();

        let config = Ics2CsvConfig::load_from(&path).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:4096");
        assert_eq!(config.converter().unwrap(), Converter::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "variant = \"extended\"\ntimezone = \"UTC\"\nbom = false\n\n[server]\nmax_upload_bytes = 1024\n",
        )
        .unwrap();

        let config = Ics2CsvConfig::load_from(&path).unwrap();
        assert_eq!(config.variant, Variant::Extended);
        assert!(!config.bom);
        assert_eq!(config.server.max_upload_bytes, 1024);
        assert_eq!(config.converter().unwrap().timezone, chrono_tz::UTC);
    }

    #[test]
    fn test_unknown_timezone_is_config_error() {
        let config = Ics2CsvConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.converter(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_to_toml_names_the_variant() {
        let toml = Ics2CsvConfig::default().to_toml().unwrap();
        assert!(toml.contains("variant = \"simple\""));
    }
}

//! Migration configuration.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Europe::Berlin;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ToolError, ToolResult};

/// Environment variable overriding the migration key date.
pub const KEY_DATE_ENV: &str = "PVTOOL_MIGRATION_KEY_DATE";

/// Settings shared by all validators of a migration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Reference instant of the migration. "In the past" and "in the future"
    /// are judged relative to this date.
    pub migration_key_date: DateTime<Utc>,
}

impl MigrationConfig {
    pub fn new(migration_key_date: DateTime<Utc>) -> Self {
        Self { migration_key_date }
    }

    /// Load the configuration from a TOML, YAML or JSON file.
    pub fn load(path: &Path) -> ToolResult<Self> {
        if !path.exists() {
            return Err(ToolError::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ToolError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!("Loaded migration config from {}", path.display());
        Ok(config)
    }

    /// Build the configuration from `PVTOOL_MIGRATION_KEY_DATE`, if set.
    pub fn from_env() -> ToolResult<Option<Self>> {
        match std::env::var(KEY_DATE_ENV) {
            Ok(value) => Ok(Some(Self::new(parse_key_date(&value)?))),
            Err(_) => Ok(None),
        }
    }

    /// The key date as a calendar date in Germany.
    pub fn key_date_berlin(&self) -> NaiveDate {
        berlin_date(&self.migration_key_date)
    }
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_key_date(value: &str) -> ToolResult<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ToolError::InvalidKeyDate {
            value: value.to_string(),
            message: "expected RFC 3339 or YYYY-MM-DD".to_string(),
        })
}

/// Calendar date of an instant in Europe/Berlin.
pub fn berlin_date(instant: &DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Berlin).date_naive()
}

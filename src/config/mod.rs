//! Configuration module
//!
//! Layered configuration: defaults, config file, environment, CLI flags.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
#[cfg(test)]
pub use env::{EnvBuilder, EnvGuard};
pub use file::{expand_path, find_config_file, CONFIG_LOCATIONS};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::data::{Catalog, TestCase};
use crate::results::DEFAULT_REPORT_PATH;

/// Harness configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub intake: IntakeConfig,
    pub booking: BookingConfig,
    pub report: ReportConfig,
}

impl HarnessConfig {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist; otherwise the first standard location
    /// found is used, falling back to defaults. Environment variables are
    /// applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match find_config_file() {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(&EnvConfig::load());
        Ok(config)
    }

    /// Overlay values present in the environment
    pub fn apply_env(&mut self, env: &EnvConfig) {
        let intake = &mut self.intake;
        if let Some(v) = &env.base_url {
            intake.base_url = v.clone();
        }
        if let Some(v) = &env.endpoint {
            intake.endpoint = v.clone();
        }
        if let Some(v) = env.timeout_ms {
            intake.timeout_ms = v;
        }
        if let Some(v) = env.retries {
            intake.retries = v;
        }
        if let Some(v) = &env.file_url {
            intake.file_url = v.clone();
        }
        if let Some(v) = &env.file_type {
            intake.file_type = v.clone();
        }
        if let Some(v) = &env.file_id {
            intake.file_id = v.clone();
        }
        if let Some(v) = &env.builder_id {
            intake.builder_id = v.clone();
        }
        if let Some(v) = &env.entity_id {
            intake.entity_id = v.clone();
        }

        let booking = &mut self.booking;
        if let Some(v) = &env.booking_base_url {
            booking.base_url = v.clone();
        }
        if let Some(v) = &env.booking_username {
            booking.username = v.clone();
        }
        if let Some(v) = &env.booking_password {
            booking.password = v.clone();
        }

        if let Some(v) = &env.report_path {
            self.report.html_path = v.clone();
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

/// Document-intake service settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub base_url: String,
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Timeout for calls that wait on full document processing
    pub processing_timeout_ms: u64,
    /// Informational only; requests are never retried
    pub retries: u32,
    pub file_url: String,
    pub file_type: String,
    pub file_id: String,
    pub builder_id: String,
    pub entity_id: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let case = Catalog::builtin().first();
        let field = |f: fn(&TestCase) -> &'static str| case.map(f).unwrap_or_default().to_string();

        Self {
            base_url: "https://bldr-sq-apim-dev.azure-api.net".to_string(),
            endpoint: "/api/v1/intelligent-builder-intake/process".to_string(),
            timeout_ms: 60_000,
            processing_timeout_ms: 90_000,
            retries: 3,
            file_url: field(|c| c.file_url),
            file_type: field(|c| c.file_type),
            file_id: field(|c| c.file_id),
            builder_id: field(|c| c.builder_id),
            entity_id: field(|c| c.entity_id),
        }
    }
}

impl IntakeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn processing_timeout(&self) -> Duration {
        Duration::from_millis(self.processing_timeout_ms.max(self.timeout_ms))
    }
}

/// Booking-demo service settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub login_path: String,
    pub timeout_secs: u64,
    /// Booking id used by the unauthorized-update check
    pub booking_id: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://restful-booker.herokuapp.com".to_string(),
            username: "admin".to_string(),
            password: "password123".to_string(),
            login_path: "/auth".to_string(),
            timeout_secs: 10,
            booking_id: 1,
        }
    }
}

impl BookingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Report output settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub html_path: String,
    pub title: String,
    /// Directory for stored run summaries; the user data directory when unset
    pub results_dir: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            html_path: DEFAULT_REPORT_PATH.to_string(),
            title: "API Test Report".to_string(),
            results_dir: None,
        }
    }
}

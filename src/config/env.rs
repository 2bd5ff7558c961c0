//! Environment variable configuration
//!
//! Reads the harness settings from the process environment. A `.env` file in
//! the working directory is loaded by `main` before this runs.

use std::env;

/// Recognised variables with their descriptions
const ENV_VARS: &[(&str, &str)] = &[
    ("BASE_URL", "Intake service base URL"),
    ("API_ENDPOINT", "Intake process endpoint path"),
    ("API_TIMEOUT_MS", "Intake request timeout in milliseconds"),
    ("API_RETRIES", "Retry count (informational)"),
    ("FILE_URL", "Default document URL"),
    ("FILE_TYPE", "Default file type (community, zoning, ...)"),
    ("FILE_ID", "Default file identifier"),
    ("BUILDER_ID", "Default builder identifier"),
    ("ENTITY_ID", "Default entity identifier"),
    ("BOOKING_BASE_URL", "Booking service base URL"),
    ("BOOKING_USERNAME", "Booking service login user"),
    ("BOOKING_PASSWORD", "Booking service login password"),
    ("REPORT_PATH", "HTML report output path"),
];

/// Configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// BASE_URL
    pub base_url: Option<String>,
    /// API_ENDPOINT
    pub endpoint: Option<String>,
    /// API_TIMEOUT_MS
    pub timeout_ms: Option<u64>,
    /// API_RETRIES
    pub retries: Option<u32>,
    /// FILE_URL
    pub file_url: Option<String>,
    /// FILE_TYPE
    pub file_type: Option<String>,
    /// FILE_ID
    pub file_id: Option<String>,
    /// BUILDER_ID
    pub builder_id: Option<String>,
    /// ENTITY_ID
    pub entity_id: Option<String>,
    /// BOOKING_BASE_URL
    pub booking_base_url: Option<String>,
    /// BOOKING_USERNAME
    pub booking_username: Option<String>,
    /// BOOKING_PASSWORD
    pub booking_password: Option<String>,
    /// REPORT_PATH
    pub report_path: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            endpoint: get_env("API_ENDPOINT"),
            timeout_ms: get_env_parse("API_TIMEOUT_MS"),
            retries: get_env_parse("API_RETRIES"),
            file_url: get_env("FILE_URL"),
            file_type: get_env("FILE_TYPE"),
            file_id: get_env("FILE_ID"),
            builder_id: get_env("BUILDER_ID"),
            entity_id: get_env("ENTITY_ID"),
            booking_base_url: get_env("BOOKING_BASE_URL"),
            booking_username: get_env("BOOKING_USERNAME"),
            booking_password: get_env("BOOKING_PASSWORD"),
            report_path: get_env("REPORT_PATH"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.endpoint.is_some()
            || self.timeout_ms.is_some()
            || self.retries.is_some()
            || self.file_url.is_some()
            || self.file_type.is_some()
            || self.file_id.is_some()
            || self.builder_id.is_some()
            || self.entity_id.is_some()
            || self.booking_base_url.is_some()
            || self.booking_username.is_some()
            || self.booking_password.is_some()
            || self.report_path.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  BASE_URL:          {:?}", self.base_url);
        println!("  API_ENDPOINT:      {:?}", self.endpoint);
        println!("  API_TIMEOUT_MS:    {:?}", self.timeout_ms);
        println!("  API_RETRIES:       {:?}", self.retries);
        println!("  FILE_URL:          {:?}", self.file_url);
        println!("  FILE_TYPE:         {:?}", self.file_type);
        println!("  FILE_ID:           {:?}", self.file_id);
        println!("  BUILDER_ID:        {:?}", self.builder_id);
        println!("  ENTITY_ID:         {:?}", self.entity_id);
        println!("  BOOKING_BASE_URL:  {:?}", self.booking_base_url);
        println!("  BOOKING_USERNAME:  {:?}", self.booking_username);
        println!(
            "  BOOKING_PASSWORD:  {}",
            if self.booking_password.is_some() {
                "<set>"
            } else {
                "None"
            }
        );
        println!("  REPORT_PATH:       {:?}", self.report_path);
    }
}

/// Get a non-empty environment variable
fn get_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Builder for setting environment variables (useful for testing)
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an arbitrary variable
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    pub fn base_url(self, url: impl Into<String>) -> Self {
        self.var("BASE_URL", url)
    }

    pub fn endpoint(self, endpoint: impl Into<String>) -> Self {
        self.var("API_ENDPOINT", endpoint)
    }

    pub fn timeout_ms(self, timeout: u64) -> Self {
        self.var("API_TIMEOUT_MS", timeout.to_string())
    }

    pub fn file_type(self, file_type: impl Into<String>) -> Self {
        self.var("FILE_TYPE", file_type)
    }

    pub fn booking_base_url(self, url: impl Into<String>) -> Self {
        self.var("BOOKING_BASE_URL", url)
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

#[cfg(test)]
impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all recognised environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    for (name, description) in ENV_VARS {
        println!("  {name:<18} {description}");
    }
    println!();
    println!("Variables may also be set in a .env file in the working directory.");
    println!();
    println!("Example:");
    println!("  export BASE_URL=https://intake.example.com");
    println!("  export API_TIMEOUT_MS=30000");
    println!("  intake-harness run --suite intake");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_builder() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = EnvBuilder::new()
            .base_url("http://10.0.0.1:8000")
            .file_type("zoning")
            .timeout_ms(1500)
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.1:8000"));
        assert_eq!(config.file_type.as_deref(), Some("zoning"));
        assert_eq!(config.timeout_ms, Some(1500));
        assert!(config.has_any());
    }

    #[test]
    fn test_unparseable_and_blank_values_ignored() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = EnvBuilder::new()
            .var("API_TIMEOUT_MS", "soon")
            .var("API_RETRIES", " 5 ")
            .var("FILE_ID", "   ")
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.retries, Some(5));
        assert_eq!(config.file_id, None);
    }

    #[test]
    fn test_guard_restores() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::remove_var("BOOKING_BASE_URL");
        {
            let _guard = EnvBuilder::new()
                .booking_base_url("http://localhost:3001")
                .apply_scoped();
            assert_eq!(
                env::var("BOOKING_BASE_URL").ok().as_deref(),
                Some("http://localhost:3001")
            );
        }
        assert!(env::var("BOOKING_BASE_URL").is_err());
    }
}

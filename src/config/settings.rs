//! User settings for expense-claims
//!
//! Display preferences, report titles, the administrator identity and the
//! watch/logging defaults.

use serde::{Deserialize, Serialize};

use super::paths::ClaimsPaths;
use crate::error::ClaimsError;
use crate::models::Role;

/// Title given to exports from each dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTitles {
    #[serde(default = "default_employee_title")]
    pub employee: String,
    #[serde(default = "default_manager_title")]
    pub manager: String,
    #[serde(default = "default_admin_title")]
    pub admin: String,
}

impl ReportTitles {
    /// Title for the dashboard a role sees
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Employee => &self.employee,
            Role::Manager => &self.manager,
            Role::Admin => &self.admin,
        }
    }
}

impl Default for ReportTitles {
    fn default() -> Self {
        Self {
            employee: default_employee_title(),
            manager: default_manager_title(),
            admin: default_admin_title(),
        }
    }
}

fn default_employee_title() -> String {
    "My Claims Report".to_string()
}

fn default_manager_title() -> String {
    "Manager Claims Report".to_string()
}

fn default_admin_title() -> String {
    "Admin Claims Report".to_string()
}

/// User settings for expense-claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Email that always signs in as administrator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,

    /// Currency symbol for terminal display (exports carry plain numbers)
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for terminal display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub report_titles: ReportTitles,

    /// Poll interval for `watch`
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,

    /// Log filter used when neither RUST_LOG nor --log-level is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_watch_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            admin_email: None,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            report_titles: ReportTitles::default(),
            watch_interval_ms: default_watch_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ClaimsPaths) -> Result<Self, ClaimsError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ClaimsError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ClaimsError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ClaimsPaths) -> Result<(), ClaimsError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ClaimsError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ClaimsError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

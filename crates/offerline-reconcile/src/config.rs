//! # Reconcile Configuration
//!
//! Configuration management for reconciliation runs.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OFFERLINE_TOLERANCE_PCT=2.5                                        │
//! │     OFFERLINE_LOG=debug                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/offerline/reconcile.toml (Linux)                         │
//! │     ~/Library/Application Support/com.offerline.offerline/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     1% tolerance, "info,offerline=debug" log filter                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # reconcile.toml
//! [tolerance]
//! percent = 1.0
//!
//! [logging]
//! filter = "info,offerline=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use offerline_core::validation::validate_tolerance_pct;

use crate::error::{ReconcileError, ReconcileResult};

const ENV_TOLERANCE_PCT: &str = "OFFERLINE_TOLERANCE_PCT";
const ENV_LOG: &str = "OFFERLINE_LOG";

// =============================================================================
// Tolerance Settings
// =============================================================================

/// How far a recomputed total may drift from the recorded one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceSettings {
    /// Acceptable difference, as a percentage of the larger total.
    #[serde(default = "default_tolerance_pct")]
    pub percent: f64,
}

fn default_tolerance_pct() -> f64 {
    1.0
}

impl Default for ToleranceSettings {
    fn default() -> Self {
        ToleranceSettings {
            percent: default_tolerance_pct(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string. `RUST_LOG` still wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,offerline=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Reconcile Configuration
// =============================================================================

/// Complete reconcile configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub tolerance: ToleranceSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (reconcile.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReconcileResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load), reading overrides through `env`.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> ReconcileResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading reconcile config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load reconcile config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReconcileResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReconcileError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReconcileError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| ReconcileError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Reconcile config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReconcileResult<()> {
        validate_tolerance_pct(self.tolerance.percent)
            .map_err(|e| ReconcileError::InvalidConfig(e.to_string()))?;

        if self.logging.filter.trim().is_empty() {
            return Err(ReconcileError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn read_file(path: &Path) -> ReconcileResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pct) = env(ENV_TOLERANCE_PCT) {
            match pct.trim().parse::<f64>() {
                Ok(p) => {
                    debug!(tolerance_pct = p, "Overriding tolerance from environment");
                    self.tolerance.percent = p;
                }
                Err(_) => warn!(value = %pct, "Ignoring unparsable {}", ENV_TOLERANCE_PCT),
            }
        }

        if let Some(filter) = env(ENV_LOG) {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "offerline", "offerline")
            .map(|dirs| dirs.config_dir().join("reconcile.toml"))
    }

    /// Returns the configured tolerance percentage.
    pub fn tolerance_pct(&self) -> f64 {
        self.tolerance.percent
    }
}

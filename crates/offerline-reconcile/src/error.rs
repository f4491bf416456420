//! # Reconcile Error Types
//!
//! Error types for configuration and reconciliation runs.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reconcile Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Serialization  │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Serialization  │  │  Core (CoreError)       │ │
//! │  │  ConfigLoad…    │  │                 │  │                         │ │
//! │  │  ConfigSave…    │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use offerline_core::CoreError;
use thiserror::Error;

/// Result type alias for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors raised while configuring or running a reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid reconcile configuration.
    #[error("Invalid reconcile configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// Failed to serialize or deserialize a report or recorded offer.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A line could not be recomputed.
    #[error("Offer line error: {0}")]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ReconcileError {
    fn from(err: std::io::Error) -> Self {
        ReconcileError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ReconcileError {
    fn from(err: toml::de::Error) -> Self {
        ReconcileError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ReconcileError {
    fn from(err: toml::ser::Error) -> Self {
        ReconcileError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ReconcileError {
    fn from(err: serde_json::Error) -> Self {
        ReconcileError::Serialization(err.to_string())
    }
}

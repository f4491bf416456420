//! # offerline-reconcile: Recorded vs Recomputed Offers
//!
//! The outer layer around `offerline-core`. It owns everything the core is
//! not allowed to do: reading config files, installing the tracing
//! subscriber, and producing reconciliation reports.
//!
//! ## Usage
//! ```rust,no_run
//! use offerline_reconcile::{config::ReconcileConfig, logging, reconcile};
//!
//! let config = ReconcileConfig::load_or_default(None);
//! logging::init_from_config(&config);
//!
//! let recorded = reconcile::parse_recorded_offer(r#"[]"#).unwrap();
//! let reconciler = reconcile::Reconciler::from_config(&config).unwrap();
//! let report = reconciler.verify(&recorded).unwrap();
//! println!("{}", report.to_json().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod reconcile;

pub use config::ReconcileConfig;
pub use error::{ReconcileError, ReconcileResult};
pub use reconcile::{LineOutcome, LineReport, ReconcileSummary, Reconciler, ReconciliationReport};

//! # Offer Reconciliation
//!
//! Compares a recorded offer with a recomputed one, line by line.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  recorded (JSON, totals verbatim)      recomputed (fresh valuation)     │
//! │         │                                      │                        │
//! │         └──────────── pair by product id ──────┘                        │
//! │                              │                                          │
//! │                              ▼                                          │
//! │   ==                       → Identical                                  │
//! │   identity key differs     → Mismatched                                 │
//! │   same_as(tolerance)       → WithinTolerance                            │
//! │   otherwise                → Drifted                                    │
//! │                                                                         │
//! │   recorded with no partner → Missing                                    │
//! │   recomputed, no partner   → Unexpected                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use offerline_core::validation::{
    validate_divisor, validate_product_id, validate_product_name, validate_quantity,
    validate_tolerance_pct, ValidationResult,
};
use offerline_core::{CoreError, Money, OfferItem, ProductId};

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, ReconcileResult};

// =============================================================================
// Outcomes
// =============================================================================

/// Result of comparing one recorded line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    /// Every field matches.
    Identical,
    /// Same line, totals differ by less than the tolerance.
    WithinTolerance { recorded: Money, recomputed: Money },
    /// Same line, totals differ by at least the tolerance (or currency).
    Drifted { recorded: Money, recomputed: Money },
    /// Same product id but different name, price, type or quantity.
    Mismatched,
    /// Recorded line with no recomputed counterpart.
    Missing,
    /// Recomputed line with no recorded counterpart.
    Unexpected,
}

impl LineOutcome {
    /// Returns true if the line needs attention.
    pub fn is_discrepancy(&self) -> bool {
        !matches!(self, LineOutcome::Identical | LineOutcome::WithinTolerance { .. })
    }
}

/// One line of a reconciliation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

/// Per-outcome line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub identical: usize,
    pub within_tolerance: usize,
    pub drifted: usize,
    pub mismatched: usize,
    pub missing: usize,
    pub unexpected: usize,
}

/// Full result of a reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub checked_at: DateTime<Utc>,
    pub tolerance_pct: f64,
    pub lines: Vec<LineReport>,
}

impl ReconciliationReport {
    /// True when no line is drifted, mismatched, missing or unexpected.
    pub fn is_consistent(&self) -> bool {
        !self.lines.iter().any(|line| line.outcome.is_discrepancy())
    }

    pub fn summary(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        for line in &self.lines {
            match line.outcome {
                LineOutcome::Identical => summary.identical += 1,
                LineOutcome::WithinTolerance { .. } => summary.within_tolerance += 1,
                LineOutcome::Drifted { .. } => summary.drifted += 1,
                LineOutcome::Mismatched => summary.mismatched += 1,
                LineOutcome::Missing => summary.missing += 1,
                LineOutcome::Unexpected => summary.unexpected += 1,
            }
        }
        summary
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> ReconcileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Restores a recorded offer from JSON, keeping every stored total verbatim.
///
/// Every line must pass the business-rule validators: a recording with a
/// blank name, malformed product id, out-of-range quantity or non-positive
/// divisor is rejected as a whole.
pub fn parse_recorded_offer(json: &str) -> ReconcileResult<Vec<OfferItem>> {
    let lines: Vec<OfferItem> =
        serde_json::from_str(json).map_err(|e| ReconcileError::Serialization(e.to_string()))?;

    for (index, line) in lines.iter().enumerate() {
        if let Err(e) = validate_recorded_line(line) {
            warn!(
                index,
                product_id = %line.product().id(),
                error = %e,
                "Invalid recorded offer line"
            );
            return Err(CoreError::from(e).into());
        }
    }

    Ok(lines)
}

fn validate_recorded_line(line: &OfferItem) -> ValidationResult<()> {
    validate_product_name(line.product().name())?;
    validate_product_id(line.product().id().as_str())?;
    validate_quantity(line.quantity())?;
    if let Some(divisor) = line.discount().divisor_value() {
        validate_divisor(divisor)?;
    }
    Ok(())
}

// =============================================================================
// Reconciler
// =============================================================================

/// Compares offers using a fixed tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    tolerance_pct: f64,
}

impl Reconciler {
    /// Creates a reconciler. The tolerance must be finite and within 0..=100.
    pub fn new(tolerance_pct: f64) -> ReconcileResult<Self> {
        validate_tolerance_pct(tolerance_pct)
            .map_err(|e| ReconcileError::InvalidConfig(e.to_string()))?;
        Ok(Reconciler { tolerance_pct })
    }

    pub fn from_config(config: &ReconcileConfig) -> ReconcileResult<Self> {
        Self::new(config.tolerance_pct())
    }

    pub fn tolerance_pct(&self) -> f64 {
        self.tolerance_pct
    }

    /// Compares one recorded line with its recomputed counterpart.
    pub fn compare(&self, recorded: &OfferItem, recomputed: &OfferItem) -> LineOutcome {
        if recorded == recomputed {
            return LineOutcome::Identical;
        }
        if recorded.identity_key() != recomputed.identity_key() {
            return LineOutcome::Mismatched;
        }

        let totals = (*recorded.total_cost(), *recomputed.total_cost());
        if recorded.same_as(recomputed, self.tolerance_pct) {
            LineOutcome::WithinTolerance {
                recorded: totals.0,
                recomputed: totals.1,
            }
        } else {
            LineOutcome::Drifted {
                recorded: totals.0,
                recomputed: totals.1,
            }
        }
    }

    /// Reconciles two offers, pairing lines by product id in order.
    pub fn reconcile(
        &self,
        recorded: &[OfferItem],
        recomputed: &[OfferItem],
    ) -> ReconciliationReport {
        let mut paired = vec![false; recomputed.len()];
        let mut lines = Vec::with_capacity(recorded.len().max(recomputed.len()));

        for line in recorded {
            let product_id = line.product().id();
            let partner = (0..recomputed.len())
                .find(|&i| !paired[i] && recomputed[i].product().id() == product_id);

            let outcome = match partner {
                Some(i) => {
                    paired[i] = true;
                    self.compare(line, &recomputed[i])
                }
                None => LineOutcome::Missing,
            };

            match &outcome {
                LineOutcome::Drifted {
                    recorded,
                    recomputed,
                } => warn!(
                    %product_id,
                    %recorded,
                    %recomputed,
                    tolerance_pct = self.tolerance_pct,
                    "Offer line total drifted"
                ),
                other if other.is_discrepancy() => {
                    warn!(%product_id, outcome = ?other, "Offer line discrepancy")
                }
                other => debug!(%product_id, outcome = ?other, "Offer line reconciled"),
            }

            lines.push(LineReport {
                product_id: product_id.clone(),
                outcome,
            });
        }

        for (line, _) in recomputed.iter().zip(&paired).filter(|(_, used)| !**used) {
            warn!(product_id = %line.product().id(), "Unexpected recomputed offer line");
            lines.push(LineReport {
                product_id: line.product().id().clone(),
                outcome: LineOutcome::Unexpected,
            });
        }

        let report = ReconciliationReport {
            checked_at: Utc::now(),
            tolerance_pct: self.tolerance_pct,
            lines,
        };

        let summary = report.summary();
        info!(
            lines = report.lines.len(),
            drifted = summary.drifted,
            missing = summary.missing,
            unexpected = summary.unexpected,
            consistent = report.is_consistent(),
            "Offer reconciliation finished"
        );

        report
    }

    /// Recomputes every recorded line from its own product, quantity and
    /// discount, then reconciles the recording against the result.
    pub fn verify(&self, recorded: &[OfferItem]) -> ReconcileResult<ReconciliationReport> {
        let recomputed = recorded
            .iter()
            .map(|line| {
                OfferItem::with_discount(
                    Arc::clone(line.product()),
                    line.quantity(),
                    line.discount(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.reconcile(recorded, &recomputed))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

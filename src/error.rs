//! Error taxonomy for the core (§7 of the spec). The core never silently
//! degrades: every failure mode is a distinct, typed variant that carries
//! enough context for an operator-facing caller to act on.

use thiserror::Error;

use crate::diagnose::SlotDiagnosis;

/// A store-backed failure, defined by whatever persistence layer is plugged
/// in behind [`crate::store::Store`]. The core only ever wraps and
/// propagates this; it never retries.
#[derive(Debug, Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

/// The closed set of ways a core operation can fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A slot label did not parse as `HH:MM` within the operating day.
    #[error("malformed time label: {0}")]
    BadTimeLabel(String),

    /// The staff roster was empty at solve time. Not an infeasibility: there
    /// was no problem to solve in the first place.
    #[error("no staff registered for this day")]
    NoStaff,

    /// The constraint system has no solution. Carries the diagnoser's
    /// per-slot report so the caller can render actionable guidance.
    #[error("no feasible assignment exists for this day ({} slot(s) implicated)", self.0.len())]
    Infeasible(Vec<SlotDiagnosis>),

    /// The solver exhausted its time budget without a feasible incumbent,
    /// or failed internally.
    #[error("solver returned no usable result: {0}")]
    Unknown(String),

    /// Transient I/O against the backing store.
    #[error(transparent)]
    StoreFailure(#[from] StoreError),
}

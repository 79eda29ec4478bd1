//! The persistence port (§10). The core only ever reads through this trait;
//! it never writes and never assumes a particular backend. Modelled on the
//! async service-trait-plus-mock convention this lineage uses for every
//! boundary it doesn't own.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{AvailabilityWindow, DaySlotDemand, Staff, WeekdaySlotDemand};
use crate::error::StoreError;

/// Read-only access to the four logical tables the core depends on: staff,
/// availability, demand overrides, and demand templates. Ownership of the
/// actual storage (SQL, files, in-memory) lives entirely in the embedding
/// application.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// The full staff roster, in stable id order.
    async fn staff(&self) -> Result<Vec<Staff>, StoreError>;

    /// Every availability window recorded for `date`, at most one per
    /// staff member.
    async fn availability_for_date(&self, date: NaiveDate) -> Result<Vec<AvailabilityWindow>, StoreError>;

    /// Per-date demand overrides, at most one per slot.
    async fn demand_overrides_for_date(&self, date: NaiveDate) -> Result<Vec<DaySlotDemand>, StoreError>;

    /// Per-weekday demand template entries, at most one per slot.
    async fn demand_template_for_weekday(&self, weekday: u8) -> Result<Vec<WeekdaySlotDemand>, StoreError>;
}

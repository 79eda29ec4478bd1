//! Core entities (§3). These are the shapes the store hands to the core and
//! the core hands back; the core never persists any of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::N_SLOTS;

/// A staff member. Only `id` and the two role flags are ever inspected by
/// the solver; `name` rides along purely for projection (§4.6) and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: u64,
    pub name: String,
    pub is_key_person: bool,
    pub is_newbie: bool,
}

impl Staff {
    pub fn role_label(&self) -> RoleLabel {
        match (self.is_key_person, self.is_newbie) {
            (true, true) => RoleLabel::KeyPersonAndNewbie,
            (true, false) => RoleLabel::KeyPerson,
            (false, true) => RoleLabel::Newbie,
            (false, false) => RoleLabel::Regular,
        }
    }
}

/// Derived from the two boolean flags on [`Staff`] for display purposes
/// (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleLabel {
    KeyPersonAndNewbie,
    KeyPerson,
    Newbie,
    Regular,
}

/// A staff member's declared start/end window for one date. Half-open
/// `[start_slot, end_slot)`; at most one of these exists per (staff, date)
/// in the store, enforced there by a unique constraint and upsert
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub staff_id: u64,
    pub date: NaiveDate,
    pub start_slot: usize,
    pub end_slot: usize,
}

impl AvailabilityWindow {
    /// `true` iff this window is internally consistent (`end > start`,
    /// both within the slot index space). The core assumes the store has
    /// already enforced this; this exists for callers building
    /// fixtures/tests, not for defensive re-validation on the read path.
    pub fn is_valid(&self) -> bool {
        self.end_slot > self.start_slot && self.end_slot <= N_SLOTS
    }
}

/// `0 <= min <= target <= max`, the per-slot headcount bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandTriple {
    pub min: u32,
    pub target: u32,
    pub max: u32,
}

impl DemandTriple {
    pub fn is_valid(&self) -> bool {
        self.min <= self.target && self.target <= self.max
    }
}

/// A per-date override of the demand triple for one slot. At most one per
/// (date, slot); absence falls through to the weekday template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlotDemand {
    pub date: NaiveDate,
    pub slot_index: usize,
    pub demand: DemandTriple,
}

/// A weekday-level template entry for one slot. `weekday` is `0..=6`
/// (Monday = 0, following [`chrono::Weekday::num_days_from_monday`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySlotDemand {
    pub weekday: u8,
    pub slot_index: usize,
    pub demand: DemandTriple,
}

/// The output of a solve: `assigned[i][s] = true` iff staff position `i` is
/// scheduled for slot `s`. Ephemeral; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub assigned: Vec<Vec<bool>>,
}

impl Assignment {
    pub fn slots_for(&self, staff_index: usize) -> usize {
        self.assigned[staff_index].iter().filter(|&&a| a).count()
    }
}

/// A single contiguous `[start_slot, end_slot)` interval produced by §4.6,
/// annotated with enough staff context for downstream rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInterval {
    pub staff_id: u64,
    pub name: String,
    pub role: RoleLabel,
    pub start_slot: usize,
    pub end_slot: usize,
}

//! Infeasibility diagnoser (§4.5): an independent, non-optimisation pass
//! that pinpoints per-slot root causes by counting availability. It never
//! invokes the solver, so it stays O(staff * slots) and predictable even
//! when the solver itself would time out.
//!
//! This is a necessary-conditions check: an empty report does not prove
//! feasibility. Contiguity and minimum-shift-length infeasibilities are
//! deliberately not diagnosed here; they only surface via the solver's
//! `Unknown`/infeasible status.

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::instance::DayInstance;
use crate::time::{slot_to_label, N_SLOTS};

/// The root cause attributed to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    /// Fewer staff are available than the minimum headcount requires.
    InsufficientAvailable { required: u32, available: u32 },
    /// At least the minimum headcount is available, but no key-person is
    /// among them.
    NoKeyPersonAvailable,
    /// Even admitting every available non-newbie plus the newbie cap, the
    /// minimum headcount cannot be reached.
    NewbieCapBlocksMinimum { cap: u32 },
}

/// One diagnosed slot: its display label range and the attributed cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDiagnosis {
    pub slot_index: usize,
    pub start_label: String,
    pub end_label: String,
    pub cause: Cause,
}

/// Runs the diagnoser over `instance`, reporting one entry per slot whose
/// minimum headcount cannot possibly be met on availability grounds alone.
pub fn diagnose(instance: &DayInstance, config: &SolverConfig) -> Vec<SlotDiagnosis> {
    let mut issues = Vec::new();

    for s in 0..N_SLOTS {
        let required = instance.demand[s].min;
        if required == 0 {
            continue;
        }

        let total: u32 = (0..instance.staff_count()).filter(|&i| instance.avail[i][s]).count() as u32;
        let keys: u32 = (0..instance.staff_count())
            .filter(|&i| instance.avail[i][s] && instance.staff[i].is_key_person)
            .count() as u32;
        let newbies: u32 = (0..instance.staff_count())
            .filter(|&i| instance.avail[i][s] && instance.staff[i].is_newbie)
            .count() as u32;

        let cause = if total < required {
            Some(Cause::InsufficientAvailable { required, available: total })
        } else if keys == 0 {
            Some(Cause::NoKeyPersonAvailable)
        } else {
            let cap = (total - newbies) + newbies.min(config.newbie_max_per_slot);
            if cap < required {
                Some(Cause::NewbieCapBlocksMinimum { cap })
            } else {
                None
            }
        };

        if let Some(cause) = cause {
            let start_label = slot_to_label(s).expect("slot index always valid");
            let end_label = if s + 1 < N_SLOTS {
                slot_to_label(s + 1).expect("slot index always valid")
            } else {
                "29:30".to_string()
            };
            issues.push(SlotDiagnosis { slot_index: s, start_label, end_label, cause });
        }
    }

    issues
}

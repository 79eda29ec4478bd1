//! Three-level effective-demand resolver (§4.2): per-date override, then
//! per-weekday template, then the configured default.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::domain::{DaySlotDemand, DemandTriple, WeekdaySlotDemand};
use crate::error::StoreError;
use crate::store::Store;
use crate::time::N_SLOTS;

/// Which tier of the resolver actually supplied the values returned from
/// [`effective_demand`]. Informational only — the solver never reads this,
/// it exists purely for the operator-facing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandSource {
    Override,
    Template,
    Default,
}

/// The resolved `(min, target, max)` for every slot of one day.
pub type DemandTable = [DemandTriple; N_SLOTS];

/// Resolves the effective demand table for `date`: for each slot, prefer a
/// date override, fall back to the weekday template, and otherwise use
/// `config.default_demand`.
pub async fn effective_demand(
    store: &dyn Store,
    date: NaiveDate,
    config: &SolverConfig,
) -> Result<(DemandTable, DemandSource), StoreError> {
    let overrides = store.demand_overrides_for_date(date).await?;
    let weekday = date.weekday().num_days_from_monday() as u8;
    let template = store.demand_template_for_weekday(weekday).await?;

    let mut table = [config.default_demand; N_SLOTS];
    let mut from_template = [false; N_SLOTS];
    for entry in &template {
        if entry.slot_index < N_SLOTS {
            table[entry.slot_index] = entry.demand;
            from_template[entry.slot_index] = true;
        }
    }
    let mut from_override = [false; N_SLOTS];
    for entry in &overrides {
        if entry.slot_index < N_SLOTS {
            table[entry.slot_index] = entry.demand;
            from_override[entry.slot_index] = true;
        }
    }

    let source = if from_override.iter().any(|&b| b) {
        DemandSource::Override
    } else if from_template.iter().any(|&b| b) {
        DemandSource::Template
    } else {
        DemandSource::Default
    };

    Ok((table, source))
}

/// Helper for constructing a [`DaySlotDemand`] row without repeating the
/// field names at every call site (demo data, tests).
pub fn day_override(date: NaiveDate, slot_index: usize, demand: DemandTriple) -> DaySlotDemand {
    DaySlotDemand { date, slot_index, demand }
}

/// Same convenience for [`WeekdaySlotDemand`].
pub fn weekday_template(weekday: u8, slot_index: usize, demand: DemandTriple) -> WeekdaySlotDemand {
    WeekdaySlotDemand { weekday, slot_index, demand }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockStore;
    use chrono::NaiveDate;

    fn triple(min: u32, target: u32, max: u32) -> DemandTriple {
        DemandTriple { min, target, max }
    }

    #[tokio::test]
    async fn falls_through_to_default_when_nothing_configured() {
        let mut store = MockStore::new();
        store.expect_demand_overrides_for_date().returning(|_| Ok(vec![]));
        store.expect_demand_template_for_weekday().returning(|_| Ok(vec![]));

        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let config = SolverConfig::default();
        let (table, source) = effective_demand(&store, date, &config).await.unwrap();

        assert_eq!(source, DemandSource::Default);
        assert!(table.iter().all(|&t| t == config.default_demand));
    }

    #[tokio::test]
    async fn template_wins_over_default_but_not_override() {
        let mut store = MockStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let weekday = date.weekday().num_days_from_monday() as u8;

        store.expect_demand_overrides_for_date().returning(move |d| {
            assert_eq!(d, date);
            Ok(vec![day_override(d, 0, triple(1, 1, 1))])
        });
        store.expect_demand_template_for_weekday().returning(move |w| {
            assert_eq!(w, weekday);
            Ok(vec![weekday_template(w, 0, triple(5, 5, 5)), weekday_template(w, 1, triple(2, 2, 2))])
        });

        let config = SolverConfig::default();
        let (table, source) = effective_demand(&store, date, &config).await.unwrap();

        assert_eq!(source, DemandSource::Override);
        assert_eq!(table[0], triple(1, 1, 1));
        assert_eq!(table[1], triple(2, 2, 2));
        assert_eq!(table[2], config.default_demand);
    }

    #[tokio::test]
    async fn totality_holds_for_every_slot() {
        let mut store = MockStore::new();
        store.expect_demand_overrides_for_date().returning(|_| Ok(vec![]));
        store.expect_demand_template_for_weekday().returning(|_| Ok(vec![]));

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let (table, _) = effective_demand(&store, date, &SolverConfig::default()).await.unwrap();
        assert_eq!(table.len(), N_SLOTS);
    }
}

//! Day input assembler (§4.3): joins the staff roster, availability, and
//! effective demand for one date into a compact, solver-ready instance.

use chrono::NaiveDate;

use crate::config::SolverConfig;
use crate::demand::{effective_demand, DemandSource, DemandTable};
use crate::domain::Staff;
use crate::error::StoreError;
use crate::store::Store;
use crate::time::N_SLOTS;

/// Everything the model builder needs for one operating day: the roster,
/// its availability mask, and the resolved demand table.
#[derive(Debug, Clone)]
pub struct DayInstance {
    pub date: NaiveDate,
    pub staff: Vec<Staff>,
    /// `avail[i][s]` is `true` iff staff position `i` is available in slot
    /// `s`. Staff with no availability window on `date` get an all-false
    /// row rather than being dropped, so the solver keeps a stable index
    /// space.
    pub avail: Vec<[bool; N_SLOTS]>,
    pub demand: DemandTable,
    pub demand_source: DemandSource,
}

impl DayInstance {
    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    /// Count of available slots for staff position `i` (`N_i` in the
    /// model builder's big-M bounds).
    pub fn available_slot_count(&self, staff_index: usize) -> usize {
        self.avail[staff_index].iter().filter(|&&a| a).count()
    }
}

/// Assembles a [`DayInstance`] for `date` by joining the store's staff,
/// availability, and demand tables.
pub async fn build_instance(
    store: &dyn Store,
    date: NaiveDate,
    config: &SolverConfig,
) -> Result<DayInstance, StoreError> {
    let staff = store.staff().await?;
    let windows = store.availability_for_date(date).await?;
    let (demand, demand_source) = effective_demand(store, date, config).await?;

    let mut avail: Vec<[bool; N_SLOTS]> = vec![[false; N_SLOTS]; staff.len()];
    let index_by_id: std::collections::HashMap<u64, usize> =
        staff.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

    for window in &windows {
        let Some(&i) = index_by_id.get(&window.staff_id) else { continue };
        if !window.is_valid() {
            debug_assert!(false, "corrupt availability window for staff {}", window.staff_id);
            continue;
        }
        for s in window.start_slot..window.end_slot.min(N_SLOTS) {
            avail[i][s] = true;
        }
    }

    Ok(DayInstance { date, staff, avail, demand, demand_source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{day_override, weekday_template};
    use crate::domain::{AvailabilityWindow, DemandTriple};
    use crate::store::MockStore;

    fn staff(id: u64, name: &str, key: bool, newbie: bool) -> Staff {
        Staff { id, name: name.to_string(), is_key_person: key, is_newbie: newbie }
    }

    #[tokio::test]
    async fn staff_without_availability_gets_all_false_row() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let mut store = MockStore::new();
        store.expect_staff().returning(move || Ok(vec![staff(1, "A", true, false), staff(2, "B", false, false)]));
        store.expect_availability_for_date().returning(move |_| {
            Ok(vec![AvailabilityWindow { staff_id: 1, date, start_slot: 0, end_slot: 12 }])
        });
        store.expect_demand_overrides_for_date().returning(|_| Ok(vec![]));
        store.expect_demand_template_for_weekday().returning(|_| Ok(vec![]));

        let instance = build_instance(&store, date, &SolverConfig::default()).await.unwrap();

        assert_eq!(instance.staff_count(), 2);
        assert_eq!(instance.available_slot_count(0), 12);
        assert_eq!(instance.available_slot_count(1), 0);
        assert!(instance.avail[1].iter().all(|&a| !a));
    }

    #[tokio::test]
    async fn demand_resolution_is_threaded_through() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let mut store = MockStore::new();
        store.expect_staff().returning(|| Ok(vec![]));
        store.expect_availability_for_date().returning(|_| Ok(vec![]));
        store.expect_demand_overrides_for_date().returning(move |d| Ok(vec![day_override(d, 3, DemandTriple { min: 1, target: 1, max: 1 })]));
        store.expect_demand_template_for_weekday().returning(|w| Ok(vec![weekday_template(w, 0, DemandTriple { min: 0, target: 0, max: 0 })]));

        let instance = build_instance(&store, date, &SolverConfig::default()).await.unwrap();
        assert_eq!(instance.demand_source, DemandSource::Override);
        assert_eq!(instance.demand[3], DemandTriple { min: 1, target: 1, max: 1 });
    }
}

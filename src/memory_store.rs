//! A bare in-memory [`Store`] implementation. The core is storage-agnostic
//! (§10); this is the one concrete backend this binary ships with, good
//! enough for the demo data sets and for exercising the HTTP surface without
//! standing up a database.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::domain::{AvailabilityWindow, DaySlotDemand, Staff, WeekdaySlotDemand};
use crate::error::StoreError;
use crate::store::Store;

/// Everything an [`InMemoryStore`] holds, held by value so the whole thing
/// can be swapped out atomically (e.g. when the operator loads a new demo
/// data set).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    staff: Vec<Staff>,
    availability: Vec<AvailabilityWindow>,
    overrides: Vec<DaySlotDemand>,
    templates: Vec<WeekdaySlotDemand>,
}

impl InMemoryStore {
    pub fn new(
        staff: Vec<Staff>,
        availability: Vec<AvailabilityWindow>,
        overrides: Vec<DaySlotDemand>,
        templates: Vec<WeekdaySlotDemand>,
    ) -> Self {
        Self { staff, availability, overrides, templates }
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn staff(&self) -> Result<Vec<Staff>, StoreError> {
        Ok(self.staff.clone())
    }

    async fn availability_for_date(&self, date: NaiveDate) -> Result<Vec<AvailabilityWindow>, StoreError> {
        Ok(self.availability.iter().filter(|w| w.date == date).copied().collect())
    }

    async fn demand_overrides_for_date(&self, date: NaiveDate) -> Result<Vec<DaySlotDemand>, StoreError> {
        Ok(self.overrides.iter().filter(|o| o.date == date).copied().collect())
    }

    async fn demand_template_for_weekday(&self, weekday: u8) -> Result<Vec<WeekdaySlotDemand>, StoreError> {
        Ok(self.templates.iter().filter(|t| t.weekday == weekday).copied().collect())
    }
}

/// Convenience: the weekday index §4.2 expects (`Monday = 0`) for a date.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DemandTriple;

    #[tokio::test]
    async fn filters_by_date_and_weekday() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let staff = vec![Staff { id: 1, name: "A".into(), is_key_person: true, is_newbie: false }];
        let availability = vec![
            AvailabilityWindow { staff_id: 1, date, start_slot: 0, end_slot: 10 },
            AvailabilityWindow { staff_id: 1, date: other_date, start_slot: 0, end_slot: 5 },
        ];
        let demand = DemandTriple { min: 1, target: 1, max: 1 };
        let overrides = vec![DaySlotDemand { date, slot_index: 0, demand }];
        let templates = vec![WeekdaySlotDemand { weekday: weekday_index(date), slot_index: 1, demand }];

        let store = InMemoryStore::new(staff, availability, overrides, templates);

        assert_eq!(store.availability_for_date(date).await.unwrap().len(), 1);
        assert_eq!(store.demand_overrides_for_date(date).await.unwrap().len(), 1);
        assert_eq!(store.demand_overrides_for_date(other_date).await.unwrap().len(), 0);
        assert_eq!(store.demand_template_for_weekday(weekday_index(date)).await.unwrap().len(), 1);
    }
}

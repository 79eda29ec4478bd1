//! Demo data generators. Produces a synthetic staff roster, a few weeks of
//! availability windows, and a per-weekday demand template, so the HTTP
//! surface and the scenario tests have something to solve against without a
//! real store plugged in.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{AvailabilityWindow, DaySlotDemand, DemandTriple, Staff, WeekdaySlotDemand};
use crate::time::N_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }

    fn parameters(&self) -> DemoDataParameters {
        match self {
            DemoData::Small => DemoDataParameters {
                staff_count: 8,
                key_person_count: 2,
                newbie_count: 2,
                weeks_of_availability: 2,
                window_length_distribution: vec![(10, 3.0), (16, 2.0), (25, 1.0)],
            },
            DemoData::Large => DemoDataParameters {
                staff_count: 30,
                key_person_count: 6,
                newbie_count: 8,
                weeks_of_availability: 4,
                window_length_distribution: vec![(10, 2.0), (16, 3.0), (25, 2.0)],
            },
        }
    }
}

struct DemoDataParameters {
    staff_count: usize,
    key_person_count: usize,
    newbie_count: usize,
    weeks_of_availability: i64,
    /// Weighted distribution over how many slots long a staff member's daily
    /// availability window is.
    window_length_distribution: Vec<(usize, f64)>,
}

/// Everything [`generate`] produces for one demo size: a roster, its
/// availability across a few weeks, and a demand template per weekday.
/// There are deliberately no per-date overrides in the canned data — those
/// exist to let an operator nudge a single day, which a generator has no
/// reason to do on its own.
pub struct DemoDataset {
    pub staff: Vec<Staff>,
    pub availability: Vec<AvailabilityWindow>,
    pub weekday_templates: Vec<WeekdaySlotDemand>,
    pub overrides: Vec<DaySlotDemand>,
    /// The first date the generated availability actually covers, handed
    /// back so callers have something sane to solve by default.
    pub anchor_date: NaiveDate,
}

pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Generates a demo data set for the given size. Deterministic: always
/// seeded from the same value, so repeated calls (and the tests below) see
/// identical output.
pub fn generate(demo: DemoData) -> DemoDataset {
    let params = demo.parameters();
    let mut rng = StdRng::seed_from_u64(0);

    let anchor_date = find_next_monday(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

    let name_permutations = generate_name_permutations(&mut rng);
    let mut staff = Vec::with_capacity(params.staff_count);
    for i in 0..params.staff_count {
        let id = i as u64 + 1;
        let name = name_permutations[i % name_permutations.len()].clone();
        let is_key_person = i < params.key_person_count;
        let is_newbie = !is_key_person && i < params.key_person_count + params.newbie_count;
        staff.push(Staff { id, name, is_key_person, is_newbie });
    }

    let mut availability = Vec::new();
    let days = params.weeks_of_availability * 7;
    for day in 0..days {
        let date = anchor_date + Duration::days(day);
        for member in &staff {
            // Roughly 5 of every 7 days, a staff member declares a window.
            if rng.gen_bool(5.0 / 7.0) {
                let length = pick_count(&mut rng, &params.window_length_distribution).min(N_SLOTS);
                let latest_start = N_SLOTS - length;
                let start_slot = rng.gen_range(0..=latest_start);
                availability.push(AvailabilityWindow {
                    staff_id: member.id,
                    date,
                    start_slot,
                    end_slot: start_slot + length,
                });
            }
        }
    }

    let weekday_templates = weekday_demand_templates();

    DemoDataset { staff, availability, weekday_templates, overrides: Vec::new(), anchor_date }
}

/// Builds one demand curve per weekday: a midday bulge on weekdays, a flatter
/// and slightly higher curve on weekends.
fn weekday_demand_templates() -> Vec<WeekdaySlotDemand> {
    let mut out = Vec::with_capacity(7 * N_SLOTS);
    for weekday in 0..7u8 {
        let is_weekend = weekday == Weekday::Sat.num_days_from_monday() as u8
            || weekday == Weekday::Sun.num_days_from_monday() as u8;
        for slot in 0..N_SLOTS {
            let demand = demand_curve(slot, is_weekend);
            out.push(WeekdaySlotDemand { weekday, slot_index: slot, demand });
        }
    }
    out
}

/// A simple bell-shaped demand curve over the operating day, peaking around
/// the dinner slots (roughly slot 8, i.e. 21:00).
fn demand_curve(slot: usize, is_weekend: bool) -> DemandTriple {
    let peak = 8.0;
    let width = 7.0;
    let distance = (slot as f64 - peak).abs();
    let shape = (1.0 - (distance / width).min(1.0)).max(0.0);
    let base = if is_weekend { 1.0 } else { 0.0 };
    let target = (base + shape * 4.0).round() as u32;
    let min = target.saturating_sub(1).max(if target == 0 { 0 } else { 1 });
    let max = target + 2;
    DemandTriple { min, target, max }
}

fn find_next_monday(date: NaiveDate) -> NaiveDate {
    let days_until_monday = match date.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 6,
        Weekday::Wed => 5,
        Weekday::Thu => 4,
        Weekday::Fri => 3,
        Weekday::Sat => 2,
        Weekday::Sun => 1,
    };
    date + Duration::days(days_until_monday)
}

fn pick_count(rng: &mut StdRng, distribution: &[(usize, f64)]) -> usize {
    let total_weight: f64 = distribution.iter().map(|(_, w)| w).sum();
    let mut choice = rng.gen::<f64>() * total_weight;

    for (count, weight) in distribution {
        if choice < *weight {
            return *count;
        }
        choice -= weight;
    }
    distribution.last().map(|(c, _)| *c).unwrap_or(6)
}

const FIRST_NAMES: &[&str] = &[
    "Amy", "Beth", "Carl", "Dan", "Elsa", "Flo", "Gus", "Hugo", "Ivy", "Jay",
];
const LAST_NAMES: &[&str] = &[
    "Cole", "Fox", "Green", "Jones", "King", "Li", "Poe", "Rye", "Smith", "Watt",
];

fn generate_name_permutations(rng: &mut StdRng) -> Vec<String> {
    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push(format!("{} {}", first, last));
        }
    }
    names.shuffle(rng);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_small() {
        let dataset = generate(DemoData::Small);
        assert_eq!(dataset.staff.len(), 8);
        assert!(!dataset.availability.is_empty());
        assert_eq!(dataset.weekday_templates.len(), 7 * N_SLOTS);
    }

    #[test]
    fn test_generate_large() {
        let dataset = generate(DemoData::Large);
        assert_eq!(dataset.staff.len(), 30);
        assert!(dataset.availability.len() > generate(DemoData::Small).availability.len());
    }

    #[test]
    fn test_roles_are_disjoint_and_bounded() {
        let dataset = generate(DemoData::Small);
        let key_count = dataset.staff.iter().filter(|s| s.is_key_person).count();
        let newbie_count = dataset.staff.iter().filter(|s| s.is_newbie).count();
        assert_eq!(key_count, 2);
        assert_eq!(newbie_count, 2);
        assert!(dataset.staff.iter().all(|s| !(s.is_key_person && s.is_newbie)));
    }

    #[test]
    fn test_availability_windows_are_valid() {
        let dataset = generate(DemoData::Small);
        for window in &dataset.availability {
            assert!(window.is_valid());
        }
    }

    #[test]
    fn test_demand_templates_are_internally_consistent() {
        let dataset = generate(DemoData::Large);
        for entry in &dataset.weekday_templates {
            assert!(entry.demand.is_valid(), "{:?} fails min<=target<=max", entry);
        }
    }

    #[test]
    fn test_demo_data_from_str() {
        assert_eq!("SMALL".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("small".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("LARGE".parse::<DemoData>(), Ok(DemoData::Large));
        assert!("invalid".parse::<DemoData>().is_err());
    }

    #[test]
    fn test_deterministic() {
        let a = generate(DemoData::Small);
        let b = generate(DemoData::Small);
        assert_eq!(a.staff, b.staff);
        assert_eq!(a.availability, b.availability);
    }
}

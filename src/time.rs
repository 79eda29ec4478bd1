//! Mapping between wall-clock slot labels and the 25-slot index space of a
//! single operating day (17:00 through 29:30, i.e. 05:30 the next calendar
//! day).

use chrono::NaiveDate;

use crate::error::CoreError;

/// Number of 30-minute slots in the operating day.
pub const N_SLOTS: usize = 25;

/// Parses a label of the form `HH:MM` with `HH` in `17..=29` and `MM` in
/// `{00, 30}` into its 0-based slot index.
pub fn label_to_slot(label: &str) -> Result<usize, CoreError> {
    let (hh, mm) = split_label(label)?;
    let hour_offset = match hh {
        17..=23 => hh - 17,
        24..=29 => hh - 24 + 7,
        _ => return Err(CoreError::BadTimeLabel(label.to_string())),
    };
    let half = match mm {
        0 => 0,
        30 => 1,
        _ => return Err(CoreError::BadTimeLabel(label.to_string())),
    };
    let slot = hour_offset * 2 + half;
    if slot >= N_SLOTS {
        return Err(CoreError::BadTimeLabel(label.to_string()));
    }
    Ok(slot)
}

/// Inverse of [`label_to_slot`] for `slot_index` in `0..N_SLOTS`.
pub fn slot_to_label(slot_index: usize) -> Result<String, CoreError> {
    if slot_index >= N_SLOTS {
        return Err(CoreError::BadTimeLabel(format!("slot {slot_index}")));
    }
    let hour_offset = slot_index / 2;
    let half = slot_index % 2;
    let hh = 17 + hour_offset;
    let mm = if half == 0 { 0 } else { 30 };
    Ok(format!("{hh:02}:{mm:02}"))
}

/// Converts a display label (`HH` in `17..=29`) into the calendar date it
/// actually falls on and the wall-clock `HH:MM` within that date, rolling
/// hours `>= 24` over to the following day.
pub fn label_to_wallclock(date: NaiveDate, label: &str) -> Result<(NaiveDate, String), CoreError> {
    let (hh, mm) = split_label(label)?;
    if !(17..=29).contains(&hh) {
        return Err(CoreError::BadTimeLabel(label.to_string()));
    }
    if hh >= 24 {
        let next_day = date.succ_opt().ok_or_else(|| CoreError::BadTimeLabel(label.to_string()))?;
        Ok((next_day, format!("{:02}:{mm:02}", hh - 24)))
    } else {
        Ok((date, format!("{hh:02}:{mm:02}")))
    }
}

/// Converts a slot index into the on-disk storage label convention: hours
/// `24..29` are stored as `00:00..05:00` rather than the display form
/// `24:00..29:00` (see §10 of the spec).
pub fn slot_to_storage_label(slot_index: usize) -> Result<String, CoreError> {
    let display = slot_to_label(slot_index)?;
    let (hh, mm) = split_label(&display)?;
    let stored_hh = if hh >= 24 { hh - 24 } else { hh };
    Ok(format!("{stored_hh:02}:{mm:02}"))
}

/// Parses a storage-convention label (`00:00..05:00` or `17:00..23:30`) back
/// into a slot index, rolling hours `0..=5` up to the `24..=29` display range
/// before delegating to [`label_to_slot`].
pub fn storage_label_to_slot(label: &str) -> Result<usize, CoreError> {
    let (hh, mm) = split_label(label)?;
    let display_hh = if hh <= 5 { hh + 24 } else { hh };
    label_to_slot(&format!("{display_hh:02}:{mm:02}"))
}

fn split_label(label: &str) -> Result<(u32, u32), CoreError> {
    let (h, m) = label
        .split_once(':')
        .ok_or_else(|| CoreError::BadTimeLabel(label.to_string()))?;
    let hh: u32 = h.parse().map_err(|_| CoreError::BadTimeLabel(label.to_string()))?;
    let mm: u32 = m.parse().map_err(|_| CoreError::BadTimeLabel(label.to_string()))?;
    Ok((hh, mm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_slots() {
        for slot in 0..N_SLOTS {
            let label = slot_to_label(slot).unwrap();
            assert_eq!(label_to_slot(&label).unwrap(), slot);
        }
    }

    #[test]
    fn boundary_labels() {
        assert_eq!(label_to_slot("17:00").unwrap(), 0);
        assert_eq!(label_to_slot("29:30").unwrap_err().to_string().contains("29:30"), true);
        assert_eq!(label_to_slot("29:00").unwrap(), 24);
        assert_eq!(slot_to_label(0).unwrap(), "17:00");
        assert_eq!(slot_to_label(24).unwrap(), "29:00");
    }

    #[test]
    fn rejects_malformed() {
        assert!(label_to_slot("nonsense").is_err());
        assert!(label_to_slot("17:15").is_err());
        assert!(label_to_slot("16:00").is_err());
    }

    #[test]
    fn wallclock_rolls_over_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let (d, hm) = label_to_wallclock(date, "17:00").unwrap();
        assert_eq!(d, date);
        assert_eq!(hm, "17:00");

        let (d, hm) = label_to_wallclock(date, "24:30").unwrap();
        assert_eq!(d, date.succ_opt().unwrap());
        assert_eq!(hm, "00:30");
    }

    #[test]
    fn storage_label_round_trip() {
        for slot in 0..N_SLOTS {
            let stored = slot_to_storage_label(slot).unwrap();
            assert_eq!(storage_label_to_slot(&stored).unwrap(), slot);
        }
        assert_eq!(slot_to_storage_label(14).unwrap(), "00:00");
        assert_eq!(slot_to_storage_label(24).unwrap(), "05:00");
    }
}

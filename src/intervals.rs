//! Result projection (§4.6): turns the assignment matrix into per-staff
//! contiguous intervals for downstream visualisation/export. By
//! construction of the contiguity constraint (§4.4), each staff member has
//! at most one such interval.

use crate::domain::{Assignment, Staff, StaffInterval};
use crate::time::N_SLOTS;

/// Scans `assignment` and emits one [`StaffInterval`] per staff member with
/// any assigned slot.
pub fn build_intervals(assignment: &Assignment, staff: &[Staff]) -> Vec<StaffInterval> {
    let mut intervals = Vec::new();

    for (i, member) in staff.iter().enumerate() {
        let row = &assignment.assigned[i];
        let mut s = 0;
        while s < N_SLOTS {
            if !row[s] {
                s += 1;
                continue;
            }
            let start = s;
            while s < N_SLOTS && row[s] {
                s += 1;
            }
            intervals.push(StaffInterval {
                staff_id: member.id,
                name: member.name.clone(),
                role: member.role_label(),
                start_slot: start,
                end_slot: s,
            });
        }
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleLabel;

    fn staff(id: u64, key: bool, newbie: bool) -> Staff {
        Staff { id, name: format!("staff-{id}"), is_key_person: key, is_newbie: newbie }
    }

    #[test]
    fn single_contiguous_block_per_staff() {
        let staff_list = vec![staff(1, true, false)];
        let mut row = vec![false; N_SLOTS];
        for s in 4..10 {
            row[s] = true;
        }
        let assignment = Assignment { assigned: vec![row] };

        let intervals = build_intervals(&assignment, &staff_list);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start_slot, 4);
        assert_eq!(intervals[0].end_slot, 10);
        assert_eq!(intervals[0].role, RoleLabel::KeyPerson);
    }

    #[test]
    fn unassigned_staff_produce_no_interval() {
        let staff_list = vec![staff(1, false, false)];
        let assignment = Assignment { assigned: vec![vec![false; N_SLOTS]] };
        assert!(build_intervals(&assignment, &staff_list).is_empty());
    }
}

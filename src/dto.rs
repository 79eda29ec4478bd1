//! DTOs for the HTTP surface (§10). Kept separate from the domain types so
//! the wire format (camelCase, date-as-string) can drift independently of
//! the core's internal representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::demand::DemandSource;
use crate::diagnose::{Cause, SlotDiagnosis};
use crate::domain::{Assignment, DemandTriple, RoleLabel, Staff, StaffInterval};
use crate::model::SolveOutcome;
use crate::time::{slot_to_label, N_SLOTS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub id: u64,
    pub name: String,
    pub is_key_person: bool,
    pub is_newbie: bool,
}

impl From<&Staff> for StaffDto {
    fn from(s: &Staff) -> Self {
        Self { id: s.id, name: s.name.clone(), is_key_person: s.is_key_person, is_newbie: s.is_newbie }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSlotDto {
    pub slot_index: usize,
    pub start_label: String,
    pub min: u32,
    pub target: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveDemandDto {
    pub date: NaiveDate,
    pub source: &'static str,
    pub slots: Vec<DemandSlotDto>,
}

impl EffectiveDemandDto {
    pub fn new(date: NaiveDate, table: &[DemandTriple; N_SLOTS], source: DemandSource) -> Self {
        let slots = table
            .iter()
            .enumerate()
            .map(|(slot_index, d)| DemandSlotDto {
                slot_index,
                start_label: slot_to_label(slot_index).unwrap_or_default(),
                min: d.min,
                target: d.target,
                max: d.max,
            })
            .collect();
        let source = match source {
            DemandSource::Override => "OVERRIDE",
            DemandSource::Template => "TEMPLATE",
            DemandSource::Default => "DEFAULT",
        };
        Self { date, source, slots }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIntervalDto {
    pub staff_id: u64,
    pub name: String,
    pub role: &'static str,
    pub start_label: String,
    pub end_label: String,
}

impl From<&StaffInterval> for StaffIntervalDto {
    fn from(i: &StaffInterval) -> Self {
        Self {
            staff_id: i.staff_id,
            name: i.name.clone(),
            role: role_label(i.role),
            start_label: slot_to_label(i.start_slot).unwrap_or_default(),
            end_label: slot_to_label(i.end_slot).unwrap_or_else(|_| "29:30".to_string()),
        }
    }
}

fn role_label(role: RoleLabel) -> &'static str {
    match role {
        RoleLabel::KeyPersonAndNewbie => "KEY_PERSON_AND_NEWBIE",
        RoleLabel::KeyPerson => "KEY_PERSON",
        RoleLabel::Newbie => "NEWBIE",
        RoleLabel::Regular => "REGULAR",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDiagnosisDto {
    pub slot_index: usize,
    pub start_label: String,
    pub end_label: String,
    pub cause: String,
}

impl From<&SlotDiagnosis> for SlotDiagnosisDto {
    fn from(d: &SlotDiagnosis) -> Self {
        let cause = match &d.cause {
            Cause::InsufficientAvailable { required, available } => {
                format!("INSUFFICIENT_AVAILABLE (required={required}, available={available})")
            }
            Cause::NoKeyPersonAvailable => "NO_KEY_PERSON_AVAILABLE".to_string(),
            Cause::NewbieCapBlocksMinimum { cap } => format!("NEWBIE_CAP_BLOCKS_MINIMUM (cap={cap})"),
        };
        Self { slot_index: d.slot_index, start_label: d.start_label.clone(), end_label: d.end_label.clone(), cause }
    }
}

/// Shape returned for a completed solve job: the `status` tag lets the
/// client distinguish a proved-optimal result from a best-effort one
/// without inspecting HTTP status codes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResultDto {
    pub status: &'static str,
    pub intervals: Vec<StaffIntervalDto>,
}

impl SolveResultDto {
    pub fn from_outcome(outcome: &SolveOutcome, staff: &[Staff]) -> Self {
        let (status, assignment): (&'static str, &Assignment) = match outcome {
            SolveOutcome::Optimal(a) => ("OPTIMAL", a),
            SolveOutcome::Feasible(a) => ("FEASIBLE", a),
        };
        let intervals = crate::intervals::build_intervals(assignment, staff).iter().map(StaffIntervalDto::from).collect();
        Self { status, intervals }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum JobStatusDto {
    Pending,
    Running,
    Done { result: SolveResultDto },
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub solver_engine: &'static str,
}

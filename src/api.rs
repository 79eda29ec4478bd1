//! REST API handlers (§10). Exposes the core read-only (demand lookup,
//! diagnosis) and read-write (solve) operations over HTTP, backed by an
//! [`InMemoryStore`] that the operator can repopulate from a demo data set.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::SolverConfig;
use crate::demand::effective_demand;
use crate::demo_data::{self, DemoData};
use crate::diagnose::diagnose;
use crate::dto::{
    EffectiveDemandDto, HealthResponse, InfoResponse, JobStatusDto, SlotDiagnosisDto, SolveResultDto, StaffDto,
};
use crate::error::CoreError;
use crate::instance::build_instance;
use crate::memory_store::InMemoryStore;
use crate::model::solve_day;
use crate::store::Store;

/// Application state shared across handlers: the current data set and the
/// table of in-flight/completed solve jobs.
pub struct AppState {
    store: RwLock<InMemoryStore>,
    config: SolverConfig,
    jobs: RwLock<HashMap<String, JobStatusDto>>,
}

impl AppState {
    pub fn new() -> Self {
        let dataset = demo_data::generate(DemoData::Small);
        let store = InMemoryStore::new(dataset.staff, dataset.availability, dataset.overrides, dataset.weekday_templates);
        Self { store: RwLock::new(store), config: SolverConfig::default(), jobs: RwLock::new(HashMap::new()) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, StatusCode> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| StatusCode::BAD_REQUEST)
}

fn core_error_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::BadTimeLabel(_) => StatusCode::BAD_REQUEST,
        CoreError::NoStaff => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Infeasible(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CoreError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs a surfaced `StoreFailure` at `error!` (§6) before mapping it to the
/// status code `core_error_status` assigns that variant, so a handler never
/// has to discard the real cause behind a blanket `INTERNAL_SERVER_ERROR`.
fn store_failure_response(err: crate::error::StoreError) -> StatusCode {
    let err = CoreError::from(err);
    error!(error = %err, "store failure at HTTP boundary");
    core_error_status(&err)
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", post(load_demo_data))
        .route("/staff", get(list_staff))
        .route("/demand/{date}", get(get_effective_demand))
        .route("/diagnose/{date}", get(get_diagnosis))
        .route("/solve/{date}", post(start_solve))
        .route("/jobs/{id}", get(get_job))
        .with_state(state)
}

// ============================================================================
// Health & Info
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

async fn info() -> Json<InfoResponse> {
    Json(InfoResponse { name: "shift-scheduler-core", version: env!("CARGO_PKG_VERSION"), solver_engine: "good_lp/HiGHS" })
}

// ============================================================================
// Demo data & roster
// ============================================================================

async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// POST /demo-data/{id} - replaces the in-memory store's contents with a
/// freshly generated data set, returning the date it anchors to.
async fn load_demo_data(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<NaiveDate>, StatusCode> {
    let demo: DemoData = id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let dataset = demo_data::generate(demo);
    let anchor_date = dataset.anchor_date;
    let new_store = InMemoryStore::new(dataset.staff, dataset.availability, dataset.overrides, dataset.weekday_templates);
    *state.store.write() = new_store;
    info!(demo = id.as_str(), %anchor_date, "loaded demo data set");
    Ok(Json(anchor_date))
}

async fn list_staff(State(state): State<Arc<AppState>>) -> Result<Json<Vec<StaffDto>>, StatusCode> {
    let store = state.store.read().clone();
    let staff = store.staff().await.map_err(store_failure_response)?;
    Ok(Json(staff.iter().map(StaffDto::from).collect()))
}

// ============================================================================
// Demand & diagnosis
// ============================================================================

async fn get_effective_demand(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<EffectiveDemandDto>, StatusCode> {
    let date = parse_date(&date)?;
    let store = state.store.read().clone();
    let (table, source) = effective_demand(&store, date, &state.config).await.map_err(store_failure_response)?;
    Ok(Json(EffectiveDemandDto::new(date, &table, source)))
}

async fn get_diagnosis(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<Vec<SlotDiagnosisDto>>, StatusCode> {
    let date = parse_date(&date)?;
    let store = state.store.read().clone();
    let instance = build_instance(&store, date, &state.config).await.map_err(store_failure_response)?;
    let issues = diagnose(&instance, &state.config);
    Ok(Json(issues.iter().map(SlotDiagnosisDto::from).collect()))
}

// ============================================================================
// Solving
// ============================================================================

/// POST /solve/{date} - starts a solve in the background and returns a job
/// id the client polls via `/jobs/{id}`. The solve itself is synchronous and
/// CPU-bound, so it runs on a blocking thread rather than the async runtime.
async fn start_solve(State(state): State<Arc<AppState>>, Path(date): Path<String>) -> Result<String, StatusCode> {
    let date = parse_date(&date)?;
    let job_id = Uuid::new_v4().to_string();
    state.jobs.write().insert(job_id.clone(), JobStatusDto::Pending);

    let state_clone = state.clone();
    let job_id_clone = job_id.clone();
    tokio::spawn(async move {
        state_clone.jobs.write().insert(job_id_clone.clone(), JobStatusDto::Running);

        let store = state_clone.store.read().clone();
        let config = state_clone.config;
        let instance = build_instance(&store, date, &config).await;

        let status = match instance {
            Err(store_err) => {
                error!(error = %store_err, %date, "store failure at HTTP boundary");
                JobStatusDto::Failed { error: store_err.to_string() }
            }
            Ok(instance) => {
                let staff = instance.staff.clone();
                let solved = tokio::task::spawn_blocking(move || solve_day(&instance, &config)).await;
                match solved {
                    Ok(Ok(outcome)) => JobStatusDto::Done { result: SolveResultDto::from_outcome(&outcome, &staff) },
                    Ok(Err(core_err)) => JobStatusDto::Failed { error: core_err.to_string() },
                    Err(join_err) => {
                        error!(error = %join_err, "solve task panicked");
                        JobStatusDto::Failed { error: "solver task panicked".to_string() }
                    }
                }
            }
        };
        state_clone.jobs.write().insert(job_id_clone, status);
    });

    Ok(job_id)
}

async fn get_job(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<JobStatusDto>, StatusCode> {
    match state.jobs.read().get(&id) {
        Some(status) => Ok(Json(status.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

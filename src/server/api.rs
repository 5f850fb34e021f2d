use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::engine::{BaseTypeSum, RoleAssignment, TripleFormChart};
use crate::error::Result;
use crate::report::chart_csv_string;
use crate::storage::MatrixStore;
use crate::workbench::{MatrixSource, Workbench};

/// Everything the console serves from. Owned by the single server loop.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub store: MatrixStore,
    pub workbench: Workbench,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = config.store();
        let workbench = Workbench::bootstrap(&config, &store);
        Self {
            config,
            store,
            workbench,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub meso: String,
    #[serde(default)]
    pub alpha: String,
    #[serde(default)]
    pub omega: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixStatus<'a> {
    pub loaded: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a MatrixSource>,
    pub types: Vec<&'a str>,
    pub rows: usize,
}

pub fn health_payload() -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "amo-console",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

pub fn matrix_status_payload(state: &AppState) -> Result<String> {
    let workbench = &state.workbench;
    let (types, rows) = match workbench.snapshot() {
        Ok(snapshot) => (snapshot.type_names(), snapshot.row_count()),
        Err(_) => (Vec::new(), 0),
    };
    let status = MatrixStatus {
        loaded: workbench.is_loaded(),
        status: workbench.status(),
        source: workbench.source(),
        types,
        rows,
    };
    Ok(serde_json::to_string_pretty(&status)?)
}

/// Body is the raw delimited matrix text.
pub fn matrix_upload_payload(state: &mut AppState, body: &str) -> Result<String> {
    state.workbench.load_text(body, MatrixSource::Upload)?;
    matrix_status_payload(state)
}

pub fn matrix_sample_payload(state: &mut AppState) -> Result<String> {
    state.workbench.load_sample()?;
    matrix_status_payload(state)
}

pub fn remember_payload(state: &AppState) -> Result<String> {
    let record = state.workbench.remember(&state.store)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "message": "Matrix stored.",
        "slot": record.slot,
        "saved_at": record.saved_at,
    }))?)
}

pub fn forget_payload(state: &AppState) -> Result<String> {
    let removed = state.store.forget()?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "message": "Stored matrix cleared.",
        "removed": removed,
    }))?)
}

pub fn baseline_payload(state: &AppState) -> Result<String> {
    let baselines: &[BaseTypeSum] = state.workbench.snapshot()?.baselines().entries();
    Ok(serde_json::to_string_pretty(
        &serde_json::json!({ "baselines": baselines }),
    )?)
}

fn compute_from_body(state: &AppState, body: &str) -> Result<TripleFormChart> {
    let request: ComputeRequest = serde_json::from_str(body)?;
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&state.config.chart_name);
    let roles = RoleAssignment::new(request.meso, request.alpha, request.omega);
    state.workbench.compute(&roles, name)
}

pub fn compute_payload(state: &AppState, body: &str) -> Result<String> {
    let chart = compute_from_body(state, body)?;
    Ok(serde_json::to_string_pretty(&chart)?)
}

/// CSV body plus the download file name.
pub fn compute_csv_payload(state: &AppState, body: &str) -> Result<(String, String)> {
    let chart = compute_from_body(state, body)?;
    Ok((chart_csv_string(&chart)?, chart.csv_file_name()))
}

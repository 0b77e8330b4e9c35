use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pricing::{
    solve, volume_metrics, PricingError, SimulatorInputs, SimulatorResults, VolumeStrategy,
    VolumeTableRow,
};
use runtime::{export::PriceTableCsvWriter, logging::TracingLogWriter};
use serde::{Deserialize, Serialize};

use crate::{state::AppState, ws};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/simulate", post(simulate))
        .route("/volume-table", post(volume_table))
        .route("/volume-table.csv", post(volume_table_csv))
        .route("/volume-metrics", post(volume_metrics_for_bundle))
        .route("/stats", get(stats))
        .route("/ws/recompute", get(ws::recompute_socket))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulateRequest {
    inputs: SimulatorInputs,
    #[serde(default)]
    manual_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeTableRequest {
    unit1_price: f64,
    unit_cost: f64,
    unit1_profit: f64,
    #[serde(default)]
    margin_share_percent: Option<f64>,
    #[serde(default)]
    max_quantity: Option<u32>,
    #[serde(default)]
    costeo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeMetricsRequest {
    inputs: SimulatorInputs,
    quantity: u32,
    #[serde(default)]
    manual_total_price: Option<f64>,
}

/// Not-computable costings still answer 200; `computable` tells the form to
/// render zeros.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CostingResponse {
    computable: bool,
    reason: Option<&'static str>,
    results: SimulatorResults,
}

impl From<Result<SimulatorResults, PricingError>> for CostingResponse {
    fn from(outcome: Result<SimulatorResults, PricingError>) -> Self {
        match outcome {
            Ok(results) => Self {
                computable: true,
                reason: None,
                results,
            },
            Err(reason) => Self {
                computable: false,
                reason: Some(reason.code()),
                results: SimulatorResults::zero(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VolumeTableResponse {
    computable: bool,
    reason: Option<&'static str>,
    rows: Vec<VolumeTableRow>,
}

async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Json<CostingResponse> {
    let outcome = solve(&request.inputs, request.manual_price);
    if let Err(reason) = outcome {
        tracing::debug!(reason = reason.code(), "simulate not computable");
    }
    state.record_recompute();
    Json(CostingResponse::from(outcome))
}

async fn volume_metrics_for_bundle(
    State(state): State<AppState>,
    Json(request): Json<VolumeMetricsRequest>,
) -> Json<CostingResponse> {
    let outcome = volume_metrics(
        &request.inputs,
        request.quantity,
        request.manual_total_price,
    );
    state.record_recompute();
    Json(CostingResponse::from(outcome))
}

fn priced_rows(
    state: &AppState,
    request: &VolumeTableRequest,
) -> Result<Vec<VolumeTableRow>, PricingError> {
    let limits = state.limits();
    let margin_share = request
        .margin_share_percent
        .unwrap_or(limits.default_margin_percent);
    let mut strategy = VolumeStrategy::new(true, margin_share)?;
    strategy.reprice(
        request.unit1_price,
        request.unit_cost,
        request.unit1_profit,
        limits.clamp_quantity(request.max_quantity),
    );
    Ok(strategy.price_table)
}

async fn volume_table(
    State(state): State<AppState>,
    Json(request): Json<VolumeTableRequest>,
) -> Json<VolumeTableResponse> {
    let response = match priced_rows(&state, &request) {
        Ok(rows) => VolumeTableResponse {
            computable: true,
            reason: None,
            rows,
        },
        Err(reason) => VolumeTableResponse {
            computable: false,
            reason: Some(reason.code()),
            rows: Vec::new(),
        },
    };
    Json(response)
}

async fn volume_table_csv(
    State(state): State<AppState>,
    Json(request): Json<VolumeTableRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = priced_rows(&state, &request).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    let costeo = request.costeo.as_deref().unwrap_or("costeo");
    let sequence = state.record_recompute();

    let mut writer = PriceTableCsvWriter::new(Vec::new());
    writer
        .export_and_log(sequence, costeo, &rows, &mut TracingLogWriter)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let body = String::from_utf8(writer.into_inner())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.stats())
}

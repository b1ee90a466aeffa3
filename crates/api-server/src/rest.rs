//! REST API handlers for the dashboard endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use mixboard_core::{Channel, Kpi, WeeklyRecord};
use mixboard_engine::{
    channel_breakdown, compute_kpis, date_window, decompose, fit_linear_demand, price_curve,
    promo_summary, saturation_curve, simulate, suggest_reallocation, ChannelAllocation,
    ChannelPerformance, DecompositionSummary, PricePoint, PromoSummary, SaturationCurve,
    ScenarioInputs, ScenarioOutcome, SimulationParams,
};
use mixboard_insights::{InsightsGenerator, InsightsReport, InsightsRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Cap on curve resolution requested through the API.
const MAX_CURVE_POINTS: usize = 1_000;

/// Default number of samples on a curve.
const DEFAULT_CURVE_POINTS: usize = 50;

/// Shared application state for REST handlers. The weekly series is injected
/// at startup and read-only thereafter.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<WeeklyRecord>>,
    pub insights: Arc<dyn InsightsGenerator>,
    pub node_id: String,
    pub start_time: Instant,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, message: impl Into<String>) -> ApiError {
    metrics::counter!("api.validation_errors").increment(1);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

/// Optional inclusive date range shared by the read endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WindowQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn select_window<'a>(
    records: &'a [WeeklyRecord],
    query: &WindowQuery,
) -> Result<&'a [WeeklyRecord], ApiError> {
    let window = date_window(records, query.from, query.to);
    if window.is_empty() {
        warn!(from = ?query.from, to = ?query.to, "Requested window contains no records");
        return Err(bad_request(
            "empty_window",
            "no records fall inside the requested date range",
        ));
    }
    Ok(window)
}

/// GET /v1/records — the enriched weekly series for the window.
pub async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<WeeklyRecord>>, ApiError> {
    let window = select_window(&state.records, &query)?;
    Ok(Json(window.to_vec()))
}

/// GET /v1/kpis — the ten headline KPIs for the window.
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Kpi>, ApiError> {
    let window = select_window(&state.records, &query)?;
    let kpi = compute_kpis(window).map_err(|e| bad_request("kpi_failed", e.to_string()))?;
    Ok(Json(kpi))
}

/// GET /v1/decomposition — summed sales decomposition for the window.
pub async fn get_decomposition(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<DecompositionSummary>, ApiError> {
    let window = select_window(&state.records, &query)?;
    let summary =
        decompose(window).map_err(|e| bad_request("decomposition_failed", e.to_string()))?;
    Ok(Json(summary))
}

/// GET /v1/channels — per-channel spend/contribution/ROAS breakdown.
pub async fn get_channels(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<ChannelPerformance>>, ApiError> {
    let window = select_window(&state.records, &query)?;
    let breakdown =
        channel_breakdown(window).map_err(|e| bad_request("breakdown_failed", e.to_string()))?;
    Ok(Json(breakdown))
}

/// GET /v1/promo — promo vs non-promo comparison for the window.
pub async fn get_promo(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<PromoSummary>, ApiError> {
    let window = select_window(&state.records, &query)?;
    let summary =
        promo_summary(window).map_err(|e| bad_request("promo_failed", e.to_string()))?;
    Ok(Json(summary))
}

/// GET /v1/allocation — heuristic digital budget reallocation.
pub async fn get_allocation(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<Vec<ChannelAllocation>>, ApiError> {
    let window = select_window(&state.records, &query)?;
    let allocations =
        suggest_reallocation(window).map_err(|e| bad_request("allocation_failed", e.to_string()))?;
    Ok(Json(allocations))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurveQuery {
    pub points: Option<usize>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn curve_points(requested: Option<usize>) -> Result<usize, ApiError> {
    let points = requested.unwrap_or(DEFAULT_CURVE_POINTS);
    if !(2..=MAX_CURVE_POINTS).contains(&points) {
        return Err(bad_request(
            "invalid_points",
            format!("points must be between 2 and {MAX_CURVE_POINTS}"),
        ));
    }
    Ok(points)
}

/// GET /v1/curves/saturation — Hill response curves for every channel,
/// sampled out to four half-saturation constants.
pub async fn get_saturation_curves(
    Query(query): Query<CurveQuery>,
) -> Result<Json<Vec<SaturationCurve>>, ApiError> {
    let points = curve_points(query.points)?;
    let curves = Channel::ALL
        .into_iter()
        .map(|channel| saturation_curve(channel, channel.params().saturation_k * 4.0, points))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| bad_request("curve_failed", e.to_string()))?;
    Ok(Json(curves))
}

/// GET /v1/curves/price — demand/revenue/profit over a price grid fitted to
/// the window.
pub async fn get_price_curve(
    State(state): State<AppState>,
    Query(query): Query<CurveQuery>,
) -> Result<Json<Vec<PricePoint>>, ApiError> {
    let points = curve_points(query.points)?;
    let window = select_window(
        &state.records,
        &WindowQuery {
            from: query.from,
            to: query.to,
        },
    )?;
    let fit =
        fit_linear_demand(window).map_err(|e| bad_request("demand_fit_failed", e.to_string()))?;
    let curve = price_curve(&fit, points).map_err(|e| bad_request("curve_failed", e.to_string()))?;
    Ok(Json(curve))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub inputs: ScenarioInputs,
}

/// POST /v1/scenario — single-shot what-if simulation over the window.
pub async fn post_scenario(
    State(state): State<AppState>,
    Json(request): Json<ScenarioRequest>,
) -> Result<Json<ScenarioOutcome>, ApiError> {
    let window = select_window(
        &state.records,
        &WindowQuery {
            from: request.from,
            to: request.to,
        },
    )?;
    let outcome = simulate(window, &request.inputs, &SimulationParams::default())
        .map_err(|e| bad_request("scenario_failed", e.to_string()))?;
    metrics::counter!("api.scenario_runs").increment(1);
    Ok(Json(outcome))
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct InsightsApiRequest {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// POST /v1/insights — aggregate the window and ask the collaborator for a
/// narrative report. Failures collapse to one generic upstream error.
pub async fn post_insights(
    State(state): State<AppState>,
    Json(request): Json<InsightsApiRequest>,
) -> Result<Json<InsightsReport>, ApiError> {
    let window = select_window(
        &state.records,
        &WindowQuery {
            from: request.from,
            to: request.to,
        },
    )?;
    let kpi = compute_kpis(window).map_err(|e| bad_request("kpi_failed", e.to_string()))?;
    let payload = InsightsRequest::from_window(&kpi, window)
        .map_err(|e| bad_request("payload_failed", e.to_string()))?;

    metrics::counter!("api.insights_requests").increment(1);
    match state.insights.generate(&payload).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            error!(error = %e, "Insights generation failed");
            metrics::counter!("api.insights_errors").increment(1);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "insights_failed".to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Operational endpoints
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub weeks_loaded: usize,
    pub uptime_secs: u64,
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        weeks_loaded: state.records.len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — readiness probe; the server can serve once data is loaded.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.records.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /live — liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

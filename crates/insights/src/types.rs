use mixboard_core::{Kpi, MixResult, WeeklyRecord};
use serde::{Deserialize, Serialize};

/// How many recent weeks of raw data accompany the KPIs in the payload.
const SAMPLE_WEEKS: usize = 12;

/// The single input to the collaborator: dashboard state as a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub dashboard_data: String,
}

impl InsightsRequest {
    /// Serialize the window's KPIs plus a small sample of the most recent
    /// records into the payload blob.
    pub fn from_window(kpi: &Kpi, window: &[WeeklyRecord]) -> MixResult<Self> {
        let sample_start = window.len().saturating_sub(SAMPLE_WEEKS);
        let payload = serde_json::json!({
            "kpis": kpi,
            "recent_weeks": &window[sample_start..],
        });
        Ok(Self {
            dashboard_data: serde_json::to_string(&payload)?,
        })
    }
}

/// Structured narrative output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    /// 3-5 concrete, actionable recommendations.
    pub recommendations: Vec<String>,
    /// Estimated profit uplift range if followed, e.g. "3-5%".
    pub expected_uplift: String,
    /// Key assumptions underpinning the analysis.
    pub assumptions: Vec<String>,
    /// Risks and external factors that could change the outcome.
    pub risks: Vec<String>,
}

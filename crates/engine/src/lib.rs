//! Mixboard MMM metrics engine — pure, synchronous transforms over an
//! in-memory weekly series: adstock and Hill saturation, KPI aggregation,
//! sales decomposition, response/price curves, a budget reallocation
//! heuristic, and the what-if scenario simulator.
//!
//! Every operation here is a single-pass function over an ordered slice of
//! [`mixboard_core::WeeklyRecord`]; nothing mutates its input and nothing
//! blocks.

pub mod allocation;
pub mod curves;
pub mod decomposition;
pub mod kpi;
pub mod scenario;
pub mod transforms;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use allocation::{suggest_reallocation, ChannelAllocation};
pub use curves::{price_curve, saturation_curve, PricePoint, SaturationCurve};
pub use decomposition::{
    channel_breakdown, decompose, promo_summary, ChannelPerformance, DecompositionSummary,
    PromoSummary,
};
pub use kpi::{compute_kpis, fit_linear_demand, DemandFit};
pub use scenario::{simulate, ScenarioInputs, ScenarioOutcome, SimulationParams};
pub use transforms::{adstock, saturation, saturation_series};
pub use window::date_window;

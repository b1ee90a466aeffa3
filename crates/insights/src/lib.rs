//! AI narrative summary for the dashboard — the "decision cockpit".
//!
//! The external text-generation service is a collaborator behind a single
//! request/response contract: one JSON payload of aggregated KPIs in, one
//! structured report out. At most one request is in flight per user action;
//! there is no retry, streaming, or cancellation, and every failure surfaces
//! as one generic error.

pub mod client;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use mixboard_core::MixResult;

pub use client::HttpInsightsClient;
pub use types::{InsightsReport, InsightsRequest};

/// Narrow boundary to the text-generation collaborator. The server depends
/// only on this trait, never on the concrete HTTP client.
#[async_trait]
pub trait InsightsGenerator: Send + Sync {
    async fn generate(&self, request: &InsightsRequest) -> MixResult<InsightsReport>;
}

//! API server assembly: router, middleware, and the metrics exporter.

use crate::rest::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use mixboard_core::config::AppConfig;
use mixboard_core::WeeklyRecord;
use mixboard_insights::InsightsGenerator;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    config: AppConfig,
    records: Arc<Vec<WeeklyRecord>>,
    insights: Arc<dyn InsightsGenerator>,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        records: Arc<Vec<WeeklyRecord>>,
        insights: Arc<dyn InsightsGenerator>,
    ) -> Self {
        Self {
            config,
            records,
            insights,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            records: self.records.clone(),
            insights: self.insights.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        Router::new()
            // Dashboard data endpoints
            .route("/v1/records", get(rest::get_records))
            .route("/v1/kpis", get(rest::get_kpis))
            .route("/v1/decomposition", get(rest::get_decomposition))
            .route("/v1/channels", get(rest::get_channels))
            .route("/v1/promo", get(rest::get_promo))
            .route("/v1/allocation", get(rest::get_allocation))
            .route("/v1/curves/saturation", get(rest::get_saturation_curves))
            .route("/v1/curves/price", get(rest::get_price_curve))
            .route("/v1/scenario", post(rest::post_scenario))
            .route("/v1/insights", post(rest::post_insights))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server; blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, weeks = self.records.len(), "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }

    /// Start the Prometheus exporter on its own port. Must be called from
    /// within the Tokio runtime; `install` spawns the scrape endpoint there.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

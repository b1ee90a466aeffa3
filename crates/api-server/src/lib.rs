//! HTTP serving layer for the Mixboard dashboard: REST endpoints over the
//! metrics engine plus the insights collaborator, with operational probes
//! and a Prometheus exporter.

pub mod rest;
pub mod server;

pub use rest::AppState;
pub use server::ApiServer;

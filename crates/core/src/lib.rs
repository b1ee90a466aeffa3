//! Shared types, errors, and configuration for the Mixboard MMM backend.

pub mod config;
pub mod error;
pub mod types;

pub use error::{MixboardError, MixResult};
pub use types::{Channel, ChannelMap, ChannelParams, Kpi, WeeklyRecord};

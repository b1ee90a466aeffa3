use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `MIXBOARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Controls the synthetic dataset generated at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Connection settings for the external text-generation service that
/// produces the narrative dashboard summary.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    #[serde(default = "default_insights_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_insights_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_insights_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "mixboard-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_weeks() -> u32 {
    104
}
fn default_seed() -> u64 {
    42
}
fn default_insights_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_insights_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_insights_timeout_secs() -> u64 {
    30
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            dataset: DatasetConfig::default(),
            insights: InsightsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            seed: default_seed(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_insights_endpoint(),
            model: default_insights_model(),
            api_key: None,
            timeout_secs: default_insights_timeout_secs(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("MIXBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.http_port, 8080);
        assert_eq!(cfg.dataset.weeks, 104);
        assert_eq!(cfg.dataset.seed, 42);
        assert!(cfg.insights.api_key.is_none());
    }
}

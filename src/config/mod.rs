use std::env;

use chrono::NaiveDate;

/// Distinguishes runtime behavior for different stages of the reporting
/// service that embeds the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Runtime configuration for one reporting run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub environment: AppEnvironment,
    /// Snapshot reporting date. When unset, the embedding caller decides;
    /// the pipeline itself never reads a clock.
    pub as_of: Option<NaiveDate>,
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let as_of = match env::var("REPORT_AS_OF") {
            Ok(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidAsOfDate { raw })?,
            ),
            Err(_) => None,
        };

        let log_level = env::var("REPORT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            as_of,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REPORT_AS_OF must be an ISO date (YYYY-MM-DD), got {raw:?}")]
    InvalidAsOfDate { raw: String },
}

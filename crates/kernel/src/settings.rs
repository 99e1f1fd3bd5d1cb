use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "LECTERN_ENV";
const CONFIG_DIR_ENV: &str = "LECTERN_CONFIG_DIR";
const ENV_PREFIX: &str = "LECTERN";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub reservation: ReservationSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay
    /// and `LECTERN_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .map(|cwd| cwd.join("config"))
                .with_context(|| "unable to resolve current directory")?,
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from an explicit directory and environment name.
    pub fn load_from(config_dir: &std::path::Path, environment: &str) -> anyhow::Result<Self> {
        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

/// Catalog browsing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "CatalogSettings::default_page_size")]
    pub page_size: usize,
}

impl CatalogSettings {
    fn default_page_size() -> usize {
        6
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
        }
    }
}

/// Reservation form settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationSettings {
    /// Delay before a confirmed reservation returns to the catalog.
    #[serde(default = "ReservationSettings::default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    /// Days a reserved book is held at the desk.
    #[serde(default = "ReservationSettings::default_hold_days")]
    pub hold_days: u32,
    /// Days a collected book may be kept.
    #[serde(default = "ReservationSettings::default_loan_days")]
    pub loan_days: u32,
}

impl ReservationSettings {
    fn default_redirect_delay_ms() -> u64 {
        3000
    }

    fn default_hold_days() -> u32 {
        3
    }

    fn default_loan_days() -> u32 {
        14
    }

    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for ReservationSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: Self::default_redirect_delay_ms(),
            hold_days: Self::default_hold_days(),
            loan_days: Self::default_loan_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_level")]
    pub level: String,
}

impl TelemetrySettings {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

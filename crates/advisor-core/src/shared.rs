//! Shared configuration for the advisor core and gateway.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Env var naming the config file (without extension is fine; `config` detects the format).
pub const CONFIG_PATH_ENV: &str = "ADVISOR_CONFIG";

/// Global application configuration (gateway + data sources). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Display name reported by `/v1/status`.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Delimited knowledge base file (`Type, Range, Advice, Total_Allowed_Years`).
    pub knowledge_base_path: String,
    /// Student roster file (`NAME, REG. NO., CTCL, CGP, CGPA, Remark`).
    pub student_data_path: String,
    /// Append-only feedback log for submitted ratings.
    pub ratings_path: String,

    /// If true, the gateway serves the advisory page from `frontend_dir`.
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Course Load Advisor".to_string(),
            port: 8001,
            knowledge_base_path: "KB/knowledge_base.csv".to_string(),
            student_data_path: "DB/student_data.csv".to_string(),
            ratings_path: "ratings.txt".to_string(),
            frontend_enabled: false,
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `ADVISOR__*` > `$ADVISOR_CONFIG` file
    /// (default `config/gateway`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config/gateway".to_string());
        Self::load_from(&config_path)
    }

    /// Same layering as [`CoreConfig::load`], with an explicit file path.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("knowledge_base_path", defaults.knowledge_base_path)?
            .set_default("student_data_path", defaults.student_data_path)?
            .set_default("ratings_path", defaults.ratings_path)?
            .set_default("frontend_dir", defaults.frontend_dir)?;

        let path = Path::new(config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder.add_source(config::File::with_name(config_path).required(false))
        };

        let built = builder
            .add_source(config::Environment::with_prefix("ADVISOR").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

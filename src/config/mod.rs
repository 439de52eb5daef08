pub mod database;

use serde::Deserialize;

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_window_days() -> i64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Without a database URL the service keeps documents in memory.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
    pub jwt_secret: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,
}

impl Config {
    /// Read settings from the process environment (after `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        if self.default_window_days <= 0 {
            anyhow::bail!("DEFAULT_WINDOW_DAYS must be positive, got {}", self.default_window_days);
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if !matches!(self.log_format.as_str(), "text" | "json") {
            anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", self.log_format);
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    /// Settings for tests and local tooling.
    pub fn for_secret(jwt_secret: &str) -> Self {
        Self {
            port: default_port(),
            database_url: None,
            db_max_connections: default_max_connections(),
            jwt_secret: jwt_secret.to_string(),
            api_key: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
            default_window_days: default_window_days(),
        }
    }
}

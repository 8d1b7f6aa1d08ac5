use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::accounts::DEFAULT_ALLOWED_DOMAINS;
use crate::core::EmailPolicy;
use crate::models::RankingWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub accounts: AccountSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// JSON seed file loaded at startup
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    #[serde(default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
        }
    }
}

impl AccountSettings {
    pub fn email_policy(&self) -> EmailPolicy {
        EmailPolicy::new(&self.allowed_domains)
    }
}

fn default_allowed_domains() -> Vec<String> {
    DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interest_weight")]
    pub interest_tag: f64,
    #[serde(default = "default_followed_weight")]
    pub followed_organizer: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interest_tag: default_interest_weight(),
            followed_organizer: default_followed_weight(),
        }
    }
}

impl From<&WeightsConfig> for RankingWeights {
    fn from(value: &WeightsConfig) -> Self {
        RankingWeights {
            interest_tag: value.interest_tag,
            followed_organizer: value.followed_organizer,
        }
    }
}

fn default_interest_weight() -> f64 { 2.0 }
fn default_followed_weight() -> f64 { 3.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Let `LOG_LEVEL` / `LOG_FORMAT` values win over the configured ones
    pub fn overridden_by(self, level: Option<String>, format: Option<String>) -> Self {
        Self {
            level: level.filter(|l| !l.is_empty()).unwrap_or(self.level),
            format: format.filter(|f| !f.is_empty()).unwrap_or(self.format),
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.format == "pretty"
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FELICITY)
    /// 5. `JWT_SECRET` and `IIIT_EMAIL_DOMAINS`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FELICITY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FELICITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

/// Apply the plain environment variables the deployment scripts set
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    if let Ok(domains) = env::var("IIIT_EMAIL_DOMAINS") {
        let domains: Vec<String> = domains
            .split(',')
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        builder = builder.set_override("accounts.allowed_domains", domains)?;
    }

    builder.build()
}

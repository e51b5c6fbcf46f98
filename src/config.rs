use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub user_profiles: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Report cache settings; the cache stays in-process when `redis_url` is unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
    #[serde(default = "default_relationship_goal_weight")]
    pub relationship_goal: f64,
    #[serde(default = "default_compatible_goal_weight")]
    pub compatible_goal: f64,
    #[serde(default = "default_children_weight")]
    pub children: f64,
    #[serde(default = "default_smoking_weight")]
    pub smoking: f64,
    #[serde(default = "default_drinking_weight")]
    pub drinking: f64,
    #[serde(default = "default_lifestyle_partial_weight")]
    pub lifestyle_partial: f64,
    #[serde(default = "default_education_weight")]
    pub education: f64,
    #[serde(default = "default_languages_weight")]
    pub languages: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            personality: default_personality_weight(),
            relationship_goal: default_relationship_goal_weight(),
            compatible_goal: default_compatible_goal_weight(),
            children: default_children_weight(),
            smoking: default_smoking_weight(),
            drinking: default_drinking_weight(),
            lifestyle_partial: default_lifestyle_partial_weight(),
            education: default_education_weight(),
            languages: default_languages_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        ScoringWeights {
            interests: w.interests,
            personality: w.personality,
            relationship_goal: w.relationship_goal,
            compatible_goal: w.compatible_goal,
            children: w.children,
            smoking: w.smoking,
            drinking: w.drinking,
            lifestyle_partial: w.lifestyle_partial,
            education: w.education,
            languages: w.languages,
        }
    }
}

fn default_interests_weight() -> f64 { 30.0 }
fn default_personality_weight() -> f64 { 25.0 }
fn default_relationship_goal_weight() -> f64 { 15.0 }
fn default_compatible_goal_weight() -> f64 { 10.0 }
fn default_children_weight() -> f64 { 10.0 }
fn default_smoking_weight() -> f64 { 3.0 }
fn default_drinking_weight() -> f64 { 3.0 }
fn default_lifestyle_partial_weight() -> f64 { 1.0 }
fn default_education_weight() -> f64 { 4.0 }
fn default_languages_weight() -> f64 { 10.0 }

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with LUME_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., LUME__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LUME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LUME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment overrides that don't follow the LUME__ scheme
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    // DATABASE_URL wins over anything in the config files
    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}

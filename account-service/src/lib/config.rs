use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::tasks::Queue;
use crate::domain::user::tasks::TaskOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
    pub kafka: KafkaConfig,
    pub tasks: TasksConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub symmetric_key: String,
    pub access_token_duration_minutes: u64,
}

impl TokenConfig {
    pub fn access_token_duration(&self) -> Duration {
        Duration::from_secs(self.access_token_duration_minutes * 60)
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("symmetric_key", &"[REDACTED]")
            .field(
                "access_token_duration_minutes",
                &self.access_token_duration_minutes,
            )
            .finish()
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    /// Tasks go to `{task_topic_prefix}.{queue}`.
    pub task_topic_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TasksConfig {
    pub verify_email: TaskOptionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TaskOptionsConfig {
    pub max_retry: u32,
    pub process_in_secs: u64,
    pub queue: Queue,
}

impl From<&TaskOptionsConfig> for TaskOptions {
    fn from(config: &TaskOptionsConfig) -> Self {
        Self {
            max_retry: config.max_retry,
            process_in: Duration::from_secs(config.process_in_secs),
            queue: config.queue,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__SYMMETRIC_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: KAFKA__BROKERS=kafka:9092 overrides kafka.brokers
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

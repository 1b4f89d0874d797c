use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use auth::HashingParams;
use auth::TokenTtl;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as Settings;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub env: Env,
    pub storage: StorageConfig,
    pub grpc: GrpcConfig,
    pub token: TokenConfig,
    #[serde(default)]
    pub hashing: HashingParams,
}

/// Deployment environment; selects the log format and default level.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// SQLite database file
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrpcConfig {
    pub port: u16,
    pub timeout_ms: u64,
}

impl GrpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
}

impl TokenConfig {
    pub fn ttl(&self) -> TokenTtl {
        // Validated at load time
        TokenTtl::new(self.ttl_seconds).unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SSO_STORAGE__PATH, SSO_GRPC__PORT, etc.)
    /// 2. File given by `config_path` (the `--config` flag), else by
    ///    CONFIG_PATH; must exist when named
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "local".to_string());

        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = resolve_config_path(config_path, env::var("CONFIG_PATH").ok()) {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Example: SSO_GRPC__PORT=44045 overrides grpc.port
        let configuration = builder
            .add_source(
                Environment::with_prefix("SSO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::validated(configuration)
    }

    /// Load configuration from a single file layered over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let configuration = Self::defaults()?
            .add_source(File::from(path).required(true))
            .build()?;

        Self::validated(configuration)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let hashing = HashingParams::default();

        Settings::builder()
            .set_default("env", "local")?
            .set_default("storage.path", "./storage/sso.db")?
            .set_default("grpc.port", 44044_i64)?
            .set_default("grpc.timeout_ms", 10_000_i64)?
            .set_default("token.ttl_seconds", TokenTtl::DEFAULT_SECONDS)?
            .set_default("hashing.memory_kib", i64::from(hashing.memory_kib))?
            .set_default("hashing.iterations", i64::from(hashing.iterations))?
            .set_default("hashing.parallelism", i64::from(hashing.parallelism))
    }

    fn validated(configuration: Settings) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;

        if let Err(e) = TokenTtl::new(config.token.ttl_seconds) {
            return Err(ConfigError::Message(format!("token.ttl_seconds: {}", e)));
        }

        Ok(config)
    }
}

/// The `--config` flag wins over CONFIG_PATH; an empty value counts as unset.
fn resolve_config_path(flag: Option<&Path>, env_value: Option<String>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

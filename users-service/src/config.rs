use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SERVICE_NAME: &str = "users-service";
pub const DEFAULT_USERS_TABLE: &str = "users";
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:000000000000:user-events";
pub const DEFAULT_DOCS_PATH: &str = "./docs/index.html";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                name: "LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the service needs at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub service_name: String,
    pub service_version: String,
    pub bind_addr: SocketAddr,
    /// Prefix every route is nested under, empty for none
    pub base_path: String,
    pub users_table: String,
    pub topic_arn: String,
    pub aws_endpoint_url: Option<String>,
    pub aws_region: Option<String>,
    pub docs_path: PathBuf,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            base_path: String::new(),
            users_table: DEFAULT_USERS_TABLE.to_string(),
            topic_arn: DEFAULT_TOPIC_ARN.to_string(),
            aws_endpoint_url: None,
            aws_region: None,
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
            log_format: LogFormat::Text,
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let defaults = Self::default();

        let bind_addr = match var("BIND_ADDR") {
            Some(addr) => addr.parse().map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                value: addr,
            })?,
            None => defaults.bind_addr,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            service_name: var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            bind_addr,
            base_path: normalize_base_path(&var("API_BASE_PATH").unwrap_or_default()),
            users_table: var("USERS_TABLE").unwrap_or(defaults.users_table),
            topic_arn: var("USER_EVENTS_TOPIC_ARN").unwrap_or(defaults.topic_arn),
            aws_endpoint_url: var("AWS_ENDPOINT_URL"),
            aws_region: var("AWS_REGION"),
            docs_path: var("DOCS_PATH").map(PathBuf::from).unwrap_or(defaults.docs_path),
            log_format,
        })
    }

    /// Loads the shared AWS configuration used by both the DynamoDB and SNS clients
    pub async fn load_aws_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint) = &self.aws_endpoint_url {
            tracing::info!("Using AWS endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(region) = &self.aws_region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}

// "/" and "" mean no prefix; otherwise a single leading slash and no trailing one
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

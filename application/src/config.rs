//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Catalog API client configuration.
    pub catalog: Catalog,

    /// Address suggestions provider configuration.
    pub suggestions: Suggestions,

    /// Operator session configuration.
    pub session: Session,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Map viewport loading configuration.
    pub viewport: Viewport,

    /// Settlement suggestions lookup configuration.
    pub suggest: Suggest,

    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            viewport,
            suggest,
            tasks: Tasks { refresh_settings },
        } = value;
        Self {
            viewport: service::viewport::Config {
                debounce: viewport.debounce,
            },
            suggest: service::suggest::Config {
                debounce: suggest.debounce,
            },
            refresh_settings: service::task::refresh_settings::Config {
                interval: refresh_settings.interval,
            },
        }
    }
}

/// Map viewport loading configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Viewport {
    /// Time a requested viewport must stay unchanged before its loading
    /// actually starts.
    #[default(time::Duration::from_millis(300))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,
}

/// Settlement suggestions lookup configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Suggest {
    /// Time the search input must stay unchanged before a lookup actually
    /// fires.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,
}

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tasks {
    /// Site settings refresh task configuration.
    pub refresh_settings: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Task execution interval.
    #[default(time::Duration::from_secs(5 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

/// Catalog API client configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Catalog {
    /// Base URL the catalog API is reachable at.
    #[default("http://127.0.0.1:8000/api/v1/".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl TryFrom<Catalog> for service::infra::api::http::Config {
    type Error = url::ParseError;

    fn try_from(value: Catalog) -> Result<Self, Self::Error> {
        let Catalog { base_url, timeout } = value;
        Ok(Self {
            base: Url::parse(&base_url)?,
            timeout,
        })
    }
}

/// Address suggestions provider configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Suggestions {
    /// Base URL the suggestions provider is reachable at.
    #[default("https://suggestions.dadata.ru/suggestions/api/4_1/rs/"
              .to_owned())]
    pub base_url: String,

    /// API key the provider authorizes requests with.
    #[default(SecretString::from(""))]
    pub token: SecretString,

    /// Number of suggestions to request.
    #[default(10)]
    pub count: u32,

    /// KLADR IDs of the regions to narrow suggestions down to.
    #[default(vec!["3900000000000".to_owned()])]
    pub regions: Vec<String>,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl TryFrom<Suggestions> for service::infra::hints::http::Config {
    type Error = url::ParseError;

    fn try_from(value: Suggestions) -> Result<Self, Self::Error> {
        let Suggestions {
            base_url,
            token,
            count,
            regions,
            timeout,
        } = value;
        Ok(Self {
            base: Url::parse(&base_url)?,
            token,
            count,
            regions,
            timeout,
        })
    }
}

/// Operator session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Path of the file the established session is mirrored into.
    #[default(".session.json".to_owned())]
    pub file: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

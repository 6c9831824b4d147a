use crate::core::constants::*;
use crate::core::credentials::{Credentials, CredentialsProvider};
use crate::core::environment::{Environment, ProcessEnv};
use crate::core::error::{ConfigError, InitializationError};
use crate::core::properties::PropertySet;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

/// Producer configuration: the bundled property file plus the environment.
///
/// A provider only exists once its properties are loaded. Property-backed
/// values are immutable after that, environment-backed values are read on
/// every call.
#[derive(Debug)]
pub struct ConfigurationProvider<E = ProcessEnv> {
    properties: PropertySet,
    env: E,
}

impl ConfigurationProvider<ProcessEnv> {
    /// Loads [`PROPERTIES_RESOURCE`] from the working directory.
    pub fn configure() -> Result<Self, InitializationError> {
        Self::configure_from(PROPERTIES_RESOURCE)
    }

    pub fn configure_from<P: AsRef<Path>>(path: P) -> Result<Self, InitializationError> {
        Self::configure_with(path, ProcessEnv)
    }
}

impl<E: Environment> ConfigurationProvider<E> {
    pub fn configure_with<P: AsRef<Path>>(path: P, env: E) -> Result<Self, InitializationError> {
        let path = path.as_ref();
        info!("loading properties from classpath ({})", path.display());

        let properties = PropertySet::load(path).inspect_err(|e| {
            error!("Could not load properties, streams cannot be configured: {e}");
        })?;
        properties.log_entries();

        Ok(Self::from_properties(properties, env))
    }

    /// Wraps an already loaded property set. Nothing is read or logged.
    pub fn from_properties(properties: PropertySet, env: E) -> Self {
        Self { properties, env }
    }

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    pub fn user_name(&self) -> Option<String> {
        self.env.var(ENV_USER_NAME)
    }

    pub fn user_password(&self) -> Option<String> {
        self.env.var(ENV_USER_PASSWORD)
    }

    pub fn stream_label(&self) -> Option<&str> {
        self.properties.get(KEY_STREAM_LABEL)
    }

    pub fn account_name(&self) -> Option<&str> {
        self.properties.get(KEY_ACCOUNT_NAME)
    }

    pub fn product(&self) -> Option<&str> {
        self.properties.get(KEY_PRODUCT)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.properties.get(KEY_CLIENT_ID)
    }

    pub fn publisher(&self) -> &str {
        self.properties.get(KEY_PUBLISHER).unwrap_or(DEFAULT_PUBLISHER)
    }

    pub fn producer_thread_count(&self) -> Result<i32, ConfigError> {
        self.int_or(KEY_PRODUCER_THREAD_COUNT, DEFAULT_PRODUCER_THREAD_COUNT)
    }

    /// Records per second. Negative means unlimited.
    pub fn rate_limit(&self) -> Result<f64, ConfigError> {
        match self.properties.get(KEY_RATE_LIMIT) {
            Some(raw) => parse_float(KEY_RATE_LIMIT, raw),
            None => Ok(DEFAULT_RATE_LIMIT),
        }
    }

    pub fn report_interval_seconds(&self) -> Result<i32, ConfigError> {
        self.int_or(KEY_REPORT_INTERVAL_SECONDS, DEFAULT_REPORT_INTERVAL_SECONDS)
    }

    /// The report interval as a duration; `None` when configured negative.
    pub fn report_interval(&self) -> Result<Option<Duration>, ConfigError> {
        let secs = self.report_interval_seconds()?;
        Ok(u64::try_from(secs).ok().map(Duration::from_secs))
    }

    pub fn kinesis_stream_name(&self) -> Option<String> {
        self.env.var(ENV_KINESIS_STREAM_NAME)
    }

    pub fn shard_count(&self) -> Result<i32, ConfigError> {
        self.required_int(KEY_SHARD_COUNT)
    }

    pub fn message_queue_size(&self) -> Result<i32, ConfigError> {
        self.required_int(KEY_MESSAGE_QUEUE_SIZE)
    }

    /// Resolves every value at once, failing on the first bad or missing key.
    pub fn settings(&self) -> Result<ProducerSettings, ConfigError> {
        Ok(ProducerSettings {
            user_name: self.user_name(),
            stream_label: self.stream_label().map(str::to_owned),
            account_name: self.account_name().map(str::to_owned),
            product: self.product().map(str::to_owned),
            client_id: self.client_id().map(str::to_owned),
            publisher: self.publisher().to_owned(),
            producer_thread_count: self.producer_thread_count()?,
            rate_limit: self.rate_limit()?,
            report_interval_seconds: self.report_interval_seconds()?,
            kinesis_stream_name: self.kinesis_stream_name(),
            shard_count: self.shard_count()?,
            message_queue_size: self.message_queue_size()?,
        })
    }

    fn int_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        match self.properties.get(key) {
            Some(raw) => parse_int(key, raw),
            None => Ok(default),
        }
    }

    fn required_int(&self, key: &str) -> Result<i32, ConfigError> {
        let raw = self
            .properties
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        parse_int(key, raw)
    }
}

impl<E: Environment> CredentialsProvider for ConfigurationProvider<E> {
    fn credentials(&self) -> Credentials {
        Credentials::new(
            self.env.var(ENV_ACCESS_KEY_ID),
            self.env.var(ENV_SECRET_ACCESS_KEY),
        )
    }

    fn refresh(&self) {
        // environment is always current
        debug!("credentials refresh requested; nothing to do");
    }
}

fn parse_int(key: &str, raw: &str) -> Result<i32, ConfigError> {
    raw.parse::<i32>().map_err(|_| ConfigError::Parse {
        key: key.to_string(),
        value: raw.to_string(),
        expected: "integer",
    })
}

// Surrounding whitespace is tolerated for floats only, not for integers.
fn parse_float(key: &str, raw: &str) -> Result<f64, ConfigError> {
    decimal_double(raw.trim()).ok_or_else(|| ConfigError::Parse {
        key: key.to_string(),
        value: raw.to_string(),
        expected: "number",
    })
}

// Double.parseDouble grammar without hex floats: exact `NaN`/`Infinity`
// spellings, decimal digits with optional exponent and a d/D/f/F suffix.
fn decimal_double(s: &str) -> Option<f64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let magnitude = match body {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        _ => {
            let digits = body
                .strip_suffix(|c: char| matches!(c, 'd' | 'D' | 'f' | 'F'))
                .unwrap_or(body);
            let leading_ok = digits.starts_with(|c: char| c.is_ascii_digit() || c == '.');
            let chars_ok = digits
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
            if !leading_ok || !chars_ok {
                return None;
            }
            digits.parse::<f64>().ok()?
        }
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Fully resolved producer settings. Secrets are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerSettings {
    pub user_name: Option<String>,
    pub stream_label: Option<String>,
    pub account_name: Option<String>,
    pub product: Option<String>,
    pub client_id: Option<String>,
    pub publisher: String,
    pub producer_thread_count: i32,
    pub rate_limit: f64,
    pub report_interval_seconds: i32,
    pub kinesis_stream_name: Option<String>,
    pub shard_count: i32,
    pub message_queue_size: i32,
}

pub mod core;
mod config;
pub mod params;

pub use config::{ConfigurationProvider, ProducerSettings};
pub use crate::core::credentials::{Credentials, CredentialsProvider};
pub use crate::core::environment::{Environment, MapEnv, ProcessEnv};
pub use crate::core::error::{ConfigError, InitializationError};
pub use crate::core::properties::PropertySet;

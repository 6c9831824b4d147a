pub mod constants;
pub mod credentials;
pub mod environment;
pub mod error;
pub mod properties;

use thiserror::Error;

mod api;
mod feed;
mod logging;
mod settings;

pub use api::Api;
pub use feed::Feed;
pub use logging::{InvalidLoggingStyle, Logging, LoggingStyle};
pub use settings::Settings;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;

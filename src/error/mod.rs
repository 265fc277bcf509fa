mod app;
mod config;
mod instrument;
mod remote;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use instrument::InstrumentError;
pub use remote::RemoteError;
pub use validation::ValidationError;

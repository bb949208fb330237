pub mod config;
pub mod error;
pub mod types;

pub use config::GrowthConfig;
pub use error::{ForecastError, ForecastResult};
pub use types::*;

//! Application configuration

mod db;
mod logging;

pub use db::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};

/// Load a `.env` file from the working directory when one exists.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}

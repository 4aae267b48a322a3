//! Environment-driven configuration for the items API.
//!
//! `PORT` and `MONGO_URI` are required; everything else carries a default.
//! Parsing happens once here, so a bad environment fails the boot instead
//! of the first request.

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Everything the binary reads from the environment, parsed up front.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// MongoDB database configuration
///
/// Holds the connection settings for the document store. It can be
/// constructed manually or loaded from environment variables (with the
/// `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Manual construction
/// let config = MongoConfig::new("mongodb://localhost:27017");
///
/// // With database name
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "items");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URI (required)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub uri: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a new MongoConfig with just a URI and default database
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: "items".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Create a MongoConfig with a specific database name
    pub fn with_database(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::new(uri)
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get a reference to the MongoDB URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGO_URI` (required) - MongoDB connection string
/// - `MONGO_DATABASE` (optional, default: "items") - Database name
/// - `MONGO_APP_NAME` (optional) - Application name for server logs
/// - `MONGO_MAX_POOL_SIZE` (optional, default: 100) - Max pool connections
/// - `MONGO_MIN_POOL_SIZE` (optional, default: 5) - Min pool connections
/// - `MONGO_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGO_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let uri = core_config::env_required("MONGO_URI")?;
        let database = core_config::env_or_default("MONGO_DATABASE", "items");
        let app_name = std::env::var("MONGO_APP_NAME").ok();

        let max_pool_size = parse_env_or("MONGO_MAX_POOL_SIZE", 100)?;
        let min_pool_size = parse_env_or("MONGO_MIN_POOL_SIZE", 5)?;
        let connect_timeout_secs = parse_env_or("MONGO_CONNECT_TIMEOUT_SECS", 10)?;
        let server_selection_timeout_secs = parse_env_or("MONGO_SERVER_SELECTION_TIMEOUT_SECS", 30)?;

        Ok(Self {
            uri,
            database,
            app_name,
            max_pool_size,
            min_pool_size,
            connect_timeout_secs,
            server_selection_timeout_secs,
        })
    }
}

#[cfg(feature = "config")]
fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "items");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
    }

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "inventory");
        assert_eq!(config.database, "inventory");
    }

    #[test]
    fn test_mongo_config_with_app_name() {
        let config = MongoConfig::new("mongodb://localhost:27017").with_app_name("items-api");
        assert_eq!(config.app_name, Some("items-api".to_string()));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017/items")),
                ("MONGO_DATABASE", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.uri, "mongodb://localhost:27017/items");
                assert_eq!(config.database, "items");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_custom_database() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_DATABASE", Some("inventory")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.database, "inventory");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_missing_uri() {
        temp_env::with_var_unset("MONGO_URI", || {
            let result = MongoConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("MONGO_URI"));
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                let result = MongoConfig::from_env();
                assert!(result.is_err());
            },
        );
    }
}

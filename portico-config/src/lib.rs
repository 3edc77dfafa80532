//! # portico-config
//!
//! Environment and `.env` loading for portico servers.
//!
//! ```rust
//! use portico_config::{env_vars, ConfigError, ConfigModule, FromEnv, Validate};
//!
//! #[derive(Clone)]
//! pub struct AppConfig {
//!     pub host: String,
//!     pub port: u16,
//! }
//!
//! impl FromEnv for AppConfig {
//!     fn load_from_env() -> Result<Self, ConfigError> {
//!         Ok(Self {
//!             host: env_vars::or_default("DOC_HOST", "127.0.0.1".to_string())?,
//!             port: env_vars::or_default("DOC_PORT", 3000)?,
//!         })
//!     }
//! }
//!
//! impl Validate for AppConfig {
//!     fn validate(&self) -> Result<(), ConfigError> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), ConfigError> {
//! let config = ConfigModule::<AppConfig>::from_env()?;
//! assert_eq!(config.get_ref().port, 3000);
//! # Ok(())
//! # }
//! ```
//!
//! ## Multi-Environment Support
//!
//! ```rust,ignore
//! // Loads from .env.development, .env.production, or .env.test
//! let config = ConfigModule::<AppConfig>::from_env_file(Environment::current())?;
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use portico::ServerMode;

pub mod env_vars;

/// Loaded and validated configuration
pub struct ConfigModule<T: Config> {
    config: Arc<T>,
}

impl<T: Config> ConfigModule<T> {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = T::load_from_env()?;
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// `.env` in the working directory if present, then the process environment.
    /// Variables already set in the process win over the file.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Load from .env file(s)
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        dotenv::from_path(path.into())?;
        Self::from_env()
    }

    /// Load with environment-specific file
    /// e.g., .env.development, .env.production
    pub fn from_env_file(env: Environment) -> Result<Self, ConfigError> {
        let env_file = match env {
            Environment::Development => ".env.development",
            Environment::Production => ".env.production",
            Environment::Test => ".env.test",
            Environment::Custom(name) => return Self::from_file(format!(".env.{}", name)),
        };

        Self::from_file(env_file)
    }

    pub fn get(&self) -> T {
        (*self.config).clone()
    }

    pub fn get_ref(&self) -> &T {
        &self.config
    }

    pub fn shared(&self) -> Arc<T> {
        self.config.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
    Custom(String),
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            custom => Self::Custom(custom.to_string()),
        }
    }

    /// From `NODE_ENV`, then `APP_ENV`, defaulting to development.
    pub fn current() -> Self {
        env::var("NODE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .map(|e| Self::from_str(&e))
            .unwrap_or(Self::Development)
    }

    /// Only production serves in production mode.
    pub fn server_mode(&self) -> ServerMode {
        match self {
            Self::Production => ServerMode::Production,
            _ => ServerMode::Development,
        }
    }
}

/// Trait for configuration validation
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Implemented for any type that implements both `FromEnv` and `Validate`.
pub trait Config: FromEnv + Validate + Clone + Send + Sync + 'static {}

impl<T> Config for T where T: FromEnv + Validate + Clone + Send + Sync + 'static {}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' not found")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {message}")]
    ParseError { key: String, message: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to load .env file: {0}")]
    DotenvError(#[from] dotenv::Error),
}

/// Trait for loading configuration from environment
pub trait FromEnv: Sized {
    fn load_from_env() -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[derive(Clone, Debug)]
    struct MailConfig {
        from: String,
        retries: u8,
    }

    impl FromEnv for MailConfig {
        fn load_from_env() -> Result<Self, ConfigError> {
            Ok(Self {
                from: env_vars::required("PORTICO_TEST_MAIL_FROM")?,
                retries: env_vars::or_default("PORTICO_TEST_MAIL_RETRIES", 3)?,
            })
        }
    }

    impl Validate for MailConfig {
        fn validate(&self) -> Result<(), ConfigError> {
            if !self.from.contains('@') {
                return Err(ConfigError::ValidationError(format!(
                    "'{}' is not an address",
                    self.from
                )));
            }
            Ok(())
        }
    }

    #[test]
    #[serial]
    fn test_environment_current() {
        env::remove_var("NODE_ENV");
        env::remove_var("APP_ENV");
        assert_eq!(Environment::current(), Environment::Development);

        env::set_var("APP_ENV", "prod");
        assert_eq!(Environment::current(), Environment::Production);

        env::set_var("NODE_ENV", "staging");
        assert_eq!(
            Environment::current(),
            Environment::Custom("staging".to_string())
        );
        assert_eq!(Environment::current().server_mode(), ServerMode::Development);

        env::remove_var("NODE_ENV");
        env::remove_var("APP_ENV");
    }

    #[test]
    fn test_server_mode() {
        assert_eq!(
            Environment::from_str("Production").server_mode(),
            ServerMode::Production
        );
        assert_eq!(Environment::Test.server_mode(), ServerMode::Development);
    }

    #[test]
    #[serial]
    fn test_from_env_validates() {
        env::set_var("PORTICO_TEST_MAIL_FROM", "nobody");
        let err = ConfigModule::<MailConfig>::from_env().err().unwrap();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        env::set_var("PORTICO_TEST_MAIL_FROM", "noreply@example.com");
        let config = ConfigModule::<MailConfig>::from_env().unwrap();
        assert_eq!(config.get().from, "noreply@example.com");
        assert_eq!(config.get_ref().retries, 3);

        env::remove_var("PORTICO_TEST_MAIL_FROM");
    }

    #[test]
    #[serial]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("portico-config-{}.env", std::process::id()));
        std::fs::write(&path, "PORTICO_TEST_MAIL_FROM=file@example.com\nPORTICO_TEST_MAIL_RETRIES=5\n")
            .unwrap();
        env::remove_var("PORTICO_TEST_MAIL_FROM");
        env::remove_var("PORTICO_TEST_MAIL_RETRIES");

        let config = ConfigModule::<MailConfig>::from_file(&path).unwrap();
        assert_eq!(config.get_ref().from, "file@example.com");
        assert_eq!(config.get_ref().retries, 5);

        env::remove_var("PORTICO_TEST_MAIL_FROM");
        env::remove_var("PORTICO_TEST_MAIL_RETRIES");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    #[serial]
    fn test_missing_file() {
        let err = ConfigModule::<MailConfig>::from_file("/definitely/not/here.env")
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::DotenvError(_)));
    }
}

use portico::{ModeConfig, ServerMode};
use portico_config::{env_vars, ConfigError, Environment, FromEnv, Validate};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// `HOST`, defaults to `127.0.0.1`.
    pub host: String,
    /// `JWT_SECRET`, also the cookie signing secret.
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    pub fn mode(&self) -> ServerMode {
        self.environment.server_mode()
    }

    pub fn mode_config(&self) -> Result<ModeConfig, ConfigError> {
        let mode = match self.mode() {
            ServerMode::Development => ModeConfig::development(),
            ServerMode::Production => {
                let secret = self
                    .jwt_secret
                    .clone()
                    .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
                ModeConfig::production(secret)
            }
        };
        Ok(mode.with_hostname(self.host.clone()))
    }
}

impl FromEnv for AppConfig {
    fn load_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::current(),
            host: env_vars::or_default("HOST", "127.0.0.1".to_string())?,
            jwt_secret: env_vars::optional("JWT_SECRET")?,
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mode() == ServerMode::Production && self.jwt_secret.is_none() {
            return Err(ConfigError::ValidationError(
                "JWT_SECRET must be set in production".to_string(),
            ));
        }
        Ok(())
    }
}

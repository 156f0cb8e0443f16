//! Service configuration.
//!
//! Secrets come from the environment (`JWT_SECRET_KEY`, `DATABASE_URL`) and
//! are required at startup. Everything else is read from a TOML file named by
//! `CONFIG_PATH`, or `config/local.toml` when unset. Every field has a
//! default, so without either file the built-in values apply.
//!
//! The sign-up timeout must be shorter than the request timeout, otherwise a
//! slow user service would be cut off by the request timeout first.
//!
//! ```toml
//! env = "prod"
//!
//! [http_server]
//! address = "0.0.0.0:8080"
//! timeout_secs = 4
//!
//! [cors]
//! allowed_origins = ["http://localhost:4200"]
//!
//! [signup]
//! url = "http://backend:8069/user"
//! timeout_secs = 3
//! ```

use std::{fmt, path::Path, time::Duration};

use serde::Deserialize;

use crate::prelude::*;
use crate::proxy::DEFAULT_SIGNUP_URL;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/local.toml";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Reads a required environment variable.
pub fn get_env_variable(var: &'static str) -> Result<String> {
    std::env::var(var).map_err(|_| Error::MissingEnv(var))
}

/// Deployment environment; selects the log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub address: String,
    /// Whole-request timeout.
    pub timeout_secs: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: String::from("0.0.0.0:8080"),
            timeout_secs: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![String::from("http://localhost:4200")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    /// User service endpoint that receives forwarded sign-ups.
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_SIGNUP_URL),
            timeout_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub env: Env,
    pub http_server: HttpServerConfig,
    pub cors: CorsConfig,
    pub signup: SignupConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `CONFIG_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::load(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_PATH`] when it exists, or the
    /// built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(Path::new(path));
        }
        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::from_file(default);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.signup.timeout_secs >= self.http_server.timeout_secs {
            return Err(Error::SignupTimeout {
                signup: self.signup.timeout_secs,
                request: self.http_server.timeout_secs,
            });
        }
        Ok(())
    }
}

impl HttpServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SignupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Token signing secret.
#[derive(Clone)]
pub struct JwtSecret(Vec<u8>);

impl JwtSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(Error::EmptyEnv(JWT_SECRET_ENV));
        }
        Ok(Self(secret))
    }

    /// Reads `JWT_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(get_env_variable(JWT_SECRET_ENV)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtSecret(REDACTED)")
    }
}

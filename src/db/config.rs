//! Database connection configuration.

use std::fmt::Display;

use crate::config::get_env_variable;
use crate::prelude::*;

/// Database connection configuration.
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

impl DbConfig {
    /// Reads the `DATABASE_URL` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: get_env_variable("DATABASE_URL")?,
        })
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

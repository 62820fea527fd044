//! Server configuration read from the environment

use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where accommodations, prices and terms are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store: StoreKind,
    /// Required for the postgres store
    pub database_url: Option<String>,
    pub bind_address: SocketAddr,
    /// Base URLs of the user service, tried in turn
    pub user_service_urls: Vec<String>,
    pub identity_timeout: Duration,
    pub cors_allowed_origin: String,
    pub run_migrations: bool,
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let store = match var("STORE").as_deref() {
            None | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => return Err(invalid("STORE", other)),
        };

        let database_url = var("DATABASE_URL");
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let bind_address = match var("BIND_ADDRESS") {
            Some(value) => value.parse().map_err(|_| invalid("BIND_ADDRESS", &value))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8082)),
        };

        let user_service_urls: Vec<String> = var("USER_SERVICE_URLS")
            .unwrap_or_else(|| "http://localhost:8081".to_string())
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
        if user_service_urls.is_empty() {
            return Err(ConfigError::Missing("USER_SERVICE_URLS"));
        }

        let identity_timeout = match var("IDENTITY_TIMEOUT_MS") {
            Some(value) => Duration::from_millis(
                value
                    .parse()
                    .map_err(|_| invalid("IDENTITY_TIMEOUT_MS", &value))?,
            ),
            None => Duration::from_millis(5000),
        };

        Ok(Self {
            store,
            database_url,
            bind_address,
            user_service_urls,
            identity_timeout,
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3005".to_string()),
            run_migrations: flag(&var, "RUN_MIGRATIONS", store == StoreKind::Postgres)?,
            seed_data: flag(&var, "SEED_DATA", false)?,
        })
    }
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
    }
}

fn flag<F>(var: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name).as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(invalid(name, other)),
    }
}

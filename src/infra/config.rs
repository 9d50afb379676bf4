//! Centralized configuration (environment variables + defaults).
//!
//! The database is addressed either by `DATABASE_URL`, or by the individual
//! `DB_USERNAME` / `DB_PASSWORD` / `DB_HOST` / `DB_NAME` variables (with
//! optional `DB_PORT` and `USE_SSL`) when no URL is given.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("DATABASE_URL is not a valid PostgreSQL URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Where the PostgreSQL server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Url(String),
    Parts {
        username: String,
        password: String,
        host: String,
        port: u16,
        database: String,
        require_ssl: bool,
    },
}

impl DatabaseTarget {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            DatabaseTarget::Url(url) => PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl),
            DatabaseTarget::Parts {
                username,
                password,
                host,
                port,
                database,
                require_ssl,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)
                .ssl_mode(if *require_ssl {
                    PgSslMode::Require
                } else {
                    PgSslMode::Prefer
                })),
        }
    }

    /// Connection description safe to print (no password).
    pub fn redacted(&self) -> String {
        match self {
            DatabaseTarget::Url(url) => match url.split_once('@') {
                Some((_, rest)) => format!("postgres://***@{}", rest),
                None => url.clone(),
            },
            DatabaseTarget::Parts {
                username,
                host,
                port,
                database,
                ..
            } => format!("postgres://{}:***@{}:{}/{}", username, host, port, database),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseTarget,
    pub bind_addr: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Parts {
                username: required("DB_USERNAME")?,
                password: required("DB_PASSWORD")?,
                host: required("DB_HOST")?,
                port: parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?,
                database: required("DB_NAME")?,
                require_ssl: parse_flag("USE_SSL", get("USE_SSL"))?,
            },
        };

        Ok(Self {
            database,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?
            .max(1),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(false);
    };
    match v.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "require" => Ok(true),
        "false" | "f" | "0" | "no" | "disable" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: v }),
    }
}

//! Process settings read from the environment (optionally seeded from a `.env` file).

use crate::error::ConfigError;
use regex::Regex;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

/// Database that always exists on a PostgreSQL server; used to create the target database.
pub const ADMIN_DATABASE: &str = "postgres";

fn safe_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+$").expect("static identifier pattern"))
}

/// True when `name` is made of word characters only and may be spliced into DDL.
pub fn is_safe_identifier(name: &str) -> bool {
    safe_identifier().is_match(name)
}

#[derive(Clone)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Options for the application database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.name)
    }

    /// Options for the server's maintenance database, used before the target exists.
    pub fn admin_connect_options(&self) -> PgConnectOptions {
        self.options_for(ADMIN_DATABASE)
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    /// Free-form deployment name, only reported by the health endpoint.
    pub environment: String,
    pub bind_addr: SocketAddr,
    pub init_max_retries: u32,
    pub init_retry_delay: Duration,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let name = text("DB_NAME", "fastapi_app");
        if !is_safe_identifier(&name) {
            return Err(ConfigError::Invalid {
                key: "DB_NAME",
                message: format!("'{}' must contain only letters, digits and underscores", name),
            });
        }

        let database = DatabaseSettings {
            user: text("DB_USER", "postgres"),
            password: text("DB_PASSWORD", "postgres"),
            host: text("DB_HOST", "localhost"),
            port: parse(&lookup, "DB_PORT", 5432)?,
            name,
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 5)?,
        };

        Ok(Settings {
            database,
            environment: text("ENVIRONMENT", "development"),
            bind_addr: parse(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?,
            init_max_retries: parse(&lookup, "DB_INIT_MAX_RETRIES", 10)?,
            init_retry_delay: Duration::from_secs(parse(&lookup, "DB_INIT_RETRY_DELAY_SECS", 3)?),
        })
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: format!("'{}': {}", raw, e),
        }),
    }
}

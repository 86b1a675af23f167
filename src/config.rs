use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("DB_POOL_SIZE must be at least 1")]
    EmptyPool,

    #[error("DATABASE_URL is invalid: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

/// Where the database lives. A full URL always wins over discrete settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub pool_size: u32,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // `DB_*` beats the libpq-style `PG*` alias.
        let var = |primary: &str, alias: &str| get(primary).or_else(|| get(alias));

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                host: var("DB_HOST", "PGHOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_number("DB_PORT", var("DB_PORT", "PGPORT"), 5432)?,
                database: var("DB_NAME", "PGDATABASE").unwrap_or_else(|| "todo_db".to_string()),
                user: var("DB_USER", "PGUSER").unwrap_or_else(|| "postgres".to_string()),
                password: var("DB_PASSWORD", "PGPASSWORD")
                    .unwrap_or_else(|| "postgres".to_string()),
            },
        };

        let pool_size = parse_number("DB_POOL_SIZE", get("DB_POOL_SIZE"), 10)?;
        if pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number("PORT", get("PORT"), 3000)?,
            database,
            pool_size,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend/public")),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.database {
            DatabaseConfig::Url(url) => {
                PgConnectOptions::from_str(url).map_err(ConfigError::InvalidDatabaseUrl)
            }
            DatabaseConfig::Parts {
                host,
                port,
                database,
                user,
                password,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .database(database)
                .username(user)
                .password(password)),
        }
    }
}

fn parse_number<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidNumber { name, value: raw }),
        },
    }
}

//! Process configuration read from the environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use crate::store::PoolSettings;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Log profile selected by `ENVIRONMENT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

/// PEM certificate chain and private key for serving HTTPS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub pool: PoolSettings,
    pub request_timeout: Duration,
    /// Create the database named in `database_url` when it does not exist.
    pub create_database: bool,
    /// Plain HTTP when `None`.
    pub tls: Option<TlsFiles>,
}

impl Settings {
    /// | Env var                   | Default        |
    /// |---------------------------|----------------|
    /// | `DATABASE_URL`            | required       |
    /// | `BIND_ADDR`               | `0.0.0.0:8443` |
    /// | `ENVIRONMENT`             | `dev`          |
    /// | `DB_MAX_CONNECTIONS`      | `5`            |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`           |
    /// | `REQUEST_TIMEOUT_SECS`    | `10`           |
    /// | `CREATE_DATABASE`         | `false`        |
    /// | `CERT_FILE`               | unset          |
    /// | `KEY_FILE`                | unset          |
    ///
    /// `CERT_FILE` and `KEY_FILE` enable TLS and must be set together.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr: SocketAddr = parse_or(get("BIND_ADDR"), "BIND_ADDR", "0.0.0.0:8443".parse().ok())?;
        let environment = match get("ENVIRONMENT").as_deref() {
            Some("prod") => Environment::Prod,
            _ => Environment::Dev,
        };
        let max_connections: u32 = parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", Some(5))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let acquire_secs: u64 = parse_or(get("DB_ACQUIRE_TIMEOUT_SECS"), "DB_ACQUIRE_TIMEOUT_SECS", Some(10))?;
        let request_secs: u64 = parse_or(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", Some(10))?;
        let create_database = parse_or(get("CREATE_DATABASE"), "CREATE_DATABASE", Some(false))?;
        let tls = match (get("CERT_FILE"), get("KEY_FILE")) {
            (Some(cert), Some(key)) => Some(TlsFiles {
                cert_file: PathBuf::from(cert),
                key_file: PathBuf::from(key),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("KEY_FILE")),
            (None, Some(_)) => return Err(ConfigError::Missing("CERT_FILE")),
        };

        Ok(Settings {
            database_url,
            bind_addr,
            environment,
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_secs),
            },
            request_timeout: Duration::from_secs(request_secs),
            create_database,
            tls,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    var: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { var, value: v }),
        None => default.ok_or(ConfigError::Missing(var)),
    }
}

use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 27017;
const DEFAULT_USERNAME: &str = "root";
const DEFAULT_DATABASE: &str = "db_test";
const DEFAULT_COLLECTION: &str = "test";
const DEFAULT_PASSWORD: &str = "example";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Parameters used to compose a `mongodb://` connection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionParams {
    pub fn uri(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/",
            self.username, self.password, self.host, self.port
        )
    }

    pub fn redacted_uri(&self) -> String {
        redact_uri(&self.uri())
    }
}

/// Replaces the password part of a URI's userinfo with `****`.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest_start = scheme_end + 3;
    let rest = &uri[rest_start..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return uri.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:****{}",
            &uri[..rest_start],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => uri.to_string(),
    }
}

/// Runtime settings for the session binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: ConnectionParams,
    pub uri_override: Option<String>,
    pub database_name: String,
    pub collection_name: String,
    pub connect_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionParams {
                password: DEFAULT_PASSWORD.to_string(),
                ..ConnectionParams::default()
            },
            uri_override: None,
            database_name: DEFAULT_DATABASE.to_string(),
            collection_name: DEFAULT_COLLECTION.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match get("MONGODB_PORT") {
            Some(raw) => parse_value("MONGODB_PORT", raw)?,
            None => defaults.connection.port,
        };
        let timeout_secs = match get("MONGODB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => parse_value("MONGODB_CONNECT_TIMEOUT_SECS", raw)?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };
        // the driver treats a zero connect timeout as "no timeout"
        if timeout_secs == 0 {
            return Err(Error::Config {
                key: "MONGODB_CONNECT_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            connection: ConnectionParams {
                host: get("MONGODB_HOST").unwrap_or(defaults.connection.host),
                port,
                username: get("MONGODB_USERNAME").unwrap_or(defaults.connection.username),
                // an explicitly empty password is meaningful, so no filter here
                password: lookup("MONGODB_PASSWORD").unwrap_or(defaults.connection.password),
            },
            uri_override: get("MONGODB_URI"),
            database_name: get("MONGODB_NAME").unwrap_or(defaults.database_name),
            collection_name: get("MONGODB_COLLECTION").unwrap_or(defaults.collection_name),
            connect_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn uri(&self) -> String {
        self.uri_override
            .clone()
            .unwrap_or_else(|| self.connection.uri())
    }

    pub fn redacted_uri(&self) -> String {
        match &self.uri_override {
            Some(uri) => redact_uri(uri),
            None => self.connection.redacted_uri(),
        }
    }
}

fn parse_value<T>(key: &'static str, raw: String) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| Error::Config {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

//! Database settings.
//!
//! Credentials come from four named variables: `USER`, `PASSWORD`, `SERVER`
//! and `DATABASE`. `SERVER` accepts `host`, `host,port` or `host:port`.

use std::fmt;

use crate::error::ConfigError;

/// Default driver identifier reported to the server.
pub const DEFAULT_DB_DRIVER: &str = "ODBC Driver 17 for SQL Server";

/// Default SQL Server port.
pub const DEFAULT_PORT: u16 = 1433;

/// Names of the required settings, in validation order.
pub const REQUIRED_SETTINGS: [&str; 4] = ["USER", "PASSWORD", "SERVER", "DATABASE"];

/// Resolved database credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub server: ServerAddress,
    pub database: String,
}

/// Host and port parsed from the `SERVER` setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl ServerAddress {
    /// Parse `host`, `host,port` or `host:port`.
    ///
    /// ```
    /// use bureau_output::ServerAddress;
    ///
    /// let addr = ServerAddress::parse("db.local,1444").unwrap();
    /// assert_eq!(addr.host, "db.local");
    /// assert_eq!(addr.port, 1444);
    /// assert_eq!(ServerAddress::parse("db.local").unwrap().port, 1433);
    /// ```
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        let Some((host, port)) = value.rsplit_once([',', ':']) else {
            return Ok(Self {
                host: value.to_string(),
                port: DEFAULT_PORT,
            });
        };
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                name: "SERVER",
                value: port.to_string(),
            })?;
        if host.trim().is_empty() {
            return Err(ConfigError::MissingSetting { name: "SERVER" });
        }
        Ok(Self {
            host: host.trim().to_string(),
            port,
        })
    }
}

impl DatabaseSettings {
    /// Resolve settings through `lookup`, which maps a variable name to its
    /// value. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingSetting { name })
        };

        let [user, password, server, database] = REQUIRED_SETTINGS;
        let user = require(user)?;
        let password = require(password)?;
        let server = ServerAddress::parse(&require(server)?)?;
        let database = require(database)?;

        Ok(Self {
            user,
            password,
            server,
            database,
        })
    }

    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("server", &self.server)
            .field("database", &self.database)
            .finish()
    }
}

/// How the client presents itself and treats the server certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Driver identifier, sent as the application name.
    pub driver: String,
    /// Accept the server certificate without validation.
    pub trusted_connection: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DB_DRIVER.to_string(),
            trusted_connection: true,
        }
    }
}

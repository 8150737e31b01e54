//! Service configuration, loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_HOST` | `0.0.0.0` |
//! | `STOREFRONT_PORT` | `1337` |
//! | `STOREFRONT_DATA_DIR` | unset (memory only) |
//! | `STOREFRONT_CHANNEL_CAPACITY` | `32` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 1337,
        }
    }
}

impl ServerSettings {
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Collection actor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Where collection snapshots live. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Mailbox size of each collection actor.
    pub channel_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            channel_capacity: 32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server = ServerSettings {
            host: parse_var(&lookup, "STOREFRONT_HOST")?.unwrap_or(defaults.server.host),
            port: parse_var(&lookup, "STOREFRONT_PORT")?.unwrap_or(defaults.server.port),
        };

        let channel_capacity = parse_var(&lookup, "STOREFRONT_CHANNEL_CAPACITY")?
            .unwrap_or(defaults.store.channel_capacity);
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "STOREFRONT_CHANNEL_CAPACITY".to_string(),
                value: "0".to_string(),
            });
        }

        let store = StoreSettings {
            data_dir: lookup("STOREFRONT_DATA_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            channel_capacity,
        };

        Ok(Self { server, store })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {key} has an invalid value: {value:?}")]
    InvalidValue { key: String, value: String },
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(value) if !value.is_empty() => value.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        _ => Ok(None),
    }
}

//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::RouteCacheConfig;

pub const LISTEN_ADDR_VAR: &str = "METRO_LISTEN_ADDR";
pub const NETWORK_FILE_VAR: &str = "METRO_NETWORK_FILE";
pub const STATIC_DIR_VAR: &str = "METRO_STATIC_DIR";
pub const REFRESH_SECS_VAR: &str = "METRO_REFRESH_SECS";
pub const CACHE_TTL_SECS_VAR: &str = "METRO_ROUTE_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_VAR: &str = "METRO_ROUTE_CACHE_CAPACITY";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,

    /// JSON network document to serve routes from.
    pub network_file: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// How often to reload the network file. Zero disables periodic reloads.
    pub refresh_interval: Duration,

    pub route_cache: RouteCacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            network_file: PathBuf::from("data/network.json"),
            static_dir: PathBuf::from("static"),
            refresh_interval: Duration::from_secs(300),
            route_cache: RouteCacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let listen_addr = parse_var(&lookup, LISTEN_ADDR_VAR)?.unwrap_or(defaults.listen_addr);
        let network_file = lookup(NETWORK_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.network_file);
        let static_dir = lookup(STATIC_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let refresh_interval = parse_var::<u64>(&lookup, REFRESH_SECS_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);
        let ttl = parse_var::<u64>(&lookup, CACHE_TTL_SECS_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.route_cache.ttl);
        let max_capacity =
            parse_var(&lookup, CACHE_CAPACITY_VAR)?.unwrap_or(defaults.route_cache.max_capacity);

        Ok(Self {
            listen_addr,
            network_file,
            static_dir,
            refresh_interval,
            route_cache: RouteCacheConfig { ttl, max_capacity },
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    parsed
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.network_file, PathBuf::from("data/network.json"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.route_cache.ttl, Duration::from_secs(3600));
        assert_eq!(config.route_cache.max_capacity, 10_000);
    }

    #[test]
    fn overrides_from_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (LISTEN_ADDR_VAR, "0.0.0.0:8080"),
            (NETWORK_FILE_VAR, "/srv/cairo.json"),
            (STATIC_DIR_VAR, "/srv/static"),
            (REFRESH_SECS_VAR, "0"),
            (CACHE_TTL_SECS_VAR, " 60 "),
            (CACHE_CAPACITY_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.network_file, PathBuf::from("/srv/cairo.json"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.refresh_interval, Duration::ZERO);
        assert_eq!(config.route_cache.ttl, Duration::from_secs(60));
        assert_eq!(config.route_cache.max_capacity, 5);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup(&[(REFRESH_SECS_VAR, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name, ref value, .. } if name == REFRESH_SECS_VAR && value == "soon"
        ));

        let err = ServerConfig::from_lookup(lookup(&[(LISTEN_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().starts_with("METRO_LISTEN_ADDR has invalid value \"localhost\""));

        assert!(ServerConfig::from_lookup(lookup(&[(CACHE_CAPACITY_VAR, "-1")])).is_err());
    }
}

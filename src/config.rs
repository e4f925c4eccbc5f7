//! # Connection Configuration
//!
//! Purpose: Describe how to reach the Redis server and translate that into
//! the underlying client's connection parameters.

use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::Deserialize;

/// Connection configuration for [`RedisTool`](crate::RedisTool).
///
/// Every field has a default matching a stock local Redis, so partial
/// configs deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Server hostname or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Optional AUTH password.
    pub password: Option<String>,
    /// Database index selected after connecting.
    pub database: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            database: 0,
        }
    }
}

impl RedisConfig {
    /// Builds the underlying client's connection parameters.
    ///
    /// Authentication and database selection are handled by the client during
    /// connection setup, once per established connection.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.database,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// Returns the `host:port` pair, used in log messages.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RedisConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.password, None);
        assert_eq!(config.database, 0);
        assert_eq!(config.addr(), "127.0.0.1:6379");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RedisConfig =
            serde_json::from_str(r#"{"host": "redis.internal"}"#).expect("valid config");
        assert_eq!(config.host, "redis.internal");
        assert_eq!(config.port, 6379);
        assert_eq!(config.password, None);
        assert_eq!(config.database, 0);
    }

    #[test]
    fn test_full_config() {
        let config: RedisConfig = serde_json::from_str(
            r#"{"host": "10.0.0.5", "port": 6380, "password": "secret", "database": 2}"#,
        )
        .expect("valid config");
        assert_eq!(config.port, 6380);
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.database, 2);
    }

    #[test]
    fn test_connection_info() {
        let config = RedisConfig {
            host: "10.0.0.5".to_string(),
            port: 6380,
            password: Some("secret".to_string()),
            database: 2,
        };

        let info = config.connection_info();
        match info.addr {
            ConnectionAddr::Tcp(host, port) => {
                assert_eq!(host, "10.0.0.5");
                assert_eq!(port, 6380);
            }
            other => panic!("unexpected address: {:?}", other),
        }
        assert_eq!(info.redis.db, 2);
        assert_eq!(info.redis.password.as_deref(), Some("secret"));
    }
}

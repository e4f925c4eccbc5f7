//! # Client Facade
//!
//! Purpose: Expose connection setup with retry and a handful of pass-through
//! key/hash commands, each guarded by a liveness check.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: One type owns the connection and the command surface.
//! 2. **Delegation**: Each method forwards to the underlying client's command.
//! 3. **Liveness First**: A PING precedes every command; a dead connection is
//!    reported as [`ToolError::NotConnected`] instead of a half-sent command.
//! 4. **Bounded Retry**: Connection setup retries a fixed number of times with
//!    constant backoff, then fails with the last error.

use std::collections::HashMap;
use std::time::Duration;

use backon::{BlockingRetryable, ConstantBuilder};
use redis::{Client, Commands, Connection, FromRedisValue, ToRedisArgs};
use tracing::{debug, warn};

use crate::config::RedisConfig;
use crate::error::{ToolError, ToolResult};

/// Retries performed after the first connection attempt.
pub const DEFAULT_RETRIES: u32 = 3;

/// Expiration applied by [`RedisTool::set_index`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

/// Pause between connection attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Synchronous convenience facade over a single Redis connection.
///
/// The facade owns its connection exclusively for its lifetime. Each data
/// operation checks that the connection still answers PING and then delegates
/// to the underlying client's equivalent command.
pub struct RedisTool {
    conn: Connection,
    retries: u32,
}

impl std::fmt::Debug for RedisTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTool")
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

impl RedisTool {
    /// Connects with [`DEFAULT_RETRIES`].
    pub fn connect(config: &RedisConfig) -> ToolResult<Self> {
        Self::connect_with_retries(config, DEFAULT_RETRIES)
    }

    /// Connects, retrying up to `retries` times after the first attempt.
    ///
    /// Authentication and database selection run inside each attempt, so a
    /// connection that comes back is fully set up. Exhausting the budget
    /// returns [`ToolError::Connect`] with the error from the last attempt.
    pub fn connect_with_retries(config: &RedisConfig, retries: u32) -> ToolResult<Self> {
        let client = Client::open(config.connection_info())?;
        let addr = config.addr();

        let backoff = ConstantBuilder::default()
            .with_delay(RETRY_DELAY)
            .with_max_times(retries as usize);

        let conn = (|| client.get_connection())
            .retry(backoff)
            .notify(|err: &redis::RedisError, delay: Duration| {
                warn!(%addr, error = %err, ?delay, "redis connection attempt failed");
            })
            .call()
            .map_err(|source| ToolError::Connect {
                attempts: retries + 1,
                source,
            })?;

        debug!(%addr, database = config.database, "connected to redis");
        Ok(RedisTool { conn, retries })
    }

    /// Returns true when the connection answers PING with PONG.
    ///
    /// Transport or protocol failures are reported as `false`, never as an
    /// error.
    pub fn is_connected(&mut self) -> bool {
        redis::cmd("PING")
            .query::<String>(&mut self.conn)
            .map(|reply| reply == "PONG")
            .unwrap_or(false)
    }

    fn ensure_connected(&mut self) -> ToolResult<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ToolError::NotConnected)
        }
    }

    /// Stores a value, with SETEX when a TTL is given and plain SET otherwise.
    pub fn set_value<V: ToRedisArgs>(
        &mut self,
        key: &str,
        value: V,
        ttl: Option<Duration>,
    ) -> ToolResult<()> {
        self.ensure_connected()?;
        match ttl {
            Some(ttl) => {
                let _: () = self.conn.set_ex(key, value, ttl.as_secs())?;
            }
            None => {
                let _: () = self.conn.set(key, value)?;
            }
        }
        Ok(())
    }

    /// Stores an index entry: a string value with [`DEFAULT_TTL`].
    pub fn set_index(&mut self, key: &str, value: &str) -> ToolResult<()> {
        self.set_value(key, value, Some(DEFAULT_TTL))
    }

    /// Stores a hash field and refreshes the hash's expiration.
    ///
    /// HSET and EXPIRE are issued as one MULTI/EXEC transaction so the hash
    /// never commits without its TTL. Without a TTL only the HSET runs.
    pub fn set_hash_value<V: ToRedisArgs>(
        &mut self,
        hash: &str,
        field: &str,
        value: V,
        ttl: Option<Duration>,
    ) -> ToolResult<()> {
        self.ensure_connected()?;
        let mut pipe = redis::pipe();
        pipe.atomic().hset(hash, field, value).ignore();
        if let Some(ttl) = ttl {
            pipe.expire(hash, ttl.as_secs() as i64).ignore();
        }
        let _: () = pipe.query(&mut self.conn)?;
        Ok(())
    }

    /// Fetches a value by key. Returns `Ok(None)` when the key is missing.
    pub fn get_value<V: FromRedisValue>(&mut self, key: &str) -> ToolResult<Option<V>> {
        self.ensure_connected()?;
        Ok(self.conn.get(key)?)
    }

    /// Fetches a hash field. Returns `Ok(None)` when hash or field is missing.
    pub fn get_hash_value<V: FromRedisValue>(
        &mut self,
        hash: &str,
        field: &str,
    ) -> ToolResult<Option<V>> {
        self.ensure_connected()?;
        Ok(self.conn.hget(hash, field)?)
    }

    /// Fetches all fields of a hash. A missing hash is the empty map.
    pub fn get_all_hash<V: FromRedisValue>(
        &mut self,
        hash: &str,
    ) -> ToolResult<HashMap<String, V>> {
        self.ensure_connected()?;
        Ok(self.conn.hgetall(hash)?)
    }

    /// Deletes a key. Returns true when a key was removed.
    pub fn delete_value(&mut self, key: &str) -> ToolResult<bool> {
        self.ensure_connected()?;
        let removed: i64 = self.conn.del(key)?;
        Ok(removed > 0)
    }

    /// Returns true when the key exists.
    pub fn exists(&mut self, key: &str) -> ToolResult<bool> {
        self.ensure_connected()?;
        Ok(self.conn.exists(key)?)
    }

    /// Removes every key in the selected database.
    pub fn flush_database(&mut self) -> ToolResult<()> {
        self.ensure_connected()?;
        let _: () = redis::cmd("FLUSHDB").query(&mut self.conn)?;
        Ok(())
    }

    /// Collects all keys matching `pattern` via cursor-based SCAN.
    ///
    /// The cursor is followed to exhaustion, so this never issues the
    /// blocking KEYS command.
    pub fn keys(&mut self, pattern: &str) -> ToolResult<Vec<String>> {
        self.ensure_connected()?;
        let iter = self.conn.scan_match::<_, String>(pattern)?;
        Ok(iter.collect())
    }

    /// Retry budget this facade was built with.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Borrows the raw connection for commands outside this facade.
    pub fn connection(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Consumes the facade and hands back the raw connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

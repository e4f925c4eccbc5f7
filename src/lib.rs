//! # Redis Convenience Client
//!
//! Purpose: Provide a small, synchronous facade over the `redis` crate for
//! connection setup with retry plus everyday key and hash commands.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `RedisTool` hides connection setup and command plumbing.
//! 2. **Delegation**: Every operation maps onto one underlying client call.
//! 3. **Liveness First**: Commands are only sent over a connection that answers PING.
//! 4. **Fail Fast**: Connection setup gives up after a bounded number of attempts.

mod client;
mod config;
mod error;

pub use client::{RedisTool, DEFAULT_RETRIES, DEFAULT_TTL, RETRY_DELAY};
pub use config::RedisConfig;
pub use error::{ToolError, ToolResult};

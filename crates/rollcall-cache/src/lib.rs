//! # rollcall-cache
//!
//! Storage for login sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: [`RedisSessionStore`] keeps sessions under a TTL and
//!   indexes them per account so they can be revoked together
//! - **In-memory fallback**: [`MemorySessionStore`] for tests and deployments
//!   without Redis
//!
//! ## Example
//!
//! ```ignore
//! use rollcall_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool, 8 * 60 * 60);
//! sessions.put(&session).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session stores
pub use session::{MemorySessionStore, RedisSessionStore};

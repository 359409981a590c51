//! Login session stores
//!
//! Both stores implement `rollcall_core::SessionStore`.

mod memory_store;
mod redis_store;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;

//! Document store backends for DeepBase
//!
//! This crate implements [`DocumentStore`](deepbase_core::DocumentStore) for:
//! - MemoryStore: in-process documents in a sharded DashMap
//! - RedisStore: RedisJSON over a multiplexed connection (feature `redis`)
//!
//! Both backends report the same outcomes for the same shapes, so the
//! adapter behaves identically on either.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

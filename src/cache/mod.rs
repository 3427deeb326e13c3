//! Caching utilities.
//!
//! A generic time-based cache, used by the profile-caching client decorator.

pub mod timed_cache;

pub use timed_cache::TimedCache;

//! Trace-driven comparison of keycache's eviction policies.
//!
//! [`generator`] writes synthetic traces, [`input`] streams them back,
//! [`runner`] replays them against LRU and LFU caches, and [`stats`]
//! reports the outcome.

pub mod generator;
pub mod input;
pub mod models;
pub mod runner;
pub mod stats;

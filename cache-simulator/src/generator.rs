//! Synthetic trace generation.
//!
//! Produces a hot set that receives most of the traffic plus a long tail of
//! keys that are rarely repeated. That mix separates the two policies: a burst
//! of tail keys flushes hot keys out of an LRU cache, while LFU keeps them.

use crate::models::Request;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parameters for a generated trace
#[derive(Debug, Clone)]
pub struct TraceConfig {
    pub requests: u64,
    pub unique_keys: u32,
    /// Share of keys in the hot set
    pub hot_keys_percent: u8,
    /// Share of requests that go to the hot set
    pub hot_traffic_percent: u8,
    /// Object size range in bytes, inclusive
    pub min_size: u64,
    pub max_size: u64,
    /// Unix seconds of the first request
    pub start_timestamp: u64,
    /// Fixed seed for reproducible traces
    pub seed: Option<u64>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            unique_keys: 10_000,
            hot_keys_percent: 20,
            hot_traffic_percent: 80,
            min_size: 1024,
            max_size: 64 * 1024,
            start_timestamp: 0,
            seed: None,
        }
    }
}

impl TraceConfig {
    fn validate(&self) -> Result<(), GenerateError> {
        if self.unique_keys == 0 {
            return Err(GenerateError::InvalidConfig("unique_keys must be positive"));
        }
        if self.hot_keys_percent > 100 || self.hot_traffic_percent > 100 {
            return Err(GenerateError::InvalidConfig("percentages must be at most 100"));
        }
        if self.min_size > self.max_size {
            return Err(GenerateError::InvalidConfig("min_size exceeds max_size"));
        }
        Ok(())
    }

    /// Number of hot keys, at least one when there is hot traffic.
    fn hot_keys(&self) -> u32 {
        let hot = (u64::from(self.unique_keys) * u64::from(self.hot_keys_percent) / 100) as u32;
        if hot == 0 && self.hot_traffic_percent > 0 {
            1
        } else {
            hot
        }
    }
}

pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Writes the trace as CSV to `writer` and returns the number of rows.
    pub fn generate<W: Write>(&self, writer: W) -> Result<u64, GenerateError> {
        self.config.validate()?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let hot_keys = self.config.hot_keys();
        let cold_keys = self.config.unique_keys - hot_keys;
        let hot_probability = f64::from(self.config.hot_traffic_percent) / 100.0;

        let mut out = csv::Writer::from_writer(writer);
        let mut timestamp = self.config.start_timestamp;
        for _ in 0..self.config.requests {
            let use_hot = cold_keys == 0 || (hot_keys > 0 && rng.gen_bool(hot_probability));
            let id = if use_hot {
                rng.gen_range(0..hot_keys)
            } else {
                hot_keys + rng.gen_range(0..cold_keys)
            };
            let size = rng.gen_range(self.config.min_size..=self.config.max_size);
            out.serialize(Request::new(timestamp, format!("key_{id}"), size))?;
            timestamp += rng.gen_range(0..=2);
        }
        out.flush()?;
        Ok(self.config.requests)
    }

    /// Writes the trace to a file at `path`.
    pub fn generate_to_path(&self, path: &Path) -> Result<u64, GenerateError> {
        let file = File::create(path).map_err(|source| GenerateError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            requests = self.config.requests,
            unique_keys = self.config.unique_keys,
            "generating trace"
        );
        self.generate(BufWriter::new(file))
    }
}

// Statistics reporting for cache simulation

use crate::models::{CsvResultRow, SimulationResult};
use std::path::Path;

/// Formats and exports the results of a run.
pub struct SimulationStats<'a> {
    result: &'a SimulationResult,
}

impl<'a> SimulationStats<'a> {
    pub fn from_result(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// One row per simulated cache, ordered by policy then mode.
    pub fn rows(&self) -> Vec<CsvResultRow> {
        self.result
            .stats
            .iter()
            .map(|(key, stats)| CsvResultRow {
                policy: key.policy.to_string(),
                mode: key.mode.to_string(),
                capacity: self.result.capacity,
                hits: stats.hits,
                misses: stats.misses,
                hit_rate: stats.hit_rate(),
                byte_hit_rate: stats.byte_hit_rate(),
                evictions: stats.evictions,
                avg_ns: stats.avg_ns(),
            })
            .collect()
    }

    /// Renders the summary table.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Cache Simulation Summary\n");
        out.push_str("========================\n");
        out.push_str(&format!(
            "Requests: {}  Unique keys: {}  Capacity: {}  Bytes: {:.2} MB\n\n",
            self.result.total_requests,
            self.result.unique_objects,
            self.result.capacity,
            self.result.total_bytes as f64 / (1024.0 * 1024.0)
        ));
        out.push_str(&format!(
            "{:<6} {:<10} {:>10} {:>10} {:>9} {:>10} {:>12} {:>10}\n",
            "Policy", "Mode", "Hits", "Misses", "HitRate", "ByteHit%", "Evictions", "Avg(ns)"
        ));
        out.push_str(&"-".repeat(84));
        out.push('\n');
        for row in self.rows() {
            out.push_str(&format!(
                "{:<6} {:<10} {:>10} {:>10} {:>8.2}% {:>9.2}% {:>12} {:>10.1}\n",
                row.policy,
                row.mode,
                row.hits,
                row.misses,
                row.hit_rate,
                row.byte_hit_rate,
                row.evictions,
                row.avg_ns
            ));
        }
        out
    }

    pub fn print_summary(&self) {
        println!("\n{}", self.summary());
    }

    /// Writes [`rows`](Self::rows) as CSV with a header.
    pub fn export_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

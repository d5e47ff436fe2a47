//! Session statistics for served predictions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

use crate::types::prediction::PredictionResult;

/// Counters for one simulator session.
pub struct PipelineMetrics {
    /// Successful predictions served.
    pub predictions_served: AtomicU64,
    /// Failed prediction requests.
    pub failures: AtomicU64,
    /// Average-score band counts.
    bands: RwLock<HashMap<String, u64>>,
    /// Encode+predict times (in microseconds).
    processing_times: RwLock<Vec<u64>>,
    /// Average-score distribution over [0, 1000) in 100-point buckets.
    score_buckets: RwLock<[u64; 10]>,
    /// Session start, for elapsed reporting.
    start_time: Instant,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            bands: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(64)),
            score_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction.
    pub fn record_prediction(&self, processing_time: Duration, result: &PredictionResult) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        if let Ok(mut bands) = self.bands.write() {
            let band = format!("{:?}", result.average_band).to_lowercase();
            *bands.entry(band).or_insert(0) += 1;
        }

        let bucket = ((result.average / 100.0).max(0.0) as usize).min(9);
        if let Ok(mut buckets) = self.score_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a failed request.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processing time statistics.
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get average-band counts.
    pub fn get_band_counts(&self) -> HashMap<String, u64> {
        self.bands.read().unwrap().clone()
    }

    /// Log the session summary.
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let stats = self.get_processing_stats();
        let bands = self.get_band_counts();
        let elapsed = self.start_time.elapsed().as_secs();

        info!(
            served,
            failures,
            elapsed_s = elapsed,
            mean_us = stats.mean_us,
            p50_us = stats.p50_us,
            max_us = stats.max_us,
            "Session summary"
        );
        for (band, count) in &bands {
            info!(band = %band, count, "Average-score band");
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub max_us: u64,
}

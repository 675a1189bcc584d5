//! Runtime latency feedback: a bounded ring-buffer window per model,
//! with the latency estimate being the mean of the most recent 10
//! samples (or fewer, while the window is still filling).

use std::collections::VecDeque;
use std::sync::Mutex;

use dashmap::DashMap;

/// Samples retained per model before the oldest is evicted
const MAX_SAMPLES: usize = 100;

/// Samples used to compute the current latency estimate
const ESTIMATE_WINDOW: usize = 10;

/// Per-model sliding window of observed latencies
///
/// Each model's samples sit behind their own `Mutex`, so recording a
/// latency for one model never blocks a read of another's estimate.
pub struct LatencyHistory {
    models: DashMap<String, Mutex<VecDeque<f64>>>,
}

impl LatencyHistory {
    #[must_use]
    pub fn new() -> Self {
        Self { models: DashMap::new() }
    }

    /// Record an observed latency, in milliseconds, for a model
    ///
    /// Non-positive or non-finite samples are silently dropped: they
    /// cannot have come from a real request and would otherwise skew
    /// the estimate.
    pub fn record_latency(&self, model_id: &str, latency_ms: f64) {
        if !latency_ms.is_finite() || latency_ms <= 0.0 {
            return;
        }

        let entry = self.models.entry(model_id.to_owned()).or_insert_with(|| Mutex::new(VecDeque::with_capacity(MAX_SAMPLES)));
        let mut samples = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if samples.len() >= MAX_SAMPLES {
            samples.pop_front();
        }
        samples.push_back(latency_ms);
    }

    /// Estimate current latency for a model as the mean of its most
    /// recent (up to 10) samples, or `None` if nothing has been
    /// recorded yet
    #[must_use]
    pub fn estimate(&self, model_id: &str) -> Option<f64> {
        let entry = self.models.get(model_id)?;
        let samples = entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if samples.is_empty() {
            return None;
        }

        let recent: Vec<f64> = samples.iter().rev().take(ESTIMATE_WINDOW).copied().collect();
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    }
}

impl Default for LatencyHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_samples_is_none() {
        let history = LatencyHistory::new();
        assert_eq!(history.estimate("m"), None);
    }

    #[test]
    fn estimate_is_mean_of_recent_samples() {
        let history = LatencyHistory::new();
        for ms in [100.0, 200.0, 300.0] {
            history.record_latency("m", ms);
        }
        assert_eq!(history.estimate("m"), Some(200.0));
    }

    #[test]
    fn estimate_uses_only_last_ten_samples() {
        let history = LatencyHistory::new();
        for ms in 1..=20 {
            history.record_latency("m", f64::from(ms) * 10.0);
        }
        // last 10 samples are 110..=200, mean = 155
        assert_eq!(history.estimate("m"), Some(155.0));
    }

    #[test]
    fn window_is_bounded_to_100_samples() {
        let history = LatencyHistory::new();
        for ms in 1..=150 {
            history.record_latency("m", f64::from(ms));
        }
        let entry = history.models.get("m").unwrap();
        let samples = entry.lock().unwrap();
        assert_eq!(samples.len(), MAX_SAMPLES);
        assert_eq!(*samples.front().unwrap(), 51.0);
    }

    #[test]
    fn non_positive_and_non_finite_samples_are_dropped() {
        let history = LatencyHistory::new();
        history.record_latency("m", 0.0);
        history.record_latency("m", -5.0);
        history.record_latency("m", f64::NAN);
        history.record_latency("m", f64::INFINITY);
        assert_eq!(history.estimate("m"), None);
    }

    #[test]
    fn models_are_tracked_independently() {
        let history = LatencyHistory::new();
        history.record_latency("a", 10.0);
        history.record_latency("b", 1000.0);
        assert_eq!(history.estimate("a"), Some(10.0));
        assert_eq!(history.estimate("b"), Some(1000.0));
    }
}

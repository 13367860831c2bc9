//! Logging and timing metrics for Virtual Cook
//!
//! - Structured logging with tracing, filtered by `RUST_LOG` or the
//!   configured level, written to stderr so command output stays clean
//! - An in-process registry of counters and timing histograms that the CLI
//!   can dump after a run

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global metrics registry
static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging with default settings
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize logging with custom configuration
///
/// `RUST_LOG`, when set, takes precedence over `config.log_level`.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.log_level, e))?;

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_target(config.show_target)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_target(config.show_target)
            .with_writer(std::io::stderr)
            .compact()
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit one JSON object per log line
    pub json: bool,
    /// Include the module path in each line
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for a level and output format
    pub fn new(log_level: impl Into<String>, json: bool) -> Self {
        Self {
            log_level: log_level.into(),
            json,
            ..Self::default()
        }
    }
}

/// Metrics registry for collecting and exporting metrics
pub struct MetricsRegistry {
    counters: RwLock<HashMap<String, AtomicU64>>,
    histograms: RwLock<HashMap<String, Vec<f64>>>,
    started_at: DateTime<Utc>,
    start_time: Instant,
}

impl MetricsRegistry {
    fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            histograms: RwLock::new(HashMap::new()),
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }

    /// Increment a counter
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment a counter by a specific amount
    pub fn increment_by(&self, name: &str, value: u64) {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(counter) = counters.get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
        } else {
            drop(counters);
            let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
            counters
                .entry(name.to_string())
                .or_insert_with(|| AtomicU64::new(0))
                .fetch_add(value, Ordering::Relaxed);
        }
    }

    /// Current value of a counter (0 when never incremented)
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Record a histogram value
    pub fn histogram(&self, name: &str, value: f64) {
        let mut histograms = self.histograms.write().unwrap_or_else(PoisonError::into_inner);
        histograms.entry(name.to_string()).or_default().push(value);
    }

    /// Statistics for one histogram
    pub fn histogram_stats(&self, name: &str) -> Option<HistogramStats> {
        self.histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|values| HistogramStats::from_values(values))
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        let histograms = self.histograms.read().unwrap_or_else(PoisonError::into_inner);

        let counter_values: HashMap<&str, u64> = counters
            .iter()
            .map(|(k, v)| (k.as_str(), v.load(Ordering::Relaxed)))
            .collect();

        let histogram_stats: HashMap<&str, HistogramStats> = histograms
            .iter()
            .map(|(k, v)| (k.as_str(), HistogramStats::from_values(v)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "started_at": self.started_at,
            "uptime_secs": self.uptime_secs(),
            "counters": counter_values,
            "histograms": histogram_stats,
        })
    }
}

/// Histogram statistics, in milliseconds for timers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl HistogramStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                p50: 0.0,
                p95: 0.0,
                p99: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Get the global metrics registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Timer for measuring operation duration
///
/// Records into the global registry once, on `stop` or on drop.
pub struct Timer {
    name: String,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        let duration = self.record();
        tracing::debug!(
            metric = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            metrics().histogram(&self.name, duration.as_secs_f64() * 1000.0);
            self.recorded = true;
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}

/// Span for tracing operations
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name).entered();
    };
    ($name:expr, $($field:tt)*) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name, $($field)*).entered();
    };
}

use ahash::AHashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Calls made through a data backend, labelled by `endpoint`.
pub const BACKEND_REQUESTS: &str = "backend_requests_total";
/// Injected or upstream failures, labelled by `endpoint`.
pub const BACKEND_FAULTS: &str = "backend_faults_total";
/// Wall time of backend calls, including simulated latency.
pub const BACKEND_DURATION: &str = "backend_request_duration_seconds";
/// HTTP requests served by the bridge, labelled by `method`, `route`, `status`.
pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_DURATION: &str = "http_request_duration_seconds";
pub const HTTP_IN_FLIGHT: &str = "http_requests_in_flight";

// Mock endpoints sleep for up to a few seconds, so the buckets reach 10s.
const DURATION_BUCKETS: [f64; 12] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 1.5, 2.5, 5.0, 10.0,
];

// Poisoning only means another thread panicked mid-update; the atomics are
// still consistent, so keep serving.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Cumulative-bucket histogram of observed values.
#[derive(Debug)]
pub struct Histogram {
    bounds: Vec<f64>,
    counts: Vec<AtomicU64>,
    sum_bits: AtomicU64,
    count: AtomicU64,
}

impl Histogram {
    pub fn new(bounds: &[f64]) -> Self {
        Self {
            bounds: bounds.to_vec(),
            counts: bounds.iter().map(|_| AtomicU64::new(0)).collect(),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            count: AtomicU64::new(0),
        }
    }

    pub fn observe(&self, value: f64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        let _ = self
            .sum_bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + value).to_bits())
            });
        // Only the first matching bucket; export accumulates.
        if let Some(i) = self.bounds.iter().position(|b| value <= *b) {
            self.counts[i].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// `(upper bound, cumulative count)` pairs, excluding `+Inf`.
    pub fn cumulative(&self) -> Vec<(f64, u64)> {
        let mut running = 0;
        self.bounds
            .iter()
            .zip(&self.counts)
            .map(|(bound, c)| {
                running += c.load(Ordering::Relaxed);
                (*bound, running)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Label pairs sorted by key, so `[a, b]` and `[b, a]` are one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Labels(Vec<(String, String)>);

impl Labels {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        let mut v: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        v.sort();
        Self(v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `{k="v",...}`, or an empty string for no labels.
    pub fn prometheus_str(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let inner: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        format!("{{{}}}", inner.join(","))
    }
}

// ---------------------------------------------------------------------------
// MetricsCollector
// ---------------------------------------------------------------------------

/// Process metrics: labelled counters, gauges and histograms.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<AHashMap<(String, Labels), AtomicU64>>,
    gauges: RwLock<AHashMap<String, AtomicI64>>,
    histograms: RwLock<AHashMap<String, Histogram>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Counters -----------------------------------------------------------

    pub fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        self.increment_counter_by(name, labels, 1);
    }

    pub fn increment_counter_by(&self, name: &str, labels: &[(&str, &str)], amount: u64) {
        let key = (name.to_string(), Labels::new(labels));
        if let Some(c) = read(&self.counters).get(&key) {
            c.fetch_add(amount, Ordering::Relaxed);
            return;
        }
        write(&self.counters)
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    pub fn get_counter(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        let key = (name.to_string(), Labels::new(labels));
        read(&self.counters)
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    // -- Gauges -------------------------------------------------------------

    pub fn set_gauge(&self, name: &str, value: i64) {
        self.with_gauge(name, |g| g.store(value, Ordering::Relaxed));
    }

    /// Add `delta` (possibly negative) to a gauge.
    pub fn add_gauge(&self, name: &str, delta: i64) {
        self.with_gauge(name, |g| {
            g.fetch_add(delta, Ordering::Relaxed);
        });
    }

    fn with_gauge(&self, name: &str, f: impl FnOnce(&AtomicI64)) {
        if let Some(g) = read(&self.gauges).get(name) {
            f(g);
            return;
        }
        let mut map = write(&self.gauges);
        f(map.entry(name.to_string()).or_insert_with(|| AtomicI64::new(0)));
    }

    pub fn get_gauge(&self, name: &str) -> i64 {
        read(&self.gauges)
            .get(name)
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    // -- Histograms ---------------------------------------------------------

    /// Record a value. Unknown histograms are created with duration buckets.
    pub fn record_histogram(&self, name: &str, value: f64) {
        if let Some(h) = read(&self.histograms).get(name) {
            h.observe(value);
            return;
        }
        write(&self.histograms)
            .entry(name.to_string())
            .or_insert_with(|| Histogram::new(&DURATION_BUCKETS))
            .observe(value);
    }

    pub fn histogram_count(&self, name: &str) -> u64 {
        read(&self.histograms).get(name).map(Histogram::count).unwrap_or(0)
    }

    pub fn histogram_sum(&self, name: &str) -> f64 {
        read(&self.histograms).get(name).map(Histogram::sum).unwrap_or(0.0)
    }

    // -- Backend helpers ----------------------------------------------------

    /// Record one backend call and its outcome.
    pub fn record_backend_call(&self, endpoint: &str, elapsed: Duration, failed: bool) {
        self.increment_counter(BACKEND_REQUESTS, &[("endpoint", endpoint)]);
        if failed {
            self.increment_counter(BACKEND_FAULTS, &[("endpoint", endpoint)]);
        }
        self.record_histogram(BACKEND_DURATION, elapsed.as_secs_f64());
    }

    // -- Export --------------------------------------------------------------

    /// Prometheus text exposition format, series sorted for stable output.
    pub fn export_prometheus(&self) -> String {
        let mut out = String::new();

        {
            let map = read(&self.counters);
            let mut series: Vec<(&String, &Labels, u64)> = map
                .iter()
                .map(|((name, labels), v)| (name, labels, v.load(Ordering::Relaxed)))
                .collect();
            series.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
            let mut last: Option<&String> = None;
            for (name, labels, value) in series {
                if last != Some(name) {
                    out.push_str(&format!("# TYPE {name} counter\n"));
                    last = Some(name);
                }
                out.push_str(&format!("{name}{} {value}\n", labels.prometheus_str()));
            }
        }

        {
            let map = read(&self.gauges);
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                let value = map[name].load(Ordering::Relaxed);
                out.push_str(&format!("# TYPE {name} gauge\n{name} {value}\n"));
            }
        }

        {
            let map = read(&self.histograms);
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                let h = &map[name];
                out.push_str(&format!("# TYPE {name} histogram\n"));
                for (bound, count) in h.cumulative() {
                    out.push_str(&format!("{name}_bucket{{le=\"{bound}\"}} {count}\n"));
                }
                out.push_str(&format!("{name}_bucket{{le=\"+Inf\"}} {}\n", h.count()));
                out.push_str(&format!("{name}_sum {}\n", h.sum()));
                out.push_str(&format!("{name}_count {}\n", h.count()));
            }
        }

        out
    }

    pub fn export_json(&self) -> serde_json::Value {
        let counters: serde_json::Map<String, serde_json::Value> = read(&self.counters)
            .iter()
            .map(|((name, labels), v)| {
                (
                    format!("{name}{}", labels.prometheus_str()),
                    v.load(Ordering::Relaxed).into(),
                )
            })
            .collect();

        let gauges: serde_json::Map<String, serde_json::Value> = read(&self.gauges)
            .iter()
            .map(|(name, g)| (name.clone(), g.load(Ordering::Relaxed).into()))
            .collect();

        let histograms: serde_json::Map<String, serde_json::Value> = read(&self.histograms)
            .iter()
            .map(|(name, h)| {
                let buckets: Vec<serde_json::Value> = h
                    .cumulative()
                    .into_iter()
                    .map(|(le, count)| serde_json::json!({ "le": le, "count": count }))
                    .collect();
                (
                    name.clone(),
                    serde_json::json!({ "buckets": buckets, "sum": h.sum(), "count": h.count() }),
                )
            })
            .collect();

        serde_json::json!({
            "counters": counters,
            "gauges": gauges,
            "histograms": histograms,
        })
    }
}

// ---------------------------------------------------------------------------
// Global singleton
// ---------------------------------------------------------------------------

/// The process-wide collector shared by backends and middleware.
pub fn global_metrics() -> &'static MetricsCollector {
    static INSTANCE: OnceLock<MetricsCollector> = OnceLock::new();
    INSTANCE.get_or_init(MetricsCollector::new)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

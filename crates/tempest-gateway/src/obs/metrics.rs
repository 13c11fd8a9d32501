//! Minimal metrics registry for the gateway.
//!
//! Counters with dynamic labels live in a `DashMap` keyed by sorted label
//! pairs so output ordering within a series is deterministic. The fetch
//! latency histogram uses fixed millisecond buckets.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn render_labels(key: &LabelKey) -> String {
    if key.is_empty() {
        return String::new();
    }
    let inner = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let _ = writeln!(out, "{}{} {}", name, render_labels(r.key()), r.value().load(Ordering::Relaxed));
        }
    }
}

/// Point-in-time value, overwritten on each update.
#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn set(&self, v: usize) {
        self.value.store(i64::try_from(v).unwrap_or(i64::MAX), Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} gauge\n{name} {}", self.get());
    }
}

// 50ms .. 10s, the last bucket matching the default fetch timeout.
const BUCKETS_MILLIS: [u64; 8] = [50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000];

#[derive(Default)]
pub struct Histogram {
    count: AtomicU64,
    sum_millis: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MILLIS.len()],
}

impl Histogram {
    pub fn observe(&self, elapsed: Duration) {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_millis.fetch_add(millis, Ordering::Relaxed);
        for (bucket, &le) in self.buckets.iter().zip(BUCKETS_MILLIS.iter()) {
            if millis <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for (bucket, le) in self.buckets.iter().zip(BUCKETS_MILLIS.iter()) {
            let _ = writeln!(out, "{name}_bucket{{le=\"{le}\"}} {}", bucket.load(Ordering::Relaxed));
        }
        let count = self.count();
        let _ = writeln!(out, "{name}_bucket{{le=\"+Inf\"}} {count}");
        let _ = writeln!(out, "{name}_sum {}", self.sum_millis.load(Ordering::Relaxed));
        let _ = writeln!(out, "{name}_count {count}");
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    /// Poll cycles by `outcome` (stored / skipped / failed).
    pub poll_cycles: CounterVec,
    /// Failed fetches by client `code`.
    pub fetch_errors: CounterVec,
    pub fetch_duration: Histogram,
    pub history_len: Gauge,
    pub map_sessions: Gauge,
    pub sessions_minted: CounterVec,
    draining: AtomicBool,
}

impl GatewayMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render every series in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.poll_cycles.render("tempest_poll_cycles_total", &mut out);
        self.fetch_errors.render("tempest_fetch_errors_total", &mut out);
        self.fetch_duration.render("tempest_fetch_duration_millis", &mut out);
        self.history_len.render("tempest_history_records", &mut out);
        self.map_sessions.render("tempest_map_sessions_active", &mut out);
        self.sessions_minted.render("tempest_map_sessions_minted_total", &mut out);
        let _ = writeln!(
            out,
            "# TYPE tempest_draining gauge\ntempest_draining {}",
            u8::from(self.is_draining())
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labelled_counters_and_histogram() {
        let m = GatewayMetrics::default();
        m.poll_cycles.inc(&[("outcome", "stored")]);
        m.poll_cycles.inc(&[("outcome", "stored")]);
        m.fetch_duration.observe(Duration::from_millis(120));
        m.history_len.set(2);

        let out = m.render();
        assert!(out.contains("tempest_poll_cycles_total{outcome=\"stored\"} 2"));
        assert!(out.contains("tempest_fetch_duration_millis_bucket{le=\"100\"} 0"));
        assert!(out.contains("tempest_fetch_duration_millis_bucket{le=\"250\"} 1"));
        assert!(out.contains("tempest_history_records 2"));
        assert!(out.contains("tempest_draining 0"));
    }
}

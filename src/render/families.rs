use std::fmt;

use crate::extract::NormalizedMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

/// A sample value, printed without unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Float(f64),
    Integer(u64),
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Shortest round-trip form: 500000, 12.5, 0.1, 0.
            SampleValue::Float(value) => write!(f, "{}", value),
            SampleValue::Integer(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricFamily {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    value: fn(&NormalizedMetric) -> SampleValue,
}

impl MetricFamily {
    #[must_use]
    pub fn sample(&self, metric: &NormalizedMetric) -> SampleValue {
        (self.value)(metric)
    }
}

/// Every family the exporter writes, in output order.
pub const FAMILIES: [MetricFamily; 7] = [
    MetricFamily {
        name: "speedtest_download_bandwidth_bps",
        help: "Download bandwidth as reported by speedtest (bytes per second)",
        kind: MetricKind::Gauge,
        value: download_bandwidth,
    },
    MetricFamily {
        name: "speedtest_upload_bandwidth_bps",
        help: "Upload bandwidth as reported by speedtest (bytes per second)",
        kind: MetricKind::Gauge,
        value: upload_bandwidth,
    },
    MetricFamily {
        name: "speedtest_ping_latency_ms",
        help: "Ping latency in milliseconds",
        kind: MetricKind::Gauge,
        value: ping_latency,
    },
    MetricFamily {
        name: "speedtest_ping_jitter_ms",
        help: "Ping jitter in milliseconds",
        kind: MetricKind::Gauge,
        value: ping_jitter,
    },
    MetricFamily {
        name: "speedtest_packet_loss_percent",
        help: "Packet loss percentage",
        kind: MetricKind::Gauge,
        value: packet_loss,
    },
    MetricFamily {
        name: "speedtest_download_bytes_total",
        help: "Total bytes downloaded",
        kind: MetricKind::Counter,
        value: download_bytes,
    },
    MetricFamily {
        name: "speedtest_upload_bytes_total",
        help: "Total bytes uploaded",
        kind: MetricKind::Counter,
        value: upload_bytes,
    },
];

const fn download_bandwidth(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Float(metric.download_bandwidth)
}

const fn upload_bandwidth(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Float(metric.upload_bandwidth)
}

const fn ping_latency(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Float(metric.ping_latency)
}

const fn ping_jitter(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Float(metric.ping_jitter)
}

const fn packet_loss(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Float(metric.packet_loss)
}

const fn download_bytes(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Integer(metric.download_bytes)
}

const fn upload_bytes(metric: &NormalizedMetric) -> SampleValue {
    SampleValue::Integer(metric.upload_bytes)
}

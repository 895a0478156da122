//! Raw speedtest JSON to [`NormalizedMetric`].
//!
//! Extraction is permissive: a missing group or field, or a field of the wrong
//! JSON type, resolves to its default instead of failing, so partial probe
//! output still yields a (zero-filled) metric. Only a document that is not a
//! JSON object at all is rejected.
mod fields;


use std::path::Path;

use chrono::{DateTime, Local, SecondsFormat};
use serde_json::Value;

use crate::error::ExtractError;

use fields::{Fields, UNKNOWN};

/// One measurement after default-filling. Every field always has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMetric {
    /// Bytes per second, as reported by the probe.
    pub download_bandwidth: f64,
    pub download_bytes: u64,
    /// Bytes per second, as reported by the probe.
    pub upload_bandwidth: f64,
    pub upload_bytes: u64,
    /// Milliseconds.
    pub ping_latency: f64,
    /// Milliseconds.
    pub ping_jitter: f64,
    /// Percent.
    pub packet_loss: f64,
    pub isp: String,
    pub interface: String,
    pub server_name: String,
    pub server_location: String,
    /// Source timestamp verbatim, or the extraction time when absent.
    pub timestamp: String,
}

impl Default for NormalizedMetric {
    fn default() -> Self {
        Self {
            download_bandwidth: 0.0,
            download_bytes: 0,
            upload_bandwidth: 0.0,
            upload_bytes: 0,
            ping_latency: 0.0,
            ping_jitter: 0.0,
            packet_loss: 0.0,
            isp: UNKNOWN.to_owned(),
            interface: UNKNOWN.to_owned(),
            server_name: UNKNOWN.to_owned(),
            server_location: UNKNOWN.to_owned(),
            timestamp: String::new(),
        }
    }
}

/// Extracts a measurement from raw bytes; `now` fills a missing timestamp.
///
/// # Errors
///
/// Returns [`ExtractError::Malformed`] for invalid JSON and
/// [`ExtractError::UnexpectedRoot`] when the document is not an object.
pub fn parse_measurement(
    path: &Path,
    bytes: &[u8],
    now: DateTime<Local>,
) -> Result<NormalizedMetric, ExtractError> {
    tracing::info!("Parsing JSON file: {}", path.display());
    let document: Value =
        serde_json::from_slice(bytes).map_err(|err| ExtractError::Malformed {
            path: path.to_path_buf(),
            source: err,
        })?;
    let root = document
        .as_object()
        .ok_or_else(|| ExtractError::UnexpectedRoot {
            path: path.to_path_buf(),
            kind: json_kind(&document),
        })?;

    let fields = Fields::new(path, root);
    let metric = NormalizedMetric {
        download_bandwidth: fields.gauge(&["download", "bandwidth"]),
        download_bytes: fields.counter(&["download", "bytes"]),
        upload_bandwidth: fields.gauge(&["upload", "bandwidth"]),
        upload_bytes: fields.counter(&["upload", "bytes"]),
        ping_latency: fields.gauge(&["ping", "latency"]),
        ping_jitter: fields.gauge(&["ping", "jitter"]),
        packet_loss: fields.gauge(&["packetLoss"]),
        isp: fields.text(&["isp"]),
        interface: fields.text(&["interface", "name"]),
        server_name: fields.text(&["server", "name"]),
        server_location: fields.text(&["server", "location"]),
        timestamp: fields
            .optional_text(&["timestamp"])
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Secs, false)),
    };

    tracing::info!(
        "Extracted metrics: download={}, upload={}",
        metric.download_bandwidth,
        metric.upload_bandwidth
    );
    Ok(metric)
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

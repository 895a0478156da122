use std::borrow::Cow;
use std::fmt::Write as _;

use crate::error::RenderError;
use crate::extract::NormalizedMetric;

pub(super) fn write_line(output: &mut String, line: &str) -> Result<(), RenderError> {
    writeln!(output, "{}", line).map_err(|err| RenderError::WriteLine { source: err })
}

/// Escapes a label value for the text exposition format: backslash, double
/// quote and line feed.
#[must_use]
pub fn escape_label_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len().saturating_add(8));
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// `{isp="..",interface="..",server=".."}`, shared by every sample line.
pub(super) fn label_set(metric: &NormalizedMetric) -> String {
    format!(
        "{{isp=\"{}\",interface=\"{}\",server=\"{}\"}}",
        escape_label_value(&metric.isp),
        escape_label_value(&metric.interface),
        escape_label_value(&metric.server_name)
    )
}

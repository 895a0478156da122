//! [`NormalizedMetric`] to Prometheus text exposition.
mod families;
mod format;


use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, RenderError};
use crate::extract::NormalizedMetric;
use crate::store::ArtifactStore;

pub use families::{FAMILIES, MetricFamily, MetricKind, SampleValue};
pub use format::escape_label_value;

use format::{label_set, write_line};

/// Rendered lines for one metric record: `# HELP`, `# TYPE` and one sample
/// per family, in the fixed family order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExposition {
    lines: Vec<String>,
}

impl RenderedExposition {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The exposition text, one line per entry, newline terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be appended to the output buffer.
    pub fn to_text(&self) -> Result<String, RenderError> {
        let mut output = String::new();
        for line in &self.lines {
            write_line(&mut output, line)?;
        }
        Ok(output)
    }
}

/// Renders the seven speedtest families for `metric`.
#[must_use]
pub fn render(metric: &NormalizedMetric) -> RenderedExposition {
    let labels = label_set(metric);
    let mut lines = Vec::with_capacity(FAMILIES.len().saturating_mul(3));
    for family in &FAMILIES {
        lines.push(format!("# HELP {} {}", family.name, family.help));
        lines.push(format!("# TYPE {} {}", family.name, family.kind.as_str()));
        lines.push(format!(
            "{}{} {}",
            family.name,
            labels,
            family.sample(metric)
        ));
    }
    RenderedExposition { lines }
}

/// Writes `exposition` as the output artifact belonging to `raw_path`.
///
/// # Errors
///
/// Returns an error if the text cannot be assembled or the output file cannot
/// be written.
pub async fn write_exposition(
    store: &dyn ArtifactStore,
    raw_path: &Path,
    exposition: &RenderedExposition,
) -> AppResult<PathBuf> {
    tracing::info!("Converting metrics to Prometheus format");
    tracing::debug!(
        "Rendering {} exposition lines for {}",
        exposition.lines().len(),
        raw_path.display()
    );
    let text = exposition.to_text().map_err(AppError::render)?;
    let path = store
        .write_output(raw_path, &text)
        .await
        .map_err(AppError::store)?;
    tracing::info!("Prometheus metrics written to: {}", path.display());
    Ok(path)
}

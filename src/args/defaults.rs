/// Interface probed when nothing is configured.
pub(crate) const DEFAULT_INTERFACES: &str = "en0";
/// Directory holding the raw speedtest JSON artifacts.
pub(crate) const DEFAULT_RAW_DIR: &str = "speedtestraw";
/// Directory holding the rendered `.prom` files.
pub(crate) const DEFAULT_METRICS_DIR: &str = "speedtestmetrics";
pub(crate) const DEFAULT_SPEEDTEST_BIN: &str = "speedtest";
pub(crate) const DEFAULT_PROBE_TIMEOUT: &str = "5m";

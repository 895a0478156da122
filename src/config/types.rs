use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::InterfaceList;
use crate::args::parsers::parse_duration;
use crate::error::ValidationError;

/// On-disk configuration. Every key is optional and mirrors a long CLI option.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub interfaces: Option<InterfaceList>,
    pub raw_dir: Option<PathBuf>,
    pub metrics_dir: Option<PathBuf>,
    pub speedtest_bin: Option<String>,
    pub accept_gdpr: Option<bool>,
    pub probe_timeout: Option<DurationValue>,
    pub every: Option<DurationValue>,
    pub fail_on_error: Option<bool>,
    pub log_dir: Option<PathBuf>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ValidationError;

/// Ordered list of network interface names to probe.
///
/// Parsed from a comma separated string; entries are trimmed and empty
/// entries are dropped, so `"eth0, ,wlan0"` yields `["eth0", "wlan0"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceList(Vec<String>);

impl InterfaceList {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_entries<'entry, I>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'entry str>,
    {
        let mut names = Vec::new();
        for entry in entries {
            let name = entry.trim();
            if name.is_empty() {
                continue;
            }
            if name.chars().any(char::is_whitespace) {
                return Err(ValidationError::InterfaceWhitespace {
                    value: name.to_owned(),
                });
            }
            names.push(name.to_owned());
        }
        Ok(Self(names))
    }
}

impl FromStr for InterfaceList {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_entries(value.split(','))
    }
}

impl fmt::Display for InterfaceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// Config files may list interfaces either as `"eth0,wlan0"` or as an array.
impl<'de> Deserialize<'de> for InterfaceList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawList {
            Joined(String),
            Entries(Vec<String>),
        }

        let parsed = match RawList::deserialize(deserializer)? {
            RawList::Joined(value) => value.parse::<Self>(),
            RawList::Entries(entries) => Self::from_entries(entries.iter().map(String::as_str)),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

//! Host capability gate.
//!
//! Hosts declare the features they support as name/version pairs; elements
//! declare `requires` constraints. A node renders only when every declared
//! requirement is met. Absent features fail closed.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A `major.minor` feature version with a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses `"M.N"`; anything else is not a version.
    pub fn parse(text: &str) -> Option<Self> {
        let (major, minor) = text.split_once('.')?;
        Some(Self {
            major: major.trim().parse().ok()?,
            minor: minor.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Either a concrete version or the `"*"` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityVersion {
    Any,
    At(Version),
}

impl CapabilityVersion {
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim() == "*" {
            return Some(CapabilityVersion::Any);
        }
        Version::parse(text).map(CapabilityVersion::At)
    }
}

/// The feature table a rendering host declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    capabilities: BTreeMap<String, CapabilityVersion>,
}

impl HostCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, feature: impl Into<String>, version: CapabilityVersion) {
        self.capabilities.insert(feature.into(), version);
    }

    pub fn with(mut self, feature: impl Into<String>, version: CapabilityVersion) -> Self {
        self.declare(feature, version);
        self
    }

    /// Builds a table from a JSON object of `feature: "M.N" | "*"` entries.
    /// Entries that do not parse are dropped.
    pub fn parse(value: &Value) -> Self {
        let mut table = Self::new();
        if let Some(entries) = value.as_object() {
            for (feature, version) in entries {
                if let Some(version) = version.as_str().and_then(CapabilityVersion::parse) {
                    table.declare(feature.clone(), version);
                }
            }
        }
        table
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Whether this host meets a single requirement.
    pub fn has(&self, feature: &str, required: CapabilityVersion) -> bool {
        let Some(declared) = self.capabilities.get(feature) else {
            return false;
        };
        match (required, declared) {
            (CapabilityVersion::Any, _) | (_, CapabilityVersion::Any) => true,
            (CapabilityVersion::At(required), CapabilityVersion::At(declared)) => {
                required <= *declared
            }
        }
    }

    /// Whether every `requires` entry is met. Unparseable minimum versions
    /// count as unmet.
    pub fn satisfies(&self, requires: &BTreeMap<String, String>) -> bool {
        requires.iter().all(|(feature, minimum)| {
            CapabilityVersion::parse(minimum)
                .map(|required| self.has(feature, required))
                .unwrap_or(false)
        })
    }
}

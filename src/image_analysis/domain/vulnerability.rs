use super::feature::{FeatureVersion, Namespace};
use super::severity::Severity;
use super::version::Version;
use std::collections::BTreeMap;

/// Opaque key/value metadata attached to a vulnerability by its feed.
pub type VulnerabilityMetadata = BTreeMap<String, serde_json::Value>;

/// A known security issue, identified by name and namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Vulnerability {
    pub name: String,
    pub namespace: Namespace,
    pub description: String,
    pub link: String,
    pub severity: Severity,
    pub metadata: Option<VulnerabilityMetadata>,
    /// Version that fixes the issue; `Unbounded` when no fix exists
    pub fixed_by: Version,
    /// Feature versions carrying the fix, populated by top-level queries only
    pub fixed_in: Vec<FeatureVersion>,
}

impl Vulnerability {
    pub fn new(name: impl Into<String>, namespace: Namespace, severity: Severity) -> Self {
        Self {
            name: name.into(),
            namespace,
            description: String::new(),
            link: String::new(),
            severity,
            metadata: None,
            fixed_by: Version::Unbounded,
            fixed_in: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_fixed_by(mut self, fixed_by: Version) -> Self {
        self.fixed_by = fixed_by;
        self
    }

    pub fn with_metadata(mut self, metadata: VulnerabilityMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_fixed_in(mut self, fixed_in: Vec<FeatureVersion>) -> Self {
        self.fixed_in = fixed_in;
        self
    }
}

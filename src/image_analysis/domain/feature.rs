use super::version::Version;
use super::vulnerability::Vulnerability;

/// OS or package-ecosystem context of a feature.
///
/// `version_format` names the comparison domain (e.g. "dpkg", "rpm") that
/// orders versions of every feature in this namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub name: String,
    pub version_format: String,
}

impl Namespace {
    pub fn new(name: impl Into<String>, version_format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_format: version_format.into(),
        }
    }
}

/// A detected software component, identified by name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    pub name: String,
    pub namespace: Namespace,
}

impl Feature {
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }
}

/// A feature bound to the concrete version found in a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVersion {
    pub feature: Feature,
    pub version: Version,
    /// Name of the layer that first introduced this feature version
    pub added_by: String,
    /// Vulnerabilities affecting this version, filled only on request
    pub affected_by: Vec<Vulnerability>,
}

impl FeatureVersion {
    pub fn new(feature: Feature, version: Version, added_by: impl Into<String>) -> Self {
        Self {
            feature,
            version,
            added_by: added_by.into(),
            affected_by: Vec::new(),
        }
    }

    /// True when both refer to the same feature at the same version,
    /// regardless of which layer introduced them.
    pub fn is_same_install(&self, other: &FeatureVersion) -> bool {
        self.feature == other.feature && self.version == other.version
    }
}

//! Client views of vulnerabilities and features
//!
//! The two views are mutually recursive: a feature lists the
//! vulnerabilities affecting it and a top-level vulnerability lists the
//! features fixing it. `ReadModelBuilder` cuts the recursion at one level.

use serde::Serialize;

/// View representation of a vulnerability
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VulnerabilityView {
    pub name: String,
    pub namespace_name: String,
    pub description: String,
    pub link: String,
    pub severity: String,
    /// JSON encoding of the feed metadata, empty when there is none
    pub metadata: String,
    /// Fixing version, empty when no fix is known
    pub fixed_by: String,
    /// Features carrying the fix; only set for top-level vulnerabilities
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed_in_features: Vec<FeatureView>,
}

/// View representation of a feature found in a layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureView {
    pub name: String,
    pub namespace_name: String,
    pub version_format: String,
    /// Installed version, `"None"` when unbounded
    pub version: String,
    pub added_by: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<VulnerabilityView>,
}

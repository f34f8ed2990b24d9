use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Legacy storage encoding of the unbounded version.
///
/// Datastores and feeds exchange versions as plain strings; this value is
/// the one they use for "no known fix". It never reaches a client.
pub const MAX_VERSION_SENTINEL: &str = "#MAXV#";

/// Rendering of an unbounded feature version in client output.
pub const UNBOUNDED_FEATURE_VERSION: &str = "None";

/// Version of a feature or of the fix for a vulnerability.
///
/// `Unbounded` sorts after every concrete version in the comparison domain
/// of the feature's namespace and stands for "not fixed / not yet fixed".
/// Ordering between two `Bounded` values belongs to the feature matcher and
/// is deliberately not implemented here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Bounded(String),
    Unbounded,
}

impl Version {
    pub fn bounded(version: impl Into<String>) -> Self {
        Version::Bounded(version.into())
    }

    /// Parses the legacy string encoding, mapping the sentinel to `Unbounded`.
    pub fn from_legacy(raw: &str) -> Self {
        if raw == MAX_VERSION_SENTINEL {
            Version::Unbounded
        } else {
            Version::Bounded(raw.to_string())
        }
    }

    /// Inverse of [`Version::from_legacy`].
    pub fn as_legacy_str(&self) -> &str {
        match self {
            Version::Bounded(v) => v,
            Version::Unbounded => MAX_VERSION_SENTINEL,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Version::Unbounded)
    }

    /// Client rendering of a vulnerability's fix version.
    ///
    /// An unbounded fix means there is no fix, so the field is left empty.
    pub fn render_fixed_by(&self) -> String {
        match self {
            Version::Bounded(v) => v.clone(),
            Version::Unbounded => String::new(),
        }
    }

    /// Client rendering of an installed feature version.
    pub fn render_feature_version(&self) -> String {
        match self {
            Version::Bounded(v) => v.clone(),
            Version::Unbounded => UNBOUNDED_FEATURE_VERSION.to_string(),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_legacy_str())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_legacy_str())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Version::from_legacy(&raw))
    }
}

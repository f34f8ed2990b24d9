pub mod feature;
pub mod layer;
pub mod notification;
pub mod severity;
pub mod version;
pub mod vulnerability;

pub use feature::{Feature, FeatureVersion, Namespace};
pub use layer::Layer;
pub use notification::{
    LayersIntroducingVulnerability, OrderedLayerName, PageCursor, VulnerabilityNotification,
};
pub use severity::Severity;
pub use version::{Version, MAX_VERSION_SENTINEL, UNBOUNDED_FEATURE_VERSION};
pub use vulnerability::{Vulnerability, VulnerabilityMetadata};

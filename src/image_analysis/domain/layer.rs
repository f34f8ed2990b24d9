use super::feature::{FeatureVersion, Namespace};

/// One filesystem delta of an image.
///
/// The parent is held by name only; the datastore is authoritative for the
/// chain and it is walked one hop at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub parent: Option<String>,
    /// Detector generation that produced this layer's content
    pub engine_version: i32,
    pub namespaces: Vec<Namespace>,
    pub features: Vec<FeatureVersion>,
}

impl Layer {
    pub fn new(name: impl Into<String>, parent: Option<String>, engine_version: i32) -> Self {
        Self {
            name: name.into(),
            parent,
            engine_version,
            namespaces: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Copy without the feature list; identity, parent link and namespaces stay.
    pub fn without_features(&self) -> Self {
        Self {
            name: self.name.clone(),
            parent: self.parent.clone(),
            engine_version: self.engine_version,
            namespaces: self.namespaces.clone(),
            features: Vec::new(),
        }
    }
}

use crate::application::read_models::{AncestryView, FeatureView};
use serde::Serialize;
use std::collections::HashMap;

/// Location of one layer's content
#[derive(Debug, Clone, Default)]
pub struct LayerSource {
    /// Path or URL of the layer content
    pub path: String,
    /// Headers required to fetch the content (e.g. authorization)
    pub headers: HashMap<String, String>,
}

impl LayerSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// PostAncestryRequest - Request DTO for ingesting an ancestry
#[derive(Debug, Clone, Default)]
pub struct PostAncestryRequest {
    pub ancestry_name: String,
    /// Image format of every layer (e.g. "Docker")
    pub format: String,
    /// Layers root first; `None` marks an entry the transport left empty
    pub layers: Vec<Option<LayerSource>>,
}

impl PostAncestryRequest {
    pub fn new(
        ancestry_name: impl Into<String>,
        format: impl Into<String>,
        layers: Vec<LayerSource>,
    ) -> Self {
        Self {
            ancestry_name: ancestry_name.into(),
            format: format.into(),
            layers: layers.into_iter().map(Some).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostAncestryResponse {
    pub engine_version: i32,
}

/// GetAncestryRequest - Request DTO for reading an ancestry
#[derive(Debug, Clone, Default)]
pub struct GetAncestryRequest {
    pub ancestry_name: String,
    pub with_features: bool,
    pub with_vulnerabilities: bool,
}

impl GetAncestryRequest {
    pub fn new(
        ancestry_name: impl Into<String>,
        with_features: bool,
        with_vulnerabilities: bool,
    ) -> Self {
        Self {
            ancestry_name: ancestry_name.into(),
            with_features,
            with_vulnerabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetAncestryResponse {
    pub ancestry: AncestryView,
    /// Features of the terminal layer, empty unless requested
    pub features: Vec<FeatureView>,
}

use serde::Serialize;

/// View representation of one layer of an ancestry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerView {
    pub name: String,
    pub namespace_names: Vec<String>,
}

/// View representation of an ancestry, layers ordered root first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestryView {
    /// Name of the terminal layer, which is also the ancestry name
    pub name: String,
    pub engine_version: i32,
    pub layers: Vec<LayerView>,
}

impl AncestryView {
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name.as_str()).collect()
    }
}

/// Filesystem adapters reading layer content
mod manifest_layer_processor;

pub use manifest_layer_processor::{ManifestLayerProcessor, ENGINE_VERSION};

use async_trait::async_trait;
use image_vuln_intel::ports::outbound::LayerRequest;
use image_vuln_intel::prelude::{Datastore, Layer, LayerProcessingError, LayerProcessor};
use std::sync::Mutex;

/// Mock LayerProcessor for testing
///
/// Persists every layer without content and fails on the layer named by
/// `with_failure_at`.
pub struct MockLayerProcessor {
    pub engine_version: i32,
    pub failure: Option<(String, LayerProcessingError)>,
    pub processed: Mutex<Vec<String>>,
}

impl MockLayerProcessor {
    pub fn new() -> Self {
        Self {
            engine_version: 3,
            failure: None,
            processed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failure_at(layer: &str, error: LayerProcessingError) -> Self {
        Self {
            failure: Some((layer.to_string(), error)),
            ..Self::new()
        }
    }

    pub fn processed(&self) -> Vec<String> {
        self.processed.lock().unwrap().clone()
    }
}

impl Default for MockLayerProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LayerProcessor for MockLayerProcessor {
    fn engine_version(&self) -> i32 {
        self.engine_version
    }

    async fn process_layer(
        &self,
        store: &dyn Datastore,
        request: LayerRequest<'_>,
    ) -> Result<(), LayerProcessingError> {
        self.processed.lock().unwrap().push(request.name.to_string());

        if let Some((layer, error)) = &self.failure {
            if layer == request.name {
                return Err(error.clone());
            }
        }

        store
            .insert_layer(Layer::new(
                request.name,
                request.parent.map(str::to_string),
                self.engine_version,
            ))
            .await?;
        Ok(())
    }
}

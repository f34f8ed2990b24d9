//! Sequential ingestion of an ancestry's layers with whole-chain rollback

use super::AncestryUseCase;
use crate::application::dto::PostAncestryRequest;
use crate::image_analysis::services::{AncestryLayerNaming, RollbackPolicy};
use crate::ports::outbound::{Datastore, LayerProcessingError, LayerProcessor, LayerRequest};
use crate::shared::error::ServiceError;

/// State carried from one layer to the next.
#[derive(Debug, Default)]
struct IngestionProgress {
    /// First layer of the ancestry, set once
    root: Option<String>,
    /// Last layer persisted, parent of the next one
    parent: Option<String>,
}

impl IngestionProgress {
    /// Root name as seen while processing `current`.
    fn root_for(&self, current: &str) -> String {
        self.root.clone().unwrap_or_else(|| current.to_string())
    }

    /// Records `persisted` as the parent of the next layer.
    fn advance(self, persisted: String) -> Self {
        Self {
            root: self.root.or_else(|| Some(persisted.clone())),
            parent: Some(persisted),
        }
    }
}

/// Why the ingestion of a layer stopped.
#[derive(Debug)]
enum IngestionFailure {
    MissingLayer,
    Processing(LayerProcessingError),
}

impl IngestionFailure {
    fn classify(&self) -> ServiceError {
        match self {
            IngestionFailure::MissingLayer => {
                ServiceError::invalid_argument("Failed to provide layer")
            }
            IngestionFailure::Processing(error) => RollbackPolicy::classify(error),
        }
    }
}

impl<D, P> AncestryUseCase<D, P>
where
    D: Datastore + 'static,
    P: LayerProcessor,
{
    /// Processes every layer in order, each one parented to the previous.
    ///
    /// Layer `i + 1` is not started before layer `i` is persisted: it takes
    /// that layer as parent.
    pub(super) async fn ingest(&self, request: &PostAncestryRequest) -> Result<i32, ServiceError> {
        let naming = AncestryLayerNaming::new(&request.ancestry_name, request.layers.len());
        let mut progress = IngestionProgress::default();

        for (index, layer) in request.layers.iter().enumerate() {
            let current = naming.layer_name(index);
            let root = progress.root_for(&current);

            let Some(source) = layer else {
                return Err(self
                    .roll_back(IngestionFailure::MissingLayer, &current, &root)
                    .await);
            };

            let layer_request = LayerRequest {
                format: &request.format,
                name: &current,
                parent: progress.parent.as_deref(),
                path: &source.path,
                headers: &source.headers,
            };

            if let Err(error) = self
                .layer_processor
                .process_layer(self.datastore.as_ref(), layer_request)
                .await
            {
                return Err(self
                    .roll_back(IngestionFailure::Processing(error), &current, &root)
                    .await);
            }

            progress = progress.advance(current);
        }

        tracing::info!(
            ancestry = %request.ancestry_name,
            layers = request.layers.len(),
            "ancestry ingested"
        );

        Ok(self.layer_processor.engine_version())
    }

    /// Deletes the partially ingested ancestry and classifies the failure.
    ///
    /// Deleting the root removes every layer chained to it. A failed deletion
    /// is reported instead of the original error.
    async fn roll_back(
        &self,
        failure: IngestionFailure,
        current_layer: &str,
        root_layer: &str,
    ) -> ServiceError {
        if RollbackPolicy::requires_deletion(current_layer, root_layer) {
            if let Err(error) = self.datastore.delete_layer(root_layer).await {
                tracing::error!(
                    layer = current_layer,
                    root = root_layer,
                    %error,
                    "failed to roll back the ancestry"
                );
                return ServiceError::internal(error.to_string());
            }

            tracing::warn!(
                layer = current_layer,
                root = root_layer,
                "Can't process {}: roll back the ancestry",
                current_layer
            );
        }

        failure.classify()
    }
}

#[cfg(test)]
mod progress_tests {
    use super::*;

    #[test]
    fn test_progress_root_is_set_once() {
        let progress = IngestionProgress::default();
        assert_eq!(progress.root_for("a-0"), "a-0");

        let progress = progress.advance("a-0".to_string());
        let progress = progress.advance("a-1".to_string());
        assert_eq!(progress.root.as_deref(), Some("a-0"));
        assert_eq!(progress.parent.as_deref(), Some("a-1"));
        assert_eq!(progress.root_for("a"), "a-0");
    }

    #[test]
    fn test_missing_layer_is_invalid_argument() {
        let error = IngestionFailure::MissingLayer.classify();
        assert_eq!(
            error,
            ServiceError::invalid_argument("Failed to provide layer")
        );
    }
}

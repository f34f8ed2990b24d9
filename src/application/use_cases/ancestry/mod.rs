use crate::application::dto::{
    GetAncestryRequest, GetAncestryResponse, PostAncestryRequest, PostAncestryResponse,
};
use crate::ports::inbound::AncestryPort;
use crate::ports::outbound::{Datastore, LayerProcessor};
use crate::shared::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

mod ingest;
mod reconstruct;


/// AncestryUseCase - Ingestion and reconstruction of image ancestries
///
/// Ingestion turns an ordered list of layers into a chain of persisted
/// layers, rolling the whole chain back on failure. Reconstruction walks
/// that chain back from its terminal layer.
///
/// # Type Parameters
/// * `D` - Datastore implementation
/// * `P` - LayerProcessor implementation
pub struct AncestryUseCase<D, P> {
    datastore: Arc<D>,
    layer_processor: P,
}

impl<D, P> AncestryUseCase<D, P>
where
    D: Datastore,
    P: LayerProcessor,
{
    /// Creates a new AncestryUseCase with injected dependencies
    pub fn new(datastore: Arc<D>, layer_processor: P) -> Self {
        Self {
            datastore,
            layer_processor,
        }
    }
}

#[async_trait]
impl<D, P> AncestryPort for AncestryUseCase<D, P>
where
    D: Datastore + 'static,
    P: LayerProcessor,
{
    async fn post_ancestry(
        &self,
        request: PostAncestryRequest,
    ) -> Result<PostAncestryResponse, ServiceError> {
        if request.ancestry_name.is_empty() {
            return Err(ServiceError::invalid_argument(
                "Failed to provide proper ancestry name",
            ));
        }

        if request.layers.is_empty() {
            return Err(ServiceError::invalid_argument(
                "At least one layer should be provided for an ancestry",
            ));
        }

        let engine_version = self.ingest(&request).await?;
        Ok(PostAncestryResponse { engine_version })
    }

    async fn get_ancestry(
        &self,
        request: GetAncestryRequest,
    ) -> Result<GetAncestryResponse, ServiceError> {
        if request.ancestry_name.is_empty() {
            return Err(ServiceError::invalid_argument(
                "invalid get ancestry request",
            ));
        }

        let (ancestry, features) = self
            .reconstruct(
                &request.ancestry_name,
                request.with_features,
                request.with_vulnerabilities,
            )
            .await?;

        Ok(GetAncestryResponse { ancestry, features })
    }
}

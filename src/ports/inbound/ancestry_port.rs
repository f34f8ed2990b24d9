use crate::application::dto::{
    GetAncestryRequest, GetAncestryResponse, PostAncestryRequest, PostAncestryResponse,
};
use crate::shared::error::ServiceError;
use async_trait::async_trait;

/// AncestryPort - Inbound port for ancestry ingestion and retrieval
///
/// This port defines the interface that transports (RPC, HTTP, CLI) use to
/// submit the layers of an image and read them back.
#[async_trait]
pub trait AncestryPort: Send + Sync {
    /// Ingests the ordered layers of an ancestry
    ///
    /// Layers are processed one at a time, root first. Either every layer is
    /// persisted or, barring a failed rollback, none is.
    ///
    /// # Returns
    /// The engine version the layers were processed with
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name, no layers, a missing layer,
    ///   or a layer that could not be processed
    /// - `Internal` for datastore failures, including a failed rollback
    async fn post_ancestry(
        &self,
        request: PostAncestryRequest,
    ) -> Result<PostAncestryResponse, ServiceError>;

    /// Reads an ancestry back, layers ordered root first
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name
    /// - `NotFound` when a layer of the chain does not exist
    /// - `Internal` for any other failure
    async fn get_ancestry(
        &self,
        request: GetAncestryRequest,
    ) -> Result<GetAncestryResponse, ServiceError>;
}

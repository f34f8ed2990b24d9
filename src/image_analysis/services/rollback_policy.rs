use crate::ports::outbound::LayerProcessingError;
use crate::shared::error::ServiceError;

/// Maps a layer-processing failure to the error reported to the caller.
///
/// This is the single place where processing errors are classified.
pub struct RollbackPolicy;

impl RollbackPolicy {
    pub fn classify(error: &LayerProcessingError) -> ServiceError {
        match error {
            LayerProcessingError::CouldNotExtract { .. }
            | LayerProcessingError::ExtractedFileTooLarge { .. }
            | LayerProcessingError::Unsupported { .. } => {
                ServiceError::InvalidArgument(format!("unprocessable entity {}", error))
            }
            LayerProcessingError::BadRequest(_) => ServiceError::InvalidArgument(error.to_string()),
            LayerProcessingError::Datastore(_) => ServiceError::Internal(error.to_string()),
        }
    }

    /// Whether a failure at `current_layer` leaves persisted layers behind.
    ///
    /// Nothing of the ancestry exists yet when the root itself failed.
    pub fn requires_deletion(current_layer: &str, root_layer: &str) -> bool {
        current_layer != root_layer
    }
}

use super::datastore::{Datastore, DatastoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Failure kinds of layer processing.
///
/// The kind drives how an ingestion failure is reported to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayerProcessingError {
    #[error("could not extract the layer content: {details}")]
    CouldNotExtract { details: String },

    #[error("could not extract one or more files from the layer: file too big ({size} bytes, limit {limit} bytes)")]
    ExtractedFileTooLarge { size: u64, limit: u64 },

    #[error("OS and/or package manager are not supported: {details}")]
    Unsupported { details: String },

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Datastore(#[from] DatastoreError),
}

/// Everything needed to locate and process one layer.
#[derive(Debug, Clone)]
pub struct LayerRequest<'a> {
    /// Image format of the layer (e.g. "Docker")
    pub format: &'a str,
    /// Name the layer is persisted under
    pub name: &'a str,
    /// Name of the already persisted parent layer, if any
    pub parent: Option<&'a str>,
    /// Location of the layer content
    pub path: &'a str,
    /// Headers needed to fetch the content
    pub headers: &'a HashMap<String, String>,
}

/// LayerProcessor port for detecting and persisting layer content
///
/// Implementations extract the layer, detect its namespaces and features
/// and persist the result through the given datastore, linked to the parent.
#[async_trait]
pub trait LayerProcessor: Send + Sync {
    /// Detector generation of this processor, recorded on every layer it
    /// persists
    fn engine_version(&self) -> i32;

    /// Processes one layer
    ///
    /// # Arguments
    /// * `store` - Datastore to persist the layer into
    /// * `request` - Layer identity, parent and content location
    ///
    /// # Errors
    /// A `LayerProcessingError` whose kind tells extraction, support and
    /// request problems apart from datastore failures
    async fn process_layer(
        &self,
        store: &dyn Datastore,
        request: LayerRequest<'_>,
    ) -> Result<(), LayerProcessingError>;
}

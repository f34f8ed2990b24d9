use crate::image_analysis::domain::{Layer, PageCursor, VulnerabilityNotification};
use crate::shared::error::ServiceError;
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a datastore implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatastoreError {
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("datastore failure: {details}")]
    Backend { details: String },
}

impl DatastoreError {
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        DatastoreError::NotFound {
            entity,
            name: name.into(),
        }
    }

    pub fn backend(details: impl Into<String>) -> Self {
        DatastoreError::Backend {
            details: details.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatastoreError::NotFound { .. })
    }
}

impl From<DatastoreError> for ServiceError {
    fn from(error: DatastoreError) -> Self {
        match error {
            DatastoreError::NotFound { .. } => ServiceError::NotFound(error.to_string()),
            DatastoreError::Backend { .. } => ServiceError::Internal(error.to_string()),
        }
    }
}

/// Result of a bounded notification read: the page body and the cursor of
/// the following page, `None` once every page has been served.
pub type NotificationPage = (VulnerabilityNotification, Option<PageCursor>);

/// Datastore port for layers and notifications
///
/// The datastore is authoritative for layers, their parent links and
/// notification state. Implementations must provide per-layer-name
/// atomicity for insert and delete since concurrent ingestions are not
/// coordinated in process.
///
/// # Async Support
/// Implementations must be `Send + Sync`; requests run on their own tasks.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Fetches a layer by name
    ///
    /// # Arguments
    /// * `name` - Name of the layer
    /// * `with_features` - Attach the feature versions found in the layer
    /// * `with_vulnerabilities` - Also attach the vulnerabilities affecting
    ///   each feature version (only meaningful with `with_features`)
    ///
    /// # Errors
    /// `NotFound` when no layer carries that name
    async fn find_layer(
        &self,
        name: &str,
        with_features: bool,
        with_vulnerabilities: bool,
    ) -> Result<Layer, DatastoreError>;

    /// Persists a layer, replacing a previous layer of the same name
    async fn insert_layer(&self, layer: Layer) -> Result<(), DatastoreError>;

    /// Deletes a layer and every layer whose parent chain contains it
    async fn delete_layer(&self, name: &str) -> Result<(), DatastoreError>;

    /// Reads one page of a notification
    ///
    /// # Arguments
    /// * `name` - Name of the notification
    /// * `limit` - Maximum number of introducing layers per old/new list
    /// * `page` - Cursor of the page to read
    async fn get_notification(
        &self,
        name: &str,
        limit: usize,
        page: PageCursor,
    ) -> Result<NotificationPage, DatastoreError>;

    /// Marks a notification as deleted
    async fn delete_notification(&self, name: &str) -> Result<(), DatastoreError>;
}

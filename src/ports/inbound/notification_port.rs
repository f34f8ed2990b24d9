use crate::application::dto::{
    DeleteNotificationRequest, GetNotificationRequest, GetNotificationResponse,
};
use crate::shared::error::ServiceError;
use async_trait::async_trait;

/// NotificationPort - Inbound port for vulnerability notifications
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Reads one page of a notification
    ///
    /// The response always echoes the token of the page it carries, even
    /// when the request had none, and an empty next token on the last page.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name, a non-positive limit or a
    ///   token that does not decode
    /// - `NotFound` when the notification does not exist
    /// - `Internal` for any other failure
    async fn get_notification(
        &self,
        request: GetNotificationRequest,
    ) -> Result<GetNotificationResponse, ServiceError>;

    /// Marks a notification as deleted
    async fn delete_notification(
        &self,
        request: DeleteNotificationRequest,
    ) -> Result<(), ServiceError>;
}

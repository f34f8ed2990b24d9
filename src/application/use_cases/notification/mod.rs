use crate::application::dto::{
    DeleteNotificationRequest, GetNotificationRequest, GetNotificationResponse,
};
use crate::application::read_models::ReadModelBuilder;
use crate::image_analysis::domain::PageCursor;
use crate::ports::inbound::NotificationPort;
use crate::ports::outbound::{Datastore, PageTokenCodec};
use crate::shared::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;


/// NotificationUseCase - Paginated rendering of vulnerability notifications
///
/// Pages are addressed by opaque tokens produced by the injected codec, so
/// every instance sharing the pagination key can continue a pagination
/// started by another.
///
/// # Type Parameters
/// * `D` - Datastore implementation
/// * `C` - PageTokenCodec implementation
pub struct NotificationUseCase<D, C> {
    datastore: Arc<D>,
    token_codec: C,
}

impl<D, C> NotificationUseCase<D, C>
where
    D: Datastore,
    C: PageTokenCodec,
{
    /// Creates a new NotificationUseCase with injected dependencies
    pub fn new(datastore: Arc<D>, token_codec: C) -> Self {
        Self {
            datastore,
            token_codec,
        }
    }

    /// Resolves the cursor to read and the token echoed as `this_token`.
    fn current_page(&self, token: &str) -> Result<(PageCursor, String), ServiceError> {
        if token.is_empty() {
            let first = self
                .token_codec
                .encode(&PageCursor::FIRST)
                .map_err(|e| ServiceError::internal(e.to_string()))?;
            return Ok((PageCursor::FIRST, first));
        }

        let cursor = self
            .token_codec
            .decode(token)
            .map_err(|e| ServiceError::invalid_argument(format!("Invalid page format {}", e)))?;
        if !cursor.is_valid() {
            return Err(ServiceError::invalid_argument(format!(
                "Invalid page format: negative offset in {:?}",
                cursor
            )));
        }
        Ok((cursor, token.to_string()))
    }
}

#[async_trait]
impl<D, C> NotificationPort for NotificationUseCase<D, C>
where
    D: Datastore,
    C: PageTokenCodec,
{
    async fn get_notification(
        &self,
        request: GetNotificationRequest,
    ) -> Result<GetNotificationResponse, ServiceError> {
        if request.name.is_empty() {
            return Err(ServiceError::invalid_argument(
                "Failed to provide notification name",
            ));
        }

        if request.limit <= 0 {
            return Err(ServiceError::invalid_argument("Failed to provide page limit"));
        }

        let (cursor, this_token) = self.current_page(&request.page)?;

        let (notification, next_page) = self
            .datastore
            .get_notification(&request.name, request.limit as usize, cursor)
            .await?;

        let next_token = match next_page {
            Some(next) => self
                .token_codec
                .encode(&next)
                .map_err(|e| ServiceError::internal(e.to_string()))?,
            None => String::new(),
        };

        let notification =
            ReadModelBuilder::notification(&notification, request.limit, this_token, next_token)
                .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(GetNotificationResponse { notification })
    }

    async fn delete_notification(
        &self,
        request: DeleteNotificationRequest,
    ) -> Result<(), ServiceError> {
        if request.name.is_empty() {
            return Err(ServiceError::invalid_argument(
                "Failed to provide notification name",
            ));
        }

        self.datastore.delete_notification(&request.name).await?;
        Ok(())
    }
}

/// Data Transfer Objects for application layer
///
/// DTOs carry requests and responses between the inbound ports and
/// their callers, keeping the domain layer isolated.
mod ancestry_request;
mod notification_request;

pub use ancestry_request::{
    GetAncestryRequest, GetAncestryResponse, LayerSource, PostAncestryRequest,
    PostAncestryResponse,
};
pub use notification_request::{
    DeleteNotificationRequest, GetNotificationRequest, GetNotificationResponse,
};

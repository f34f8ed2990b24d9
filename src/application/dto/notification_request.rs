use crate::application::read_models::NotificationView;

/// GetNotificationRequest - Request DTO for reading one notification page
#[derive(Debug, Clone, Default)]
pub struct GetNotificationRequest {
    pub name: String,
    /// Maximum number of introducing layers per old/new list
    pub limit: i32,
    /// Token of the page to read, empty for the first page
    pub page: String,
}

impl GetNotificationRequest {
    pub fn new(name: impl Into<String>, limit: i32, page: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limit,
            page: page.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetNotificationResponse {
    pub notification: NotificationView,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteNotificationRequest {
    pub name: String,
}

impl DeleteNotificationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

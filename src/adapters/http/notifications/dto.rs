//! Request and response bodies for the notification endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NotificationId;
use crate::ports::NotificationView;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarkReadRequest {
    pub ids: Vec<NotificationId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub marked: u64,
}

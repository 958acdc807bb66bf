//! Notification projector and inbox handlers.

mod notification_projector;
mod queries;

pub use notification_projector::NotificationProjector;
pub use queries::{
    GetNotificationsHandler, GetUnreadCountHandler, MarkNotificationsReadCommand,
    MarkNotificationsReadHandler,
};

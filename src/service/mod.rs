pub mod deleter;
pub mod dispatcher;

pub use deleter::ReminderDeleter;
pub use dispatcher::{DispatchReport, NotificationDispatcher};

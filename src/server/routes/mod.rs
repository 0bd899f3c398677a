pub mod notify;
pub mod reminders;

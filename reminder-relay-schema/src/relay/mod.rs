mod endpoints;
mod outcome;

pub use endpoints::{DeleteReminderRequest, DeleteResponse, DispatchResponse, ProbeResponse};
pub use outcome::{ChannelOutcome, Platform};

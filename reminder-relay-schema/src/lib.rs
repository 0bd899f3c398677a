pub mod cronjob;
pub mod relay;
pub mod telegram;
pub mod wecom;

pub use cronjob::DeleteJobResponse;
pub use relay::{
    ChannelOutcome, DeleteReminderRequest, DeleteResponse, DispatchResponse, Platform,
    ProbeResponse,
};
pub use telegram::SendMessageRequest;
pub use wecom::{WecomText, WecomTextMessage};

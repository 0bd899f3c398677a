use serde::{Deserialize, Serialize};

/// Telegram Bot API `sendMessage` payload.
///
/// `chat_id` is kept as a string: Telegram accepts both numeric ids and `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
}

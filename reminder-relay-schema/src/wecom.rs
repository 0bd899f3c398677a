use serde::{Deserialize, Serialize};

/// WeCom group-robot webhook message (`msgtype = "text"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WecomTextMessage {
    pub msgtype: String,
    pub text: WecomText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WecomText {
    pub content: String,
}

impl WecomTextMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            msgtype: "text".to_string(),
            text: WecomText {
                content: content.into(),
            },
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Notification transport a reminder was pushed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Telegram,
    Wecom,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Telegram => "telegram",
            Platform::Wecom => "wecom",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one delivery attempt on one channel.
///
/// Exactly one of `result` (upstream answered, possibly with a non-2xx status) or `error`
/// (transport or decode failure) is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    pub platform: Platform,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelOutcome {
    pub fn answered(platform: Platform, success: bool, result: Value) -> Self {
        Self {
            platform,
            success,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body returned by the scheduler for `DELETE /jobs/{id}`.
///
/// A missing `success` field deserializes as `false`, so an empty `{}` is not treated as a
/// confirmed deletion.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DeleteJobResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

use serde::Serialize;

/// Logs an outbound payload as pretty JSON at DEBUG. Serialization is skipped unless DEBUG is on.
pub(crate) fn debug_payload<T>(what: &str, value: &T)
where
    T: Serialize,
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(payload) => tracing::debug!(%payload, "{what}"),
        Err(error) => tracing::debug!(%error, "{what} (payload not serializable)"),
    }
}

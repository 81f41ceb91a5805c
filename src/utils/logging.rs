use serde::Serialize;

/// Upper bound on pretty-printed payload size in debug logs.
const DEBUG_JSON_MAX_CHARS: usize = 4096;

/// Pretty-prints `value` for a debug log line, skipping the work unless DEBUG is enabled.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let mut pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    if let Some((cut, _)) = pretty_json.char_indices().nth(DEBUG_JSON_MAX_CHARS) {
        pretty_json.truncate(cut);
        pretty_json.push_str("\n<truncated>");
    }
    log_action(pretty_json.as_str());
}

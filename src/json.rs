use serde_json::{Map, Value};

/// Parse text that should be JSON, such as a GitHub API response body.
///
/// Never fails: malformed input is logged and yields an empty object, so
/// callers cannot tell an empty response from a broken one.
pub fn parse_json(input: &str) -> Value {
    match serde_json::from_str(input) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "Could not parse JSON input");
            Value::Object(Map::new())
        }
    }
}

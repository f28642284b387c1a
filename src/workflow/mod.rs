pub mod issues;
pub mod partition;
pub mod repos;
pub mod run;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::platform::github::link::next_link;
use crate::platform::types::ApiPage;

/// Log a pagination continuation. Further pages are never fetched.
fn log_pagination(page: &ApiPage) {
    if let Some(link) = &page.link {
        tracing::info!(
            url = %page.url,
            link = %link,
            next = ?next_link(link),
            "More pages available, only the first page is fetched"
        );
    }
}

/// Take the JSON array out of a decoded response body.
fn expect_array(value: Value, url: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(AppError::UnexpectedResponse(format!(
            "{url} did not return a JSON array (got {})",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

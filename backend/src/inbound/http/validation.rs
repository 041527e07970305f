//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request validation failures carry a `{ "field": …, "code": … }` details
//! object so clients can highlight the offending field without parsing the
//! human-readable message.

use serde_json::json;

use crate::domain::Error;

/// Build an `invalid_request` error annotated with the failing field.
pub(crate) fn field_error(
    message: impl Into<String>,
    field: &str,
    code: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Build the error for a required field that was absent or blank.
pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(format!("missing required field: {field}"), field, "missing_field")
}

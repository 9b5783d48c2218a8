//! Status-code and payload mapping shared by every endpoint.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{JsonObject, RecordList};

/// Check the status, then parse the body as a JSON object. A body that is
/// not an object becomes an empty object.
pub fn lenient_json(response: HttpResponse) -> Result<JsonObject, ApiError> {
    check_status(&response)?;
    Ok(parse_lenient(&response.body))
}

/// Check the status, then parse the body as JSON the caller needs to walk.
pub fn structured_json(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::JsonParse(e.to_string()))
}

/// Check the status, then hand back the body untouched.
pub fn raw_bytes(response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    check_status(&response)?;
    Ok(response.body)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 | 201 => Ok(()),
        400 => Err(ApiError::BadRequest {
            body: serde_json::from_slice(&response.body)
                .unwrap_or_else(|_| Value::String(response.text())),
        }),
        401 => Err(ApiError::Authentication),
        403 => Err(ApiError::Forbidden),
        404 => Err(ApiError::NotFound),
        429 => Err(ApiError::RateLimited),
        status => Err(ApiError::UnexpectedStatus {
            status,
            body: response.text(),
        }),
    }
}

/// Parse a JSON object, yielding an empty object for anything else.
pub fn parse_lenient(body: &[u8]) -> JsonObject {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// Normalize a list payload.
///
/// Accepts a bare array or a `{count, next, previous, results}` envelope.
/// Non-object entries are dropped; any other shape yields an empty list.
pub fn normalize_list(value: Value) -> RecordList {
    match value {
        Value::Array(items) => {
            let results = objects(items);
            RecordList {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            }
        }
        Value::Object(mut envelope) => {
            let results = match envelope.remove("results") {
                Some(Value::Array(items)) => objects(items),
                _ => Vec::new(),
            };
            RecordList {
                count: envelope
                    .get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(results.len() as u64),
                next: envelope.get("next").and_then(Value::as_str).map(str::to_string),
                previous: envelope
                    .get("previous")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                results,
            }
        }
        _ => RecordList::default(),
    }
}

fn objects(items: Vec<Value>) -> Vec<JsonObject> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

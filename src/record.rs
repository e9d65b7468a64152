//! Tolerant accessors for documents fetched from the remote store.
//!
//! Store documents are string-keyed maps of dynamically typed values. Every
//! accessor returns `None` when a field is missing, null or has the wrong
//! type so that callers can apply their own defaults.

use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::Error;

/// A single document as returned by the remote store: field names mapped
/// to dynamically typed values.
pub type Document = Map<String, Value>;

/// The field that holds the document ID in an exported collection array.
const ID_FIELD: &str = "id";

fn field<'a>(document: &'a Document, name: &str) -> Option<&'a Value> {
    match document.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn log_wrong_type(name: &str, expected: &str, value: &Value) {
    tracing::debug!("field \"{name}\" should be {expected} but got {value}, using the default");
}

/// Get a string field.
pub(crate) fn get_string(document: &Document, name: &str) -> Option<String> {
    match field(document, name)? {
        Value::String(text) => Some(text.clone()),
        other => {
            log_wrong_type(name, "a string", other);
            None
        }
    }
}

/// Get a decimal field. Integers are accepted.
pub(crate) fn get_f64(document: &Document, name: &str) -> Option<f64> {
    match field(document, name)? {
        Value::Number(number) => number.as_f64(),
        other => {
            log_wrong_type(name, "a number", other);
            None
        }
    }
}

/// Get a non-negative integer field.
///
/// Decimals are truncated, negative numbers become zero and numbers larger
/// than [u32::MAX] saturate.
pub(crate) fn get_u32(document: &Document, name: &str) -> Option<u32> {
    match field(document, name)? {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                Some(u32::try_from(unsigned).unwrap_or(u32::MAX))
            } else if number.as_i64().is_some() {
                Some(0)
            } else {
                // `as` saturates and maps NaN to zero.
                number.as_f64().map(|float| float as u32)
            }
        }
        other => {
            log_wrong_type(name, "a number", other);
            None
        }
    }
}

/// Get a timestamp field.
///
/// Accepts an RFC 3339 string, a number of seconds since the Unix epoch, or
/// the store's timestamp object `{"seconds": .., "nanoseconds": ..}` (also
/// with leading underscores as written by collection exports).
pub(crate) fn get_timestamp(document: &Document, name: &str) -> Option<OffsetDateTime> {
    let value = field(document, name)?;

    let timestamp = match value {
        Value::String(text) => OffsetDateTime::parse(text, &Rfc3339).ok(),
        Value::Number(number) => match number.as_i64() {
            Some(seconds) => OffsetDateTime::from_unix_timestamp(seconds).ok(),
            None => number.as_f64().and_then(|seconds| {
                OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128).ok()
            }),
        },
        Value::Object(object) => timestamp_from_object(object),
        _ => None,
    };

    if timestamp.is_none() {
        log_wrong_type(name, "a timestamp", value);
    }

    timestamp
}

fn timestamp_from_object(object: &Document) -> Option<OffsetDateTime> {
    let seconds = object
        .get("seconds")
        .or_else(|| object.get("_seconds"))
        .and_then(Value::as_i64)?;
    let nanoseconds = object
        .get("nanoseconds")
        .or_else(|| object.get("_nanoseconds"))
        .and_then(Value::as_i64)
        .unwrap_or(0);

    OffsetDateTime::from_unix_timestamp_nanos(
        i128::from(seconds) * 1_000_000_000 + i128::from(nanoseconds),
    )
    .ok()
}

/// Parse an exported collection into `(id, document)` pairs.
///
/// The export is either a JSON array of documents that each carry an `"id"`
/// field, or a JSON object that maps document IDs to documents. Array order
/// is preserved. Documents without an ID in an array get their index as ID.
///
/// # Errors
/// Returns [Error::InvalidRecordFile] if the text is not JSON or is neither
/// an array nor an object of documents.
pub fn parse_collection(text: &str) -> Result<Vec<(String, Document)>, Error> {
    let value: Value =
        serde_json::from_str(text).map_err(|error| Error::InvalidRecordFile(error.to_string()))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(mut document) => {
                    let id = match document.remove(ID_FIELD) {
                        Some(Value::String(id)) => id,
                        Some(Value::Number(id)) => id.to_string(),
                        _ => index.to_string(),
                    };
                    Ok((id, document))
                }
                other => Err(Error::InvalidRecordFile(format!(
                    "item {index} is not a document: {other}"
                ))),
            })
            .collect(),
        Value::Object(documents) => documents
            .into_iter()
            .map(|(id, item)| match item {
                Value::Object(document) => Ok((id, document)),
                other => Err(Error::InvalidRecordFile(format!(
                    "document \"{id}\" is not an object: {other}"
                ))),
            })
            .collect(),
        other => Err(Error::InvalidRecordFile(format!(
            "expected an array or object of documents, got {other}"
        ))),
    }
}

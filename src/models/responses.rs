// Deezer response envelope: every list endpoint answers `{ "data": [...] }`,
// failures answer `{ "error": { "type": ..., "message": ..., "code": ... } }`.

use crate::utils::errors::CatalogError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ServiceErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

/// Decode the `data` array of a catalog response.
///
/// A missing or non-array `data` field yields an empty list. Items that fail to
/// decode are skipped one by one so a single odd entry does not blank the list.
pub fn parse_data_envelope<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, CatalogError> {
    let envelope: DataEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.error {
        return Err(CatalogError::Service {
            kind: err.kind,
            message: err.message,
        });
    }

    let items = match envelope.data {
        Some(Value::Array(items)) => items,
        Some(other) => {
            log::warn!(
                "[Catalog] Response `data` is not an array ({}), treating as empty",
                value_kind(&other)
            );
            return Ok(Vec::new());
        }
        None => return Ok(Vec::new()),
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("[Catalog] Skipping malformed item #{}: {}", idx, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        log::debug!("[Catalog] Decoded {}/{} items", decoded.len(), total);
    }

    Ok(decoded)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use itemfeed_core::Record;
use serde::Deserialize;
use serde_json::Value;

use crate::SourceError;

/// Wire shape of one entry. `name` must be present but may hold any JSON value.
#[derive(Debug, Deserialize)]
struct WireRecord {
    id: i64,
    #[serde(rename = "listId")]
    list_id: i64,
    name: Value,
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Record {
            id: wire.id,
            group_id: wire.list_id,
            name: coerce_name(wire.name),
        }
    }
}

/// Decode a JSON array of entries into records, failing the whole payload on any bad entry.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, SourceError> {
    let wire: Vec<WireRecord> =
        serde_json::from_slice(bytes).map_err(|err| SourceError::Decode(err.to_string()))?;
    Ok(wire.into_iter().map(Record::from).collect())
}

fn coerce_name(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

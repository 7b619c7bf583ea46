//! Dataframe construction from raw JSON records.
//!
//! The schema is inferred from the records themselves; nothing beyond
//! what inference yields is enforced.  Frame manipulation past this
//! point belongs to Polars, not to this crate.

use std::io::Cursor;
use std::num::NonZeroUsize;

use polars::prelude::*;

use crate::error::PullError;

/// Rows inspected when inferring the schema.  Wide enough that sparse
/// late-appearing ticket fields still get a column.
pub const INFER_SCHEMA_ROWS: usize = 10_000;

/// Build a dataframe from an array of loosely-typed records.
pub fn records_to_frame(records: &serde_json::Value) -> Result<DataFrame, PullError> {
    if let Some(array) = records.as_array() {
        if array.is_empty() {
            return Ok(DataFrame::empty());
        }
    }

    let bytes = serde_json::to_vec(records)?;
    let frame = JsonReader::new(Cursor::new(bytes))
        .with_json_format(JsonFormat::Json)
        .infer_schema_len(NonZeroUsize::new(INFER_SCHEMA_ROWS))
        .finish()?;
    Ok(frame)
}

/// Unwrap the records nested under `key` and build a frame from them.
///
/// Directory responses nest their rows under the endpoint name; a
/// missing key is treated as an empty record list.
pub fn keyed_records_to_frame(
    response: &serde_json::Value,
    key: &str,
) -> Result<DataFrame, PullError> {
    let records = response
        .get(key)
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
    records_to_frame(&records)
}

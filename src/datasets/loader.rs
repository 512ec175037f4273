//! Item table loading
//!
//! Datasets are JSON objects mapping object IDs to attribute records:
//!
//! ```json
//! {
//!   "0000": { "color": "red", "shape": "round" },
//!   "0001": { "color": "blue", "shape": "square" }
//! }
//! ```
//!
//! String, number and boolean values are accepted and compared by their
//! textual form; nested arrays, objects and nulls are rejected.

use crate::core::{ItemTable, OracleError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item {id:?} attribute {attribute:?} is not a scalar value")]
    NonScalarValue { id: String, attribute: String },
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

type RawItems = BTreeMap<String, BTreeMap<String, Value>>;

/// Parse an item table from JSON text
///
/// # Errors
///
/// Returns `DatasetError::Json` for malformed JSON, `NonScalarValue` for
/// nested values, and `Oracle` for empty tables or inconsistent schemas.
///
/// # Examples
/// ```
/// use kary_oracle::datasets::loader::items_from_json;
///
/// let items = items_from_json(r#"{"a": {"legs": 4}, "b": {"legs": 2}}"#).unwrap();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items.value(0, 0), "4");
/// ```
pub fn items_from_json(json: &str) -> Result<ItemTable, DatasetError> {
    let raw: RawItems = serde_json::from_str(json)?;

    let mut records = Vec::with_capacity(raw.len());
    for (id, record) in raw {
        let mut attributes = Vec::with_capacity(record.len());
        for (attribute, value) in record {
            let text = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(DatasetError::NonScalarValue { id, attribute });
                }
            };
            attributes.push((attribute, text));
        }
        records.push((id, attributes));
    }

    Ok(ItemTable::from_records(records)?)
}

/// Load an item table from a JSON file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, otherwise the errors of
/// [`items_from_json`].
///
/// # Examples
/// ```no_run
/// use kary_oracle::datasets::loader::load_items_from_file;
///
/// let items = load_items_from_file("data/kary300_Items.json").unwrap();
/// println!("Loaded {} items", items.len());
/// ```
pub fn load_items_from_file<P: AsRef<Path>>(path: P) -> Result<ItemTable, DatasetError> {
    let content = fs::read_to_string(path)?;
    items_from_json(&content)
}

/// Parse the embedded demo dataset
///
/// # Errors
///
/// Only fails if the embedded file is malformed.
pub fn demo_items() -> Result<ItemTable, DatasetError> {
    items_from_json(super::DEMO_ITEMS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::DEMO_ITEMS_COUNT;

    #[test]
    fn parses_string_records() {
        let items = items_from_json(
            r#"{
                "b": {"color": "red", "size": "L"},
                "a": {"color": "red", "size": "S"}
            }"#,
        )
        .unwrap();

        assert_eq!(items.ids(), &["a", "b"]);
        assert_eq!(items.attributes(), &["color", "size"]);
    }

    #[test]
    fn scalar_values_become_text() {
        let items =
            items_from_json(r#"{"a": {"legs": 4, "pet": true}, "b": {"legs": 2.5, "pet": false}}"#)
                .unwrap();

        let legs = items.attribute_index("legs").unwrap();
        let pet = items.attribute_index("pet").unwrap();
        assert_eq!(items.value(0, legs), "4");
        assert_eq!(items.value(1, legs), "2.5");
        assert_eq!(items.value(0, pet), "true");
    }

    #[test]
    fn nested_values_are_rejected() {
        let result = items_from_json(r#"{"a": {"tags": ["x", "y"]}}"#);
        assert!(matches!(
            result,
            Err(DatasetError::NonScalarValue { ref id, ref attribute }) if id == "a" && attribute == "tags"
        ));
    }

    #[test]
    fn empty_object_is_rejected() {
        let result = items_from_json("{}");
        assert!(matches!(
            result,
            Err(DatasetError::Oracle(OracleError::EmptyTable))
        ));
    }

    #[test]
    fn schema_mismatch_is_reported() {
        let result = items_from_json(r#"{"a": {"color": "red"}, "b": {"shape": "round"}}"#);
        assert!(matches!(
            result,
            Err(DatasetError::Oracle(OracleError::SchemaMismatch { .. }))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            items_from_json("{not json"),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_items_from_file("/definitely/not/here/items.json");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn load_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!(
            "kary_oracle_loader_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"x": {"color": "red"}, "y": {"color": "blue"}}"#).unwrap();

        let items = load_items_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(items.len(), 2);
    }

    #[test]
    fn demo_dataset_loads() {
        let items = demo_items().unwrap();
        assert_eq!(items.len(), DEMO_ITEMS_COUNT);
        assert_eq!(
            items.attributes(),
            &["category", "color", "material", "shape", "size"]
        );
    }
}

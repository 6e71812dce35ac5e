//! Parsing data sets from JSON exports.
//!
//! Three layouts are accepted:
//! - a single JSON object
//! - a JSON array of objects
//! - JSON lines, one object per line

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, ModelResult};

/// Parse all data sets contained in `content`.
pub fn parse_data_sets<D: DeserializeOwned>(content: &str) -> ModelResult<Vec<D>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Err(ModelError::Empty);
    }

    // A whole-document parse distinguishes single objects and arrays from JSON lines.
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => {
            debug!("Parsing {} data sets from JSON array", items.len());
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value(item).map_err(|source| ModelError::InvalidDataSet {
                        location: format!("index {}", i),
                        source,
                    })
                })
                .collect()
        }
        Ok(value) => serde_json::from_value(value)
            .map(|data_set| vec![data_set])
            .map_err(|source| ModelError::InvalidDataSet {
                location: "document".to_string(),
                source,
            }),
        Err(_) => parse_json_lines(content),
    }
}

fn parse_json_lines<D: DeserializeOwned>(content: &str) -> ModelResult<Vec<D>> {
    let data_sets = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| ModelError::InvalidDataSet {
                location: format!("line {}", i + 1),
                source,
            })
        })
        .collect::<ModelResult<Vec<D>>>()?;

    debug!("Parsed {} data sets from JSON lines", data_sets.len());
    if data_sets.is_empty() {
        return Err(ModelError::Empty);
    }
    Ok(data_sets)
}

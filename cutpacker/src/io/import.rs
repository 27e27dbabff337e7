use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info};
use thiserror::Error;

use crate::entities::PackingInstance;
use crate::error::PackingError;
use crate::io::ext_repr::{ExtConfig, ExtItem};

/// Failure to turn external data into a [`PackingInstance`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed line in the item data, `line` is 1-based
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed data describing an invalid instance
    #[error(transparent)]
    Invalid(#[from] PackingError),
}

/// Parses a JSON data configuration, e.g. `{"bin_capacity": 6000}`.
pub fn parse_config(text: &str) -> Result<ExtConfig, ImportError> {
    Ok(serde_json::from_str(text)?)
}

/// Parses item data with one `name;quantity;weight` record per line.
///
/// Blank lines and empty fields are skipped.
pub fn parse_items(text: &str) -> Result<Vec<ExtItem>, ImportError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_item_line(idx + 1, line))
        .collect()
}

fn parse_item_line(line: usize, text: &str) -> Result<ExtItem, ImportError> {
    let parse_err = |reason: String| ImportError::Parse { line, reason };

    let fields = text
        .split(';')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect_vec();

    match fields.as_slice() {
        [name, quantity, weight] => {
            let quantity = quantity
                .parse::<i64>()
                .map_err(|e| parse_err(format!("invalid quantity {quantity:?}: {e}")))?;
            let weight = weight
                .parse::<f64>()
                .map_err(|e| parse_err(format!("invalid weight {weight:?}: {e}")))?;
            Ok(ExtItem {
                name: name.to_string(),
                quantity,
                weight,
            })
        }
        _ => Err(parse_err(format!(
            "expected 3 fields (name;quantity;weight), found {}",
            fields.len()
        ))),
    }
}

/// Imports an instance into the library
pub fn import(config: &ExtConfig, items: &[ExtItem]) -> Result<PackingInstance, ImportError> {
    let mut instance = PackingInstance::new(config.bin_capacity)?;
    for ext_item in items {
        let quantity = usize::try_from(ext_item.quantity).map_err(|_| {
            PackingError::InvalidArgument(format!(
                "quantity of item {} must not be negative, got {}",
                ext_item.name, ext_item.quantity
            ))
        })?;
        instance.add_items(&ext_item.name, quantity, ext_item.weight)?;
    }
    info!(
        "[IMPORT] instance with {} item types, {} items, bin capacity {}",
        items.len(),
        instance.n_items(),
        instance.bin_capacity()
    );
    Ok(instance)
}

pub fn read_config(path: &Path) -> Result<ExtConfig, ImportError> {
    let config = parse_config(&read_to_string(path)?)?;
    debug!("[IMPORT] read {config:?} from {}", path.display());
    Ok(config)
}

pub fn read_items(path: &Path) -> Result<Vec<ExtItem>, ImportError> {
    parse_items(&read_to_string(path)?)
}

fn read_to_string(path: &Path) -> Result<String, ImportError> {
    fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

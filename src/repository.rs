//! Whole-file persistence for the product collection.
//!
//! The file is a pretty-printed JSON array (4-space indent) of product
//! objects. `load` reads everything at once and `save` rewrites everything at
//! once; there is no temp-file swap, so a crash mid-write can leave a
//! truncated file behind.

use crate::product::{DecodeError, Product, decode};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default data file, resolved against the working directory.
pub const DEFAULT_DATA_FILE: &str = "productos.json";

const INDENT: &[u8] = b"    ";

/// Failure to read or write the data file. Never recovered from at load time.
#[derive(Debug)]
pub enum PersistenceError {
    Read {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// `index` is the 1-based position of the entry inside the array.
    Decode {
        path: PathBuf,
        index: usize,
        source: DecodeError,
    },
    Write {
        path: PathBuf,
        source: io::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Read { path, .. } => {
                write!(f, "unable to read {}", path.display())
            }
            PersistenceError::Parse { path, .. } => {
                write!(f, "{} is not a valid JSON product array", path.display())
            }
            PersistenceError::Decode { path, index, .. } => {
                write!(f, "{}: product #{index} is malformed", path.display())
            }
            PersistenceError::Write { path, .. } => {
                write!(f, "unable to write {}", path.display())
            }
            PersistenceError::Encode { path, .. } => {
                write!(f, "unable to serialize products for {}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Read { source, .. } | PersistenceError::Write { source, .. } => {
                Some(source)
            }
            PersistenceError::Parse { source, .. } | PersistenceError::Encode { source, .. } => {
                Some(source)
            }
            PersistenceError::Decode { source, .. } => Some(source),
        }
    }
}

/// Read every product stored at `path`.
///
/// A missing file is an empty inventory, not an error. An unreadable file, a
/// document that is not a JSON array, or an entry that fails to decode is
/// returned as an error; callers are expected to treat it as fatal.
pub fn load(path: &Path) -> Result<Vec<Product>, PersistenceError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file absent; starting empty");
        return Ok(Vec::new());
    }

    let read_err = |source: io::Error| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let entries: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                read_err(io::Error::from(source))
            } else {
                PersistenceError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    let products = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            decode(entry).map_err(|source| PersistenceError::Decode {
                path: path.to_path_buf(),
                index: idx + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(path = %path.display(), count = products.len(), "loaded products");
    Ok(products)
}

/// Overwrite `path` with the full product sequence, in order.
pub fn save(products: &[Product], path: &Path) -> Result<(), PersistenceError> {
    let write_err = |source: io::Error| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write_products(products, &mut writer).map_err(|source| {
        if source.is_io() {
            write_err(io::Error::from(source))
        } else {
            PersistenceError::Encode {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    writer.flush().map_err(write_err)?;

    tracing::info!(path = %path.display(), count = products.len(), "saved products");
    Ok(())
}

/// Render the product array with the on-disk formatting.
pub fn write_products<W: Write>(products: &[Product], writer: W) -> serde_json::Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    products.serialize(&mut serializer)
}

//! Binary persistence for arbitrary serializable objects.
//!
//! The parent directory is created on demand, so callers can point at a
//! path like `artifacts/preprocessor.bin` without preparing anything.
//! An existing file at the target path is overwritten.

use crate::error::{Result, ResultExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialize an object to a path in bincode form.
pub fn save_object<T: Serialize>(path: impl AsRef<Path>, object: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("creating directory {}", parent.display()))?;
        }
    }

    let bytes = bincode::serialize(object).context("encoding object")?;
    fs::write(path, bytes).context(format!("writing object to {}", path.display()))?;
    Ok(())
}

/// Load an object previously written by [`save_object`].
pub fn load_object<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path).context(format!("reading object from {}", path.display()))?;
    bincode::deserialize(&bytes).context(format!("decoding object from {}", path.display()))
}

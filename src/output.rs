use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Write the rendered table to `path`, replacing any previous file.
pub fn write_table(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

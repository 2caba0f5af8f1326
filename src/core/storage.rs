//! Filesystem writing for page-loader
//!
//! Creates the output layout and writes files, surfacing every failure
//! as a `StorageError` carrying the OS-level cause and the offending
//! path. There is no atomic all-or-nothing commit across the
//! filesystem; a crash mid-write can leave a partial asset directory.

use std::io;
use std::path::Path;

use crate::core::error::{Error, Result};

/// Verifies the destination exists and is a directory.
///
/// Called before any asset is fetched, so a bad destination fails the
/// run without a single asset round trip.
pub async fn check_output_dir(path: &Path) -> Result<()> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| Error::storage(path, source))?;

    if !metadata.is_dir() {
        return Err(Error::storage(
            path,
            io::Error::other("destination is not a directory"),
        ));
    }

    Ok(())
}

/// Creates a directory if it does not exist yet.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match tokio::fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(Error::storage(path, source)),
    }
}

/// Writes a file, replacing any existing content.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| Error::storage(path, source))
}

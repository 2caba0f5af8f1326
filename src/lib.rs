//! # page-loader
//!
//! Downloads a single web page over HTTP, saves it to local disk,
//! downloads every same-origin asset the page references (stylesheets,
//! scripts, images, the markup itself when self-referenced) and
//! rewrites the page's references to point at the local copies.
//!
//! File and directory names are derived deterministically from the
//! source URLs, so the same page always lands under the same names:
//!
//! ```text
//! <output-dir>/localhost-blog-about.html
//! <output-dir>/localhost-blog-about_files/localhost-assets-scripts.js
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # async fn example() -> page_loader::Result<()> {
//! let path = page_loader::download("http://localhost/blog/about", "/tmp/archive").await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! Failure is all-or-nothing: if the page fetch, any asset fetch or the
//! destination check fails, nothing is written.

use std::path::{Path, PathBuf};

pub mod core;

pub use crate::core::error::{Error, Result};
pub use crate::core::loader::{DownloadOptions, PageLoader, ProgressCallback};
pub use crate::core::naming::{asset_file_name, assets_dir_name, page_file_name};

/// Downloads a page with its same-origin assets using default options.
///
/// Returns the path of the saved page file.
pub async fn download(url: &str, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    download_with_options(url, output_dir, DownloadOptions::default()).await
}

/// Downloads a page with custom options (progress callback, connection
/// bound).
pub async fn download_with_options(
    url: &str,
    output_dir: impl AsRef<Path>,
    options: DownloadOptions,
) -> Result<PathBuf> {
    let loader = PageLoader::with_options(options)?;
    loader.download(url, output_dir.as_ref()).await
}

//! Core library modules for page-loader
//!
//! This module contains the internal implementation details of the
//! page-loader library.

pub mod error;
pub mod fetcher;
pub mod loader;
pub mod naming;
pub mod scanner;
pub mod storage;

// Re-export main types for internal use
pub use error::{Error, Result};
pub use loader::{DownloadOptions, PageLoader, ProgressCallback};

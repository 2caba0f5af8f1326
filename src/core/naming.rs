//! Local name derivation for page-loader
//!
//! Maps URLs to filesystem-safe file and directory names. The mapping is
//! pure and deterministic: the external test surface checks exact file
//! names, so the same URL must always produce the same string.

use url::Url;

const SEPARATOR: char = '-';
const PAGE_EXTENSION: &str = ".html";
const ASSETS_DIR_SUFFIX: &str = "_files";

/// Derives the file name the page itself is saved under.
///
/// `http://localhost/blog/about` becomes `localhost-blog-about.html`.
pub fn page_file_name(url: &Url) -> String {
    format!("{}{}", slugify(&host_and_path(url)), PAGE_EXTENSION)
}

/// Derives the file name an asset is saved under.
///
/// A recognizable extension on the last path segment is preserved;
/// anything else falls back to `.html`, which also covers the page's own
/// markup being saved again when the page references itself.
pub fn asset_file_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let path = url.path().trim_end_matches('/');

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    let (stem, extension) = if last_segment.contains('.') {
        // The last dot in the full path sits inside the last segment.
        let dot = path.rfind('.').unwrap_or(path.len());
        (&path[..dot], &path[dot..])
    } else {
        (path, PAGE_EXTENSION)
    };

    format!("{}{}", slugify(&format!("{}{}", host, stem)), extension)
}

/// Derives the directory name the page's assets are collected under:
/// the page name with `.html` stripped and `_files` appended.
pub fn assets_dir_name(url: &Url) -> String {
    format!("{}{}", slugify(&host_and_path(url)), ASSETS_DIR_SUFFIX)
}

fn host_and_path(url: &Url) -> String {
    format!(
        "{}{}",
        url.host_str().unwrap_or_default(),
        url.path().trim_end_matches('/')
    )
}

/// Replaces every maximal run of non-alphanumeric characters with a
/// single separator. Query and fragment never reach this function.
fn slugify(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    let mut in_run = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch);
            in_run = false;
        } else if !in_run {
            name.push(SEPARATOR);
            in_run = true;
        }
    }

    name
}

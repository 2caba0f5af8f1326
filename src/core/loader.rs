//! Page download pipeline for page-loader
//!
//! Orchestrates the whole run: fetch page, prepare output, scan the
//! markup, fetch every unique same-origin asset, rewrite references and
//! commit the result. Every asset is fetched before any file is
//! written, so a failed fetch leaves the destination untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use log::{debug, info};
use url::Url;

use crate::core::error::{Error, Result};
use crate::core::fetcher::HttpClient;
use crate::core::naming;
use crate::core::scanner::{self, Reference};
use crate::core::storage;

/// Progress callback: (assets downloaded, total assets)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Options for a page download
pub struct DownloadOptions {
    /// Optional progress callback over the asset count
    pub progress: Option<ProgressCallback>,

    /// Upper bound for concurrent asset fetches
    pub max_connections: usize,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            progress: None,
            max_connections: 8,
        }
    }
}

/// One same-origin asset scheduled for download
struct Asset {
    url: Url,
    file_name: String,
}

/// High-level pipeline that downloads a page with its assets
pub struct PageLoader {
    client: HttpClient,
    options: DownloadOptions,
}

impl PageLoader {
    /// Creates a loader with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(DownloadOptions::default())
    }

    /// Creates a loader with custom options.
    pub fn with_options(options: DownloadOptions) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            options,
        })
    }

    /// Downloads `url` with its same-origin assets into `output_dir`.
    ///
    /// Returns the path of the saved page. On any error nothing is
    /// written to the destination.
    pub async fn download(&self, url: &str, output_dir: &Path) -> Result<PathBuf> {
        let page_url = Url::parse(url)?;

        // Fetch the page before touching the filesystem.
        let page_bytes = self.client.fetch(&page_url).await?;
        let html = String::from_utf8_lossy(&page_bytes).into_owned();

        // Destination must be an existing directory, checked before any
        // asset round trip.
        storage::check_output_dir(output_dir).await?;
        let page_name = naming::page_file_name(&page_url);
        let dir_name = naming::assets_dir_name(&page_url);

        let references = scanner::scan(&html, &page_url);
        let assets = unique_assets(&references);
        info!(
            "found {} same-origin asset(s) on {}",
            assets.len(),
            page_url
        );

        // Every asset is fetched before any file is written.
        let payloads = self.fetch_assets(&assets).await?;

        let rewritten = rewrite(&html, &references, &dir_name);

        // Commit: asset directory first, then the assets, then the page.
        let assets_dir = output_dir.join(&dir_name);
        if !assets.is_empty() {
            storage::ensure_dir(&assets_dir).await?;
        }
        for (asset, bytes) in assets.iter().zip(&payloads) {
            storage::write_file(&assets_dir.join(&asset.file_name), bytes).await?;
        }

        let page_path = output_dir.join(&page_name);
        storage::write_file(&page_path, rewritten.as_bytes()).await?;
        info!("page saved to {}", page_path.display());

        Ok(page_path)
    }

    /// Fetches every asset concurrently with a bounded fan-out.
    ///
    /// The first failure aborts the whole run; in-flight fetches are
    /// dropped. Payloads come back in asset order.
    async fn fetch_assets(&self, assets: &[Asset]) -> Result<Vec<Bytes>> {
        let total = assets.len() as u64;
        let connections = effective_connections(assets.len(), self.options.max_connections);

        let fetches = futures::stream::iter(assets.iter().enumerate())
            .map(|(index, asset)| async move {
                debug!("fetching asset {}", asset.url);
                let bytes = self.client.fetch(&asset.url).await?;
                Ok::<_, Error>((index, bytes))
            })
            .buffer_unordered(connections);
        tokio::pin!(fetches);

        let mut indexed: Vec<(usize, Bytes)> = Vec::with_capacity(assets.len());
        while let Some(result) = fetches.next().await {
            indexed.push(result?);
            if let Some(ref progress) = self.options.progress {
                progress(indexed.len() as u64, total);
            }
        }

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, bytes)| bytes).collect())
    }
}

/// Deduplicates references by resolved URL, keeping first-seen order.
fn unique_assets(references: &[Reference]) -> Vec<Asset> {
    let mut seen = HashSet::new();
    let mut assets = Vec::new();

    for reference in references {
        if seen.insert(reference.url.as_str().to_owned()) {
            assets.push(Asset {
                file_name: naming::asset_file_name(&reference.url),
                url: reference.url.clone(),
            });
        }
    }

    assets
}

/// Replaces each discovered reference value with the local relative
/// path `<asset-dir>/<derived-name>`. Applied once per distinct
/// original value; quote delimiters keep the replacement from touching
/// longer URLs that share a prefix.
fn rewrite(html: &str, references: &[Reference], dir_name: &str) -> String {
    let mut rewritten = html.to_owned();
    let mut replaced = HashSet::new();

    for reference in references {
        if !replaced.insert(reference.raw.clone()) {
            continue;
        }

        let local = format!("{}/{}", dir_name, naming::asset_file_name(&reference.url));
        for quote in ['"', '\''] {
            let from = format!("{}{}{}", quote, reference.raw, quote);
            let to = format!("{}{}{}", quote, local, quote);
            rewritten = rewritten.replace(&from, &to);
        }
    }

    rewritten
}

/// Bounds the fan-out by the asset count, the configured limit and the
/// CPU count, never dropping below one.
fn effective_connections(asset_count: usize, max_connections: usize) -> usize {
    asset_count
        .min(max_connections)
        .min(num_cpus::get() * 2)
        .max(1)
}

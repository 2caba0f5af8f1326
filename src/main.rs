//! # page-loader CLI
//!
//! Command-line interface for the page-loader library. Downloads a web
//! page with its same-origin assets for offline reading:
//!
//! ```text
//! page-loader http://localhost/blog/about            # save into the current directory
//! page-loader -o /tmp/archive http://localhost/blog/about
//! ```

use anyhow::Context;
use clap::Parser;
use log::error;
use page_loader::DownloadOptions;

mod cli;

/// Command-line interface for page-loader
#[derive(Parser)]
#[command(name = "page-loader")]
#[command(about = "Downloads a web page with its assets for offline reading")]
#[command(long_about = "Downloads a web page and every same-origin asset it references,
rewriting the saved markup to point at the local copies:
  page-loader http://localhost/blog/about             # save into the current directory
  page-loader -o /tmp/archive http://localhost/blog/about

File names are derived from the URL, so the page above lands in
/tmp/archive/localhost-blog-about.html with its assets under
/tmp/archive/localhost-blog-about_files/.")]
#[command(version)]
struct Cli {
    /// Page URL to download
    url: String,

    /// Output directory (must exist)
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("📄 page-loader v{} starting...", env!("CARGO_PKG_VERSION"));
        eprintln!("📁 Saving to: {}", cli.output);
    }

    // Create progress bar manager; the total is set once the scan knows
    // how many assets the page references.
    let progress_manager = cli::ProgressManager::new(0, &format!("🌐 Downloading {}", cli.url));
    let pb = progress_manager.pb.clone();

    let options = DownloadOptions {
        progress: Some(std::sync::Arc::new(move |downloaded, total| {
            if pb.length().unwrap_or(0) != total {
                pb.set_length(total);
            }
            pb.set_position(downloaded);
        })),
        ..Default::default()
    };

    let filepath = page_loader::download_with_options(&cli.url, &cli.output, options)
        .await
        .with_context(|| format!("failed to download '{}'", cli.url))?;
    progress_manager.pb.finish_and_clear();

    println!("Page was downloaded as '{}'", filepath.display());

    Ok(())
}

//! CLI-specific progress handling for page-loader
//!
//! Provides the asset-download progress bar for the command-line
//! interface.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar over the asset count
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} assets ({elapsed})")
            .expect("Failed to create progress style")
            .progress_chars("#>-"),
    );
    pb
}

/// Progress manager for the asset download phase
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total: u64, message: &str) -> Self {
        let pb = create_progress_bar(total);

        // Print initial message to stderr
        eprintln!("{}", message);

        Self { pb }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_bar_template() {
        let pb = create_progress_bar(4);

        // Verify the progress bar is created successfully
        assert_eq!(pb.length().unwrap(), 4);

        // The template string must be valid; updating must not panic.
        pb.set_position(2);
        pb.finish();
    }

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(3, "Test download");
        assert_eq!(manager.pb.length().unwrap(), 3);
    }
}

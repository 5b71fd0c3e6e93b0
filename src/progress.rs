//! Progress bar helpers for batch operations

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar for per-file batch work, drawn to stderr
pub fn file_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

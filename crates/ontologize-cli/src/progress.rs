//! Progress indicators for downloads
//!
//! A byte progress bar when the server sends a content length, a spinner
//! otherwise. Both draw to stderr and hide themselves when it is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const DOWNLOAD_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} {bytes}";

/// Progress for a download, sized when the total is known
pub fn create_download_progress(size: Option<u64>, message: &str) -> ProgressBar {
    let pb = match size {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(DOWNLOAD_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        },
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        },
    };
    pb.set_message(message.to_string());
    pb
}

/// Format bytes into human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(35 * 1024 * 1024), "35.00 MB");
    }

    #[test]
    fn test_sized_and_unsized_progress() {
        let pb = create_download_progress(Some(2048), "Ontologizer.jar");
        assert_eq!(pb.length(), Some(2048));

        let spinner = create_download_progress(None, "gene_ontology_edit.obo");
        assert_eq!(spinner.length(), None);
        spinner.finish_and_clear();
    }
}

// Linguistic resource download.
//
// The sentiment scorer needs the VADER lexicon (~400 KB), fetched once from
// the vaderSentiment repository. Files live in a platform data directory
// (~/.local/share/folio/resources/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Where the VADER lexicon is published.
pub const DEFAULT_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/cjhutto/vaderSentiment/master/vaderSentiment/vader_lexicon.txt";

/// File name of the lexicon inside the resource directory.
pub const LEXICON_FILE: &str = "vader_lexicon.txt";

/// Returns the default directory for downloaded resources.
pub fn default_resource_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join("resources")
}

pub fn lexicon_path(dir: &Path) -> PathBuf {
    dir.join(LEXICON_FILE)
}

/// Check whether the sentiment lexicon has been downloaded.
pub fn lexicon_present(dir: &Path) -> bool {
    lexicon_path(dir).is_file()
}

/// Whether `ensure_present` fetched anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    AlreadyPresent,
    Downloaded,
}

/// Make sure every resource the pipeline needs is on disk.
///
/// Idempotent: an existing lexicon is left untouched and nothing is
/// fetched. Creates the resource directory as needed.
pub async fn ensure_present(dir: &Path, lexicon_url: &str) -> Result<ResourceStatus> {
    let dest = lexicon_path(dir);
    if lexicon_present(dir) {
        info!(path = %dest.display(), "Sentiment lexicon already present, skipping");
        return Ok(ResourceStatus::AlreadyPresent);
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create resource directory: {}", dir.display()))?;

    download_file(lexicon_url, &dest).await?;
    Ok(ResourceStatus::Downloaded)
}

/// Download a single file from a URL to a local path with a progress bar.
///
/// The body is written to a `.part` file first and renamed on success, so an
/// interrupted download never looks like a present resource.
async fn download_file(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        }
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;
    pb.set_position(bytes.len() as u64);

    let partial = dest.with_extension("part");
    std::fs::write(&partial, &bytes)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;

    pb.finish_and_clear();
    info!(url, path = %dest.display(), bytes = bytes.len(), "Downloaded resource");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resource_dir_is_under_folio() {
        let dir = default_resource_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains("folio") && path_str.contains("resources"),
            "Expected path containing folio/resources, got: {path_str}"
        );
    }

    #[test]
    fn test_lexicon_present_false_when_empty() {
        let dir = std::env::temp_dir().join("folio-test-nonexistent");
        assert!(!lexicon_present(&dir));
    }

    #[tokio::test]
    async fn test_ensure_present_skips_existing_lexicon() {
        let dir = std::env::temp_dir().join("folio-resources-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(lexicon_path(&dir), "good\t1.9\n").unwrap();

        // An unroutable URL proves nothing is fetched
        let status = ensure_present(&dir, "http://127.0.0.1:9/never").await.unwrap();
        assert_eq!(status, ResourceStatus::AlreadyPresent);
        assert!(lexicon_present(&dir));

        // Cleanup
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

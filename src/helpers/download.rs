//! SDK download
//!
//! Fetches the release zip, shows progress on stderr and unpacks it into
//! the target directory. Everything is staged in a temporary directory
//! beside the target and moved into place at the end, so a failed download
//! never leaves a half-populated SDK behind.

use super::extract;
use super::internal::fs_utils;
use super::internal::progress::{self, ProgressGuard};
use crate::core::config::{self, http_timeout};
use crate::core::error::{Result, SdkError};
use crate::core::output;
use std::io::{Read, Write};
use std::path::Path;

/// Top-level directory every SDK archive wraps its contents in.
pub const ARCHIVE_ROOT: &str = "google_appengine";

/// Download SDK `version` from the standard location into `directory`.
pub fn download_sdk(directory: &Path, version: &str) -> Result<()> {
    download_sdk_from(&config::download_url(version), directory)
}

/// Download an SDK archive from `url` into `directory`.
///
/// Fails with [`SdkError::AlreadyExists`] without touching the network if
/// `directory` already exists.
pub fn download_sdk_from(url: &str, directory: &Path) -> Result<()> {
    if directory.exists() {
        return Err(SdkError::AlreadyExists(directory.to_path_buf()));
    }

    let parent = fs_utils::ensure_parent_dir(directory)?;
    let staging = tempfile::Builder::new()
        .prefix(".gae-sdk-")
        .tempdir_in(&parent)?;

    output::action(&format!("Downloading App Engine SDK from {}", url));
    let archive = staging.path().join("sdk.zip");
    let total_bytes = download_with_progress(url, &archive)?;
    output::detail(&format!(
        "downloaded {:.2} MB",
        total_bytes as f64 / (1024.0 * 1024.0)
    ));

    output::detail(&format!("extracting to {}", directory.display()));
    let extracted = staging.path().join("extracted");
    std::fs::create_dir(&extracted)?;
    {
        let pb = progress::spinner("extracting");
        let _guard = ProgressGuard::new(&pb);
        extract::extract_zip(&archive, &extracted)?;
    }
    extract::strip_top_level(&extracted, ARCHIVE_ROOT, directory)?;

    output::success(&format!("App Engine SDK ready in {}", directory.display()));
    Ok(())
}

/// Stream `url` into `dest`, returning the number of bytes written.
fn download_with_progress(url: &str, dest: &Path) -> Result<u64> {
    let pb = progress::spinner("downloading");
    let _guard = ProgressGuard::new(&pb);

    let response = ureq::get(url)
        .timeout(http_timeout())
        .call()
        .map_err(|e| SdkError::http(url, e))?;

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        progress::track_bytes(&pb, len);
    }

    let mut file = std::fs::File::create(dest)?;
    let mut reader = response.into_reader();
    let mut buffer = [0u8; 65536];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }
    file.flush()?;

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_directory_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("appengine_sdk");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "mine").unwrap();

        // Unroutable URL: the existence check must short-circuit before any request.
        let err = download_sdk_from("http://127.0.0.1:9/never.zip", &target).unwrap_err();

        assert!(matches!(err, SdkError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "mine");
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 1);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("appengine_sdk");
        std::fs::write(&target, "not a dir").unwrap();

        let err = download_sdk(&target, "1.9.56").unwrap_err();

        assert!(matches!(err, SdkError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "not a dir");
    }

    #[test]
    fn test_connection_failure_leaves_no_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("appengine_sdk");

        let err = download_sdk_from("http://127.0.0.1:9/sdk.zip", &target).unwrap_err();

        assert!(matches!(err, SdkError::Http { .. }), "got: {err}");
        assert!(!target.exists());
        // staging directory removed as well
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Archive extraction
//!
//! The SDK ships as a zip whose entries all live under a single
//! `google_appengine/` directory. [`extract_zip`] unpacks it natively and
//! [`strip_top_level`] lifts the contents of that directory into the target.

use super::internal::fs_utils;
use crate::core::error::{Result, SdkError};
use std::fs::File;
use std::path::Path;

/// Extract a zip archive into `dest`.
///
/// Entries whose names would escape `dest` are skipped. Returns the number
/// of entries written.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        let Some(outpath) = file.enclosed_name().map(|p| dest.join(p)) else {
            continue;
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }
        written += 1;
    }

    Ok(written)
}

/// Move `extracted/<root>/*` into `target`, discarding `root` itself.
///
/// `target` must not exist yet. Other top-level entries next to `root` are
/// moved along with it. A missing `root`, or a sibling whose name is also
/// inside `root`, means the archive is not an SDK release; both are fatal
/// and leave `target` uncreated.
pub fn strip_top_level(extracted: &Path, root: &str, target: &Path) -> Result<()> {
    let inner = extracted.join(root);
    if !inner.is_dir() {
        return Err(SdkError::UnexpectedLayout(format!(
            "archive has no top-level {}/ directory",
            root
        )));
    }

    for entry in std::fs::read_dir(extracted)? {
        let name = entry?.file_name();
        if name != root && inner.join(&name).exists() {
            return Err(SdkError::UnexpectedLayout(format!(
                "{} clashes with {}/{}",
                name.to_string_lossy(),
                root,
                name.to_string_lossy()
            )));
        }
    }

    std::fs::rename(&inner, target)?;
    if let Err(e) = fs_utils::move_entries(extracted, target) {
        let _ = std::fs::remove_dir_all(target);
        return Err(e);
    }

    Ok(())
}

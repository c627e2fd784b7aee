//! SDK discovery
//!
//! Resolution is strictly ordered and stops at the first hit:
//!
//! 1. `$APPENGINE_SDK`, if it names an existing path
//! 2. `dev_appserver.py` on `$PATH` (plain SDK or Cloud SDK layout)
//! 3. the default directory, downloading into it when permitted

use crate::core::config::{Config, DEV_APPSERVER, GCLOUD, SDK_ENV_VAR};
use crate::core::error::{Result, SdkError};
use crate::core::host::Host;
use crate::core::output;
use crate::helpers::download;
use crate::sdk::version;
use std::path::{Path, PathBuf};

/// Where a resolved SDK came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    EnvVar,
    OnPath,
    DefaultDir,
    Downloaded,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EnvVar => "$APPENGINE_SDK",
            Self::OnPath => "dev_appserver.py on $PATH",
            Self::DefaultDir => "default directory",
            Self::Downloaded => "download",
        };
        f.write_str(s)
    }
}

/// A resolved SDK installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLocation {
    pub path: PathBuf,
    /// Release from the SDK's `VERSION` file, or the requested version.
    pub version: String,
    pub source: Source,
}

/// Remediation text shown when no strategy finds the SDK.
pub fn not_found_message(version: &str, default_dir: &Path) -> String {
    format!(
        "App Engine SDK not found!  Please do one of the following:\n\
         - Set ${SDK_ENV_VAR}\n\
         - Make sure `{DEV_APPSERVER}` on $PATH\n\
         - Download the SDK to {}: `gae-sdk download [--version {version}] [DIR]`",
        default_dir.display()
    )
}

pub struct Locator<'a, H: Host + ?Sized> {
    host: &'a H,
    config: &'a Config,
}

impl<'a, H: Host + ?Sized> Locator<'a, H> {
    pub fn new(host: &'a H, config: &'a Config) -> Self {
        Self { host, config }
    }

    /// Resolve the SDK or fail with [`SdkError::NotFound`].
    pub fn locate(&self) -> Result<SdkLocation> {
        self.find()?.ok_or_else(|| {
            SdkError::NotFound(not_found_message(
                &self.config.version,
                &self.config.default_dir,
            ))
        })
    }

    /// Resolve the SDK, returning `None` when every strategy comes up empty.
    pub fn find(&self) -> Result<Option<SdkLocation>> {
        let found = if let Some(path) = self.check_env_var() {
            Some((path, Source::EnvVar))
        } else if let Some(path) = self.check_path()? {
            Some((path, Source::OnPath))
        } else {
            self.check_default_dir()?
        };

        Ok(found.map(|(path, source)| {
            let version = version::read_release(&path)
                .unwrap_or_else(|| self.config.version.clone());
            SdkLocation {
                path,
                version,
                source,
            }
        }))
    }

    fn check_env_var(&self) -> Option<PathBuf> {
        let sdk_path = PathBuf::from(self.host.var(SDK_ENV_VAR)?);
        if !sdk_path.exists() {
            output::warning(&format!(
                "${} points to invalid location: {}",
                SDK_ENV_VAR,
                sdk_path.display()
            ));
            return None;
        }
        Some(sdk_path)
    }

    fn check_path(&self) -> Result<Option<PathBuf>> {
        let Some(das_path) = self.host.find_executable(DEV_APPSERVER) else {
            return Ok(None);
        };
        // Distribution packages symlink the script into /usr/bin.
        let das_path = std::fs::canonicalize(&das_path).unwrap_or(das_path);
        let Some(das_dir) = das_path.parent().map(Path::to_path_buf) else {
            return Ok(None);
        };

        let gcloud_path = das_dir.join(GCLOUD);
        if !gcloud_path.exists() {
            return Ok(Some(das_dir));
        }

        // Cloud SDK keeps the App Engine SDK away from its bin/ directory.
        let sdk_dir = das_dir
            .parent()
            .unwrap_or(&das_dir)
            .join("platform")
            .join("google_appengine");
        if !sdk_dir.exists() {
            output::warning(
                "found gcloud dev_appserver.py but gcloud is missing the App Engine SDK; \
                 running `gcloud components install app-engine-python`",
            );
            self.host.run(
                &gcloud_path,
                &["components", "install", "app-engine-python"],
            )?;
        }

        Ok(sdk_dir.exists().then_some(sdk_dir))
    }

    fn check_default_dir(&self) -> Result<Option<(PathBuf, Source)>> {
        let default_dir = &self.config.default_dir;
        if default_dir.exists() {
            return Ok(Some((default_dir.clone(), Source::DefaultDir)));
        }
        if !self.config.auto_download {
            return Ok(None);
        }

        download::download_sdk_from(&self.config.download_url(), default_dir)?;
        if !default_dir.exists() {
            return Err(SdkError::DownloadFailed(default_dir.clone()));
        }
        Ok(Some((default_dir.clone(), Source::Downloaded)))
    }
}

//! Wiring a resolved SDK into the import search path
//!
//! [`fix_paths`] is the single setup call. Its side effects are explicit:
//! it exports `APPENGINE_SDK` through the [`Host`], and it takes the
//! current [`SearchPath`] by value and hands back the fixed one inside the
//! returned [`SdkEnvironment`]. Running it again on its own output changes
//! nothing.

use crate::core::config::{Config, SDK_ENV_VAR};
use crate::core::error::{Result, SdkError};
use crate::core::host::Host;
use crate::core::output;
use crate::sdk::locate::{Locator, SdkLocation};
use crate::sdk::probe::{ProbeReport, SdkProbe};
use crate::sdk::search_path::{Position, SearchPath};
use std::path::{Path, PathBuf};

/// Package the SDK shares with other Google libraries.
pub const SHARED_NAMESPACE: &str = "google";

/// Result of a setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkEnvironment {
    pub location: SdkLocation,
    pub search_path: SearchPath,
    /// Whether the SDK's auxiliary paths were added by this run.
    pub sdk_paths_applied: bool,
}

/// Locate the SDK and wire it into `search_path`.
pub fn fix_paths<H, P>(
    config: &Config,
    host: &H,
    probe: &P,
    mut search_path: SearchPath,
) -> Result<SdkEnvironment>
where
    H: Host + ?Sized,
    P: SdkProbe + ?Sized,
{
    let location = Locator::new(host, config).locate()?;
    let sdk = location.path.clone();

    host.set_var(SDK_ENV_VAR, &sdk.to_string_lossy());

    let sdk_on_path = search_path.contains(&sdk);
    let already_fixed = search_path.contains(&sdk.join("lib").join("simplejson"));
    if sdk_on_path && already_fixed {
        return Ok(SdkEnvironment {
            location,
            search_path,
            sdk_paths_applied: false,
        });
    }

    // The interpreter also sees its site-packages, which `search_path` lacks.
    let report = with_preserved_cwd(|| probe.probe(&sdk))?;

    if !sdk_on_path {
        fixup_sdk_path(&mut search_path, &sdk, Position::Front, report.google_importable);
    }
    if !already_fixed {
        apply_sdk_paths(&mut search_path, report, config)?;
    }

    Ok(SdkEnvironment {
        location,
        search_path,
        sdk_paths_applied: !already_fixed,
    })
}

/// Put `sdk` on the search path at `position`.
///
/// Not every Google package is a namespace package, so a plain `google`
/// package earlier on the path would shadow the SDK's. When one is already
/// importable, either from `search_path` or (`google_installed`) from the
/// interpreter's own `sys.path`, the SDK's `google/` is registered as an
/// extension of it instead of relying on order alone.
///
/// Returns whether anything changed.
pub fn fixup_sdk_path(
    search_path: &mut SearchPath,
    sdk: &Path,
    position: Position,
    google_installed: bool,
) -> bool {
    let mut changed = false;
    if google_installed || search_path.find_package(SHARED_NAMESPACE).is_some() {
        changed |= search_path.extend_namespace(SHARED_NAMESPACE, sdk.join(SHARED_NAMESPACE));
    }
    changed | search_path.insert(position, sdk)
}

/// Add what the SDK itself asks for, the active vendor directory and `.`.
fn apply_sdk_paths(search_path: &mut SearchPath, report: ProbeReport, config: &Config) -> Result<()> {
    search_path.insert_all(Position::Index(1), report.script_paths);
    search_path.insert_all(Position::Index(1), report.sys_path_additions);

    if let Some(prefix) = &config.vendor_prefix {
        search_path.insert(
            Position::Front,
            vendor_dir(prefix, &config.python_version)?,
        );
    }

    search_path.insert(Position::Front, ".");
    Ok(())
}

/// Site directory of a Python prefix, as the SDK's `vendor.add` resolves it:
/// `<prefix>/lib/<pythonX.Y>/site-packages` when that exists, else `prefix`.
pub fn vendor_dir(prefix: &Path, python_version: &str) -> Result<PathBuf> {
    if !prefix.is_dir() {
        return Err(SdkError::Vendor(prefix.to_path_buf()));
    }
    let site = prefix.join("lib").join(python_version).join("site-packages");
    Ok(if site.is_dir() {
        site
    } else {
        prefix.to_path_buf()
    })
}

/// Run `f`, restoring the working directory if it moved.
///
/// Importing `dev_appserver` in-process chdirs into the SDK on some
/// releases.
pub fn with_preserved_cwd<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    let cwd = std::env::current_dir()?;
    let result = f();
    let now = std::env::current_dir().ok();
    if now.as_deref() != Some(cwd.as_path()) {
        output::warning(&format!(
            "SDK initialization changed the working directory; restoring {}",
            cwd.display()
        ));
        std::env::set_current_dir(&cwd)?;
    }
    result
}

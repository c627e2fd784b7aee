//! Configuration for SDK discovery and download
//!
//! Defaults mirror the layout most projects already use: the SDK lives in
//! `./appengine_sdk` and is fetched from Google's featured-release bucket.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Environment variable naming an SDK installation directory.
pub const SDK_ENV_VAR: &str = "APPENGINE_SDK";

/// Helper script shipped with the SDK, used to find it on `$PATH`.
pub const DEV_APPSERVER: &str = "dev_appserver.py";

/// Cloud SDK launcher; its presence next to `dev_appserver.py` means the
/// App Engine SDK lives under `platform/google_appengine`.
pub const GCLOUD: &str = "gcloud";

/// Default local cache directory.
pub const DEFAULT_DIR: &str = "./appengine_sdk";

/// SDK release fetched when no version is given.
pub const DEFAULT_VERSION: &str = "1.9.56";

/// Download location; `{version}` is replaced with the release string.
pub const DOWNLOAD_URL_FORMAT: &str =
    "https://storage.googleapis.com/appengine-sdks/featured/google_appengine_{version}.zip";

/// Python series the SDK runs under, used for vendor site directories.
pub const DEFAULT_PYTHON_VERSION: &str = "python2.7";

/// Default HTTP timeout in seconds (the archive is ~150 MB)
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Get HTTP timeout from environment variable or use default.
/// Cached, the env var is only read once.
pub fn http_timeout() -> Duration {
    static TIMEOUT: OnceLock<Duration> = OnceLock::new();
    *TIMEOUT.get_or_init(|| {
        let secs = std::env::var("GAE_SDK_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        Duration::from_secs(secs.clamp(5, 3600))
    })
}

/// Build the download URL for `version` from the standard template.
pub fn download_url(version: &str) -> String {
    format_url(DOWNLOAD_URL_FORMAT, version)
}

/// Substitute `version` into a URL template.
pub fn format_url(format: &str, version: &str) -> String {
    format.replace("{version}", version)
}

/// Settings for a single locate/fix run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Local directory checked last, and downloaded into when permitted.
    pub default_dir: PathBuf,
    /// SDK release to download.
    pub version: String,
    /// Download into `default_dir` when no SDK is found.
    pub auto_download: bool,
    /// Download URL template containing `{version}`.
    pub url_format: String,
    /// Python prefix whose site directory is vendored in front of the path.
    pub vendor_prefix: Option<PathBuf>,
    /// `pythonX.Y` component of the vendor site directory.
    pub python_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from(DEFAULT_DIR),
            version: DEFAULT_VERSION.to_string(),
            auto_download: false,
            url_format: DOWNLOAD_URL_FORMAT.to_string(),
            vendor_prefix: None,
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
        }
    }
}

impl Config {
    pub fn download_url(&self) -> String {
        format_url(&self.url_format, &self.version)
    }
}

//! Locate or download the App Engine Python SDK and wire it into the import
//! search path.
//!
//! # Resolution order
//!
//! 1. `$APPENGINE_SDK`, if it names an existing path (an invalid value is
//!    only a warning)
//! 2. `dev_appserver.py` on `$PATH`, including the Cloud SDK layout where the
//!    SDK lives under `platform/google_appengine`
//! 3. `./appengine_sdk`, downloaded on demand when auto-download is enabled
//!
//! # Example
//!
//! ```no_run
//! use gae_sdk_path::{Config, PythonProbe, SearchPath, SystemHost, fix_paths};
//!
//! # fn main() -> Result<(), gae_sdk_path::SdkError> {
//! let config = Config { auto_download: true, ..Config::default() };
//! let probe = PythonProbe::discover(&SystemHost)?;
//! let env = fix_paths(&config, &SystemHost, &probe, SearchPath::new())?;
//! println!("SDK {} at {}", env.location.version, env.location.path.display());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod helpers;
pub mod sdk;

pub use crate::core::config::{self, Config};
pub use crate::core::error::SdkError;
pub use crate::core::host::{Host, SystemHost};
pub use crate::core::output;
pub use helpers::download::{download_sdk, download_sdk_from};
pub use sdk::{
    Locator, Position, ProbeReport, PythonProbe, SdkEnvironment, SdkLocation, SdkProbe,
    SearchPath, Source, fix_paths, fixup_sdk_path,
};

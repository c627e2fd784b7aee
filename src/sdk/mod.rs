//! SDK discovery and search path wiring

pub mod fixer;
pub mod locate;
pub mod probe;
pub mod search_path;
pub mod version;

pub use fixer::{SdkEnvironment, fix_paths, fixup_sdk_path};
pub use locate::{Locator, SdkLocation, Source};
pub use probe::{ProbeReport, PythonProbe, SdkProbe};
pub use search_path::{Position, SearchPath};

//! Asking the SDK for its own search path additions
//!
//! `dev_appserver.py` knows which bundled libraries (cherrypy, portpicker,
//! the vendored `lib/*` packages, ...) need to be importable. The only
//! reliable way to learn that list is to import the SDK and ask it, so the
//! default [`PythonProbe`] runs a Python interpreter against the SDK and
//! reads back a JSON report.

use crate::core::error::{Result, SdkError};
use crate::core::host::Host;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Interpreters tried, in order, when `GAE_SDK_PYTHON` is unset.
pub const PYTHON_CANDIDATES: &[&str] = &["python2.7", "python2", "python"];

const PROBE_SCRIPT: &str = r#"
import json, os, sys
sdk = sys.argv[1]
try:
    import google
    google.__path__.append(os.path.join(sdk, 'google'))
    google_importable = True
except ImportError:
    google_importable = False
sys.path.insert(0, sdk)
import dev_appserver
script_paths = dev_appserver._PATHS.script_paths('dev_appserver.py')
before = list(sys.path)
dev_appserver.fix_sys_path()
added = [p for p in sys.path if p not in before and p not in script_paths]
sys.stdout.write(json.dumps({'script_paths': script_paths, 'sys_path_additions': added,
                            'google_importable': google_importable}))
"#;

/// Paths the SDK wants on the import search path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProbeReport {
    /// Extra directories for the `dev_appserver.py` script itself.
    pub script_paths: Vec<PathBuf>,
    /// Entries added by the SDK's own `fix_sys_path()`.
    #[serde(default)]
    pub sys_path_additions: Vec<PathBuf>,
    /// Whether `google` was importable from the interpreter's own `sys.path`
    /// before the SDK was added.
    #[serde(default)]
    pub google_importable: bool,
}

pub trait SdkProbe {
    fn probe(&self, sdk: &Path) -> Result<ProbeReport>;
}

/// Probe that imports `dev_appserver` in a Python subprocess.
#[derive(Debug, Clone)]
pub struct PythonProbe {
    interpreter: PathBuf,
}

impl PythonProbe {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Use `$GAE_SDK_PYTHON`, or the first Python 2 interpreter on `$PATH`.
    pub fn discover<H: Host + ?Sized>(host: &H) -> Result<Self> {
        if let Some(python) = host.var("GAE_SDK_PYTHON") {
            return Ok(Self::new(python));
        }
        PYTHON_CANDIDATES
            .iter()
            .find_map(|candidate| host.find_executable(candidate))
            .map(Self::new)
            .ok_or_else(|| {
                SdkError::Probe(format!(
                    "no Python interpreter found (tried {}); set GAE_SDK_PYTHON",
                    PYTHON_CANDIDATES.join(", ")
                ))
            })
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }
}

impl SdkProbe for PythonProbe {
    fn probe(&self, sdk: &Path) -> Result<ProbeReport> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .arg(sdk)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SdkError::Probe(format!(
                "{} exited with {}: {}",
                self.interpreter.display(),
                output.status,
                stderr.trim()
            )));
        }

        parse_report(&output.stdout)
    }
}

/// Decode the JSON report printed by the probe script.
pub fn parse_report(stdout: &[u8]) -> Result<ProbeReport> {
    serde_json::from_slice(stdout)
        .map_err(|e| SdkError::Probe(format!("unreadable probe output: {}", e)))
}

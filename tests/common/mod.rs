//! Shared test utilities: a scriptable host, a canned probe and SDK fixtures.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use gae_sdk_path::core::error::Result;
use gae_sdk_path::{Host, ProbeReport, SdkError, SdkProbe};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

type RunHook = Box<dyn Fn(&Path, &[&str]) -> Result<()>>;

/// In-memory stand-in for the process environment.
#[derive(Default)]
pub struct FakeHost {
    vars: RefCell<HashMap<String, String>>,
    executables: HashMap<String, PathBuf>,
    runs: RefCell<Vec<String>>,
    on_run: Option<RunHook>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(self, name: &str, value: impl AsRef<Path>) -> Self {
        self.vars.borrow_mut().insert(
            name.to_string(),
            value.as_ref().to_string_lossy().into_owned(),
        );
        self
    }

    pub fn with_executable(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.executables.insert(name.to_string(), path.into());
        self
    }

    pub fn on_run(mut self, hook: impl Fn(&Path, &[&str]) -> Result<()> + 'static) -> Self {
        self.on_run = Some(Box::new(hook));
        self
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.borrow().get(name).cloned()
    }

    pub fn runs(&self) -> Vec<String> {
        self.runs.borrow().clone()
    }
}

impl Host for FakeHost {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name)
    }

    fn set_var(&self, name: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        self.executables.get(name).cloned()
    }

    fn run(&self, program: &Path, args: &[&str]) -> Result<()> {
        self.runs
            .borrow_mut()
            .push(format!("{} {}", program.display(), args.join(" ")));
        match &self.on_run {
            Some(hook) => hook(program, args),
            None => Ok(()),
        }
    }
}

/// Probe returning a fixed report and counting invocations.
pub struct FakeProbe {
    pub report: ProbeReport,
    pub calls: RefCell<usize>,
    /// Directory to chdir into while probing, like the real SDK import does.
    pub chdir_to: Option<PathBuf>,
}

impl FakeProbe {
    pub fn new(report: ProbeReport) -> Self {
        Self {
            report,
            calls: RefCell::new(0),
            chdir_to: None,
        }
    }

    /// Report the usual auxiliary directories of an SDK at `sdk`.
    pub fn for_sdk(sdk: &Path) -> Self {
        Self::new(ProbeReport {
            script_paths: vec![sdk.join("lib/cherrypy"), sdk.join("lib/portpicker")],
            sys_path_additions: vec![sdk.join("lib/simplejson"), sdk.join("lib/yaml-3.10/lib")],
            google_importable: false,
        })
    }

    /// Like [`FakeProbe::for_sdk`], with `google` installed in the
    /// interpreter's site-packages.
    pub fn with_installed_google(sdk: &Path) -> Self {
        let mut fake = Self::for_sdk(sdk);
        fake.report.google_importable = true;
        fake
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl SdkProbe for FakeProbe {
    fn probe(&self, _sdk: &Path) -> Result<ProbeReport> {
        *self.calls.borrow_mut() += 1;
        if let Some(dir) = &self.chdir_to {
            std::env::set_current_dir(dir).map_err(SdkError::Io)?;
        }
        Ok(self.report.clone())
    }
}

//! Access to process-global state
//!
//! Locating and wiring in the SDK reads environment variables, searches
//! `$PATH`, runs installer commands and exports `APPENGINE_SDK`. All of that
//! goes through [`Host`] so callers see the side effects and tests can fake
//! each source independently.

use super::error::{Result, SdkError};
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Host {
    /// Read an environment variable.
    fn var(&self, name: &str) -> Option<String>;

    /// Set an environment variable for this process (and its children).
    fn set_var(&self, name: &str, value: &str);

    /// Find an executable on `$PATH`.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Run a command to completion, failing on a non-zero exit.
    ///
    /// The command's stdout is sent to our stderr; stdout carries only
    /// what `locate` and `env` print.
    fn run(&self, program: &Path, args: &[&str]) -> Result<()>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set_var(&self, name: &str, value: &str) {
        // SAFETY: setup runs once at startup, before any other thread that
        // could read the environment is spawned.
        unsafe { std::env::set_var(name, value) };
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn run(&self, program: &Path, args: &[&str]) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .stdout(std::io::stderr())
            .status()?;
        if !status.success() {
            return Err(SdkError::CommandFailed {
                cmd: format!("{} {}", program.display(), args.join(" ")),
                code: status.code(),
            });
        }
        Ok(())
    }
}

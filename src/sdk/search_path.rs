//! Import search path model
//!
//! [`SearchPath`] is the ordered list of directories the Python interpreter
//! consults when resolving imports, plus namespace extensions: extra
//! directories appended to an already-importable package's `__path__`.
//! All insertions are idempotent.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Where to insert an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Front,
    /// Clamped to the current length.
    Index(usize),
    Back,
}

/// Extra directories for a package that is already importable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceExtension {
    pub package: String,
    pub dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
    namespaces: Vec<NamespaceExtension>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `PYTHONPATH`-style list, dropping empty components.
    pub fn from_env_value(value: &std::ffi::OsStr) -> Self {
        let mut path = Self::new();
        for entry in std::env::split_paths(value) {
            if !entry.as_os_str().is_empty() {
                path.insert(Position::Back, entry);
            }
        }
        path
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn namespaces(&self) -> &[NamespaceExtension] {
        &self.namespaces
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e == path)
    }

    /// Insert `path` at `position` unless it is already present.
    ///
    /// Returns whether the path was inserted.
    pub fn insert(&mut self, position: Position, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        let index = match position {
            Position::Front => 0,
            Position::Index(i) => i.min(self.entries.len()),
            Position::Back => self.entries.len(),
        };
        self.entries.insert(index, path);
        true
    }

    /// Insert several paths as a block starting at `position`, keeping
    /// their relative order. Paths already present are skipped.
    ///
    /// Returns how many were inserted.
    pub fn insert_all<I, P>(&mut self, position: Position, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut index = match position {
            Position::Front => 0,
            Position::Index(i) => i.min(self.entries.len()),
            Position::Back => self.entries.len(),
        };
        let mut inserted = 0;
        for path in paths {
            if self.insert(Position::Index(index), path) {
                index += 1;
                inserted += 1;
            }
        }
        inserted
    }

    /// First entry containing a `package` directory, i.e. the location a
    /// plain `import package` would resolve to.
    pub fn find_package(&self, package: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.join(package).is_dir())
            .map(PathBuf::as_path)
    }

    /// Append `dir` to the `__path__` of `package`.
    ///
    /// Registering the same directory twice is a no-op. Returns whether the
    /// directory was added.
    pub fn extend_namespace(&mut self, package: &str, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        match self.namespaces.iter_mut().find(|n| n.package == package) {
            Some(ns) if ns.dirs.contains(&dir) => false,
            Some(ns) => {
                ns.dirs.push(dir);
                true
            }
            None => {
                self.namespaces.push(NamespaceExtension {
                    package: package.to_string(),
                    dirs: vec![dir],
                });
                true
            }
        }
    }

    /// Join the entries into a `PYTHONPATH` value.
    pub fn to_env_value(&self) -> Result<OsString, std::env::JoinPathsError> {
        std::env::join_paths(&self.entries)
    }

    /// Render namespace extensions as `.pth` lines.
    ///
    /// `site` executes `.pth` lines starting with `import` at interpreter
    /// startup, after `PYTHONPATH` is in place.
    pub fn pth_lines(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .flat_map(|ns| {
                ns.dirs.iter().map(move |dir| {
                    format!(
                        "import {pkg}; {pkg}.__path__.append({dir})",
                        pkg = ns.package,
                        dir = python_str(&dir.to_string_lossy())
                    )
                })
            })
            .collect()
    }
}

/// Quote `s` as a Python string literal.
fn python_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(sp: &SearchPath) -> Vec<&str> {
        sp.entries().iter().map(|p| p.to_str().unwrap()).collect()
    }

    #[test]
    fn test_insert_positions() {
        let mut sp = SearchPath::new();
        assert!(sp.insert(Position::Back, "/b"));
        assert!(sp.insert(Position::Front, "/a"));
        assert!(sp.insert(Position::Back, "/d"));
        assert!(sp.insert(Position::Index(2), "/c"));
        assert!(sp.insert(Position::Index(99), "/e"));
        assert_eq!(paths(&sp), ["/a", "/b", "/c", "/d", "/e"]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut sp = SearchPath::new();
        sp.insert(Position::Back, "/a");
        sp.insert(Position::Back, "/b");
        assert!(!sp.insert(Position::Front, "/b"));
        assert_eq!(paths(&sp), ["/a", "/b"]);
    }

    #[test]
    fn test_insert_all_keeps_block_order() {
        let mut sp = SearchPath::new();
        sp.insert(Position::Back, "/sdk");
        sp.insert(Position::Back, "/site");
        let n = sp.insert_all(Position::Index(1), ["/x", "/site", "/y"]);
        assert_eq!(n, 2);
        assert_eq!(paths(&sp), ["/sdk", "/x", "/y", "/site"]);
    }

    #[test]
    fn test_from_env_value_skips_empty() {
        let value = std::env::join_paths(["/a", "", "/b", "/a"]).unwrap();
        let sp = SearchPath::from_env_value(&value);
        assert_eq!(paths(&sp), ["/a", "/b"]);
        assert_eq!(sp.to_env_value().unwrap(), std::env::join_paths(["/a", "/b"]).unwrap());
    }

    #[test]
    fn test_extend_namespace_once() {
        let mut sp = SearchPath::new();
        assert!(sp.extend_namespace("google", "/sdk/google"));
        assert!(!sp.extend_namespace("google", "/sdk/google"));
        assert!(sp.extend_namespace("google", "/other/google"));
        assert_eq!(sp.namespaces().len(), 1);
        assert_eq!(sp.namespaces()[0].dirs.len(), 2);
    }

    #[test]
    fn test_find_package() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site");
        std::fs::create_dir_all(site.join("google")).unwrap();

        let mut sp = SearchPath::new();
        sp.insert(Position::Back, dir.path().join("empty"));
        sp.insert(Position::Back, &site);

        assert_eq!(sp.find_package("google"), Some(site.as_path()));
        assert_eq!(sp.find_package("yaml"), None);
    }

    #[test]
    fn test_pth_lines_quote_paths() {
        let mut sp = SearchPath::new();
        sp.extend_namespace("google", "/it's/google");
        assert_eq!(
            sp.pth_lines(),
            ["import google; google.__path__.append('/it\\'s/google')"]
        );
    }
}

//! Test fixtures - fake SDK trees and release archives.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

/// Files every fake SDK contains, relative to the SDK root.
pub const SDK_FILES: &[(&str, &str)] = &[
    ("VERSION", "release: \"1.9.56\"\ntimestamp: 1495054423\napi_versions: ['1']\n"),
    ("dev_appserver.py", "#!/usr/bin/env python\n"),
    ("google/__init__.py", ""),
    ("google/appengine/__init__.py", ""),
    ("lib/simplejson/simplejson/__init__.py", ""),
];

/// Create a fake SDK at `root` and return it.
pub fn make_sdk_dir(root: &Path) -> PathBuf {
    for (name, content) in SDK_FILES {
        let path = root.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    root.to_path_buf()
}

/// Build an SDK release zip in memory, with everything under `google_appengine/`.
pub fn sdk_zip() -> Vec<u8> {
    let entries: Vec<(String, &str)> = SDK_FILES
        .iter()
        .map(|(name, content)| (format!("google_appengine/{}", name), *content))
        .collect();
    zip_bytes(&entries)
}

/// Build a zip in memory from `(name, content)` pairs.
pub fn zip_bytes<S: AsRef<str>>(entries: &[(S, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(name.as_ref(), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

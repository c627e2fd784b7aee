//! Internal utilities shared by the download and extract helpers.

pub mod fs_utils;
pub mod progress;

//! Download and extraction helpers
//!
//! - **download**: fetch an SDK release zip with a progress bar
//! - **extract**: unpack a zip and drop its redundant top-level directory

pub(crate) mod internal;

pub mod download;
pub mod extract;

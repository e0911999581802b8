//! kiwix-ci - continuous-integration driver for kiwix-build
//!
//! This crate decides what kiwix-build has to build for a CI platform and
//! event, keeps the dependency cache on the remote CI host up to date, and
//! packages the resulting binaries for download.

pub mod core;
pub mod ops;
pub mod util;

/// Fixtures for kiwix-ci unit tests.
///
/// This module is only available when compiling with `--cfg test`. It builds
/// contexts rooted in temporary home directories and fake build trees.
#[cfg(test)]
pub mod test_support;

pub use core::{resolve_targets, PlatformId, Target};
pub use util::context::{CiContext, CiOptions};

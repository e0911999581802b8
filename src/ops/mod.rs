//! High-level operations.
//!
//! This module contains the phases of a CI run and the commands built on them.

pub mod ci_run;
pub mod deps_archive;
pub mod fetch;
pub mod kiwix_build;
pub mod make_archive;
pub mod manifest;
pub mod publish;
pub mod transfer;

pub use ci_run::{run, RunSummary};
pub use deps_archive::{
    base_deps_archive_name, collect_deps_inputs, deps_archive_name, make_deps_archive,
    reset_install_marker, DepsInputs,
};
pub use fetch::{extract_tarball, fetch_base_deps, FetchOutcome};
pub use kiwix_build::{kiwix_build_command, run_kiwix_build, BuildFlags};
pub use make_archive::{archive_name, make_archive, write_binary_archive};
pub use manifest::{manifest_text, write_manifest};
pub use publish::{copy_android_apks, copy_dist_tarballs, publish_artifacts};
pub use transfer::{remote_path, scp, scp_command};

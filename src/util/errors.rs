//! Error types for CI operations.
//!
//! Most functions return `anyhow::Result` and attach context as they go;
//! these variants are the failures callers need to tell apart.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiError {
    /// An external tool ran and exited unsuccessfully.
    #[error("`{command}` failed with exit code {code:?}")]
    SubprocessFailed { command: String, code: Option<i32> },

    /// An external tool could not be found.
    #[error("`{program}` not found in PATH")]
    ToolNotFound { program: String },

    /// A file a previous step should have produced is missing.
    #[error("expected artifact is missing: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// The project has no entry in the binary manifest.
    #[error("project `{project}` does not ship binaries")]
    NotPackaged { project: String },

    /// The project has no released version.
    #[error("project `{project}` has no release version")]
    NoReleaseVersion { project: String },

    /// Uploads need the CI ssh key.
    #[error("no ssh key configured (set TRAVIS_BUILD_DIR or `remote.ssh_key`)")]
    NoSshKey,
}

//! Platform identifiers.
//!
//! A platform is the `--target-platform` value handed to kiwix-build
//! (`native_dyn`, `win32_static`, `android_arm`, `iOS_arm64`, ...). It
//! decides the build directory layout, which targets are eligible, and which
//! public archives a run produces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::target::Target;

/// Prefix shared by all Android platforms.
pub const MOBILE_PREFIX: &str = "android";

/// Prefix shared by all iOS platforms.
pub const APPLE_FRAMEWORK_PREFIX: &str = "iOS";

/// Prefix shared by all host platforms.
pub const NATIVE_PREFIX: &str = "native_";

/// The only platform that produces release source distributions.
pub const DIST_PLATFORM: &str = "native_dyn";

/// A kiwix-build target platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(name: impl Into<String>) -> Self {
        PlatformId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    pub fn is_mobile(&self) -> bool {
        self.has_prefix(MOBILE_PREFIX)
    }

    pub fn is_apple_framework(&self) -> bool {
        self.has_prefix(APPLE_FRAMEWORK_PREFIX)
    }

    pub fn is_native(&self) -> bool {
        self.has_prefix(NATIVE_PREFIX)
    }

    /// Whether release runs on this platform also publish source tarballs.
    pub fn makes_dist(&self) -> bool {
        self.0 == DIST_PLATFORM
    }

    /// The binary archives this platform publishes once everything is built.
    pub fn public_archives(&self) -> Option<&'static PublicArchives> {
        PUBLIC_ARCHIVES.iter().find(|a| a.platform == self.0)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(name: &str) -> Self {
        PlatformId::new(name)
    }
}

/// Binary archives published for one build platform.
#[derive(Debug)]
pub struct PublicArchives {
    /// The kiwix-build platform.
    pub platform: &'static str,
    /// Platform name used inside archive file names.
    pub archive_platform: &'static str,
    /// Projects packaged, in order.
    pub projects: &'static [Target],
}

const PUBLIC_ARCHIVES: &[PublicArchives] = &[
    PublicArchives {
        platform: "native_static",
        archive_platform: "linux64",
        projects: &[Target::KiwixTools, Target::ZimTools, Target::Zimwriterfs],
    },
    PublicArchives {
        platform: "win32_static",
        archive_platform: "win32",
        projects: &[Target::KiwixTools],
    },
    PublicArchives {
        platform: "armhf_static",
        archive_platform: "armhf",
        projects: &[Target::KiwixTools],
    },
    PublicArchives {
        platform: "i586_static",
        archive_platform: "i586",
        projects: &[Target::KiwixTools],
    },
];

/// Container format of a binary archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Deflate-compressed zip with flat `.exe` entries.
    Zip,
    /// Gzip-compressed tar with entries under a self-named directory.
    TarGz,
}

impl ArchiveFormat {
    /// Pick the container for an archive platform name (`win32`, `linux64`, ...).
    pub fn for_archive_platform(name: &str) -> Self {
        if name == "win32" {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::TarGz => ".tar.gz",
        }
    }

    /// File name of a binary inside the archive.
    pub fn binary_file_name(&self, binary: &str) -> String {
        match self {
            ArchiveFormat::Zip => format!("{}.exe", binary),
            ArchiveFormat::TarGz => binary.to_string(),
        }
    }
}

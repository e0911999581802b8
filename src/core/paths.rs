//! Well-known directories of a CI run.
//!
//! Everything lives under the home directory of the CI user:
//!
//! ```text
//! ~/BUILD_<platform>/            build root (INSTALL/, per-project build dirs)
//! ~/SOURCE/                      extracted sources
//! ~/ARCHIVE/                     downloaded source archives
//! ~/TOOLCHAINS/                  cross-compilation toolchains
//! ~/NIGHTLY_{KIWIX,ZIM}_ARCHIVES/<date>/
//! ~/RELEASE_{KIWIX,ZIM}_ARCHIVES/<project>/
//! ~/DIST_{KIWIX,ZIM}_ARCHIVES/<project>/
//! ```

use std::path::{Path, PathBuf};

use crate::core::destination::{ArchiveDestination, ArchiveFamily, Channel};
use crate::core::platform::PlatformId;
use crate::core::target::Target;

/// Marker written by kiwix-build once system packages are installed.
pub const INSTALL_PACKAGES_MARKER: &str = ".install_packages_ok";

/// Cross-compilation configuration written by kiwix-build.
pub const CROSS_FILE: &str = "meson_cross_file.txt";

/// Manifest file describing a dependency archive.
pub const MANIFEST_FILE: &str = "manifest.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    home: PathBuf,
    base_dir: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>, platform: &PlatformId) -> Self {
        let home = home.into();
        let base_dir = home.join(format!("BUILD_{}", platform));
        Paths { home, base_dir }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Build root of the platform (`~/BUILD_<platform>`).
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn source_dir(&self) -> PathBuf {
        self.home.join("SOURCE")
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.home.join("ARCHIVE")
    }

    pub fn toolchains_dir(&self) -> PathBuf {
        self.home.join("TOOLCHAINS")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.base_dir.join("INSTALL")
    }

    /// Where kiwix-build installs binaries.
    pub fn bin_dir(&self) -> PathBuf {
        self.install_dir().join("bin")
    }

    pub fn install_marker(&self) -> PathBuf {
        self.base_dir.join(INSTALL_PACKAGES_MARKER)
    }

    pub fn cross_file(&self) -> PathBuf {
        self.base_dir.join(CROSS_FILE)
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.base_dir.join(MANIFEST_FILE)
    }

    /// Per-project build directory (`~/BUILD_<platform>/<target>`).
    pub fn project_build_dir(&self, target: Target) -> PathBuf {
        self.base_dir.join(target.name())
    }

    pub fn nightly_root(&self, family: ArchiveFamily) -> PathBuf {
        self.home.join(format!("NIGHTLY_{}_ARCHIVES", family.dir_tag()))
    }

    pub fn release_root(&self, family: ArchiveFamily) -> PathBuf {
        self.home.join(format!("RELEASE_{}_ARCHIVES", family.dir_tag()))
    }

    pub fn dist_root(&self, family: ArchiveFamily) -> PathBuf {
        self.home.join(format!("DIST_{}_ARCHIVES", family.dir_tag()))
    }

    /// Nightly directory of a family for one date.
    pub fn nightly_dir(&self, family: ArchiveFamily, nightly_date: &str) -> PathBuf {
        self.nightly_root(family).join(nightly_date)
    }

    /// Concrete directory for a destination.
    ///
    /// Release archives are grouped per project, nightly ones per date.
    pub fn destination_dir(
        &self,
        dest: ArchiveDestination,
        project: Target,
        nightly_date: &str,
    ) -> PathBuf {
        match dest.channel {
            Channel::Release => self.release_root(dest.family).join(project.name()),
            Channel::Nightly => self.nightly_dir(dest.family, nightly_date),
        }
    }

    /// Archive roots created at the start of every run.
    pub fn archive_roots(&self, nightly_date: &str) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        for family in [ArchiveFamily::Kiwix, ArchiveFamily::Zim] {
            roots.push(self.nightly_dir(family, nightly_date));
            roots.push(self.release_root(family));
            roots.push(self.dist_root(family));
        }
        roots
    }
}

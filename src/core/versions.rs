//! Versions of the projects and dependencies built by kiwix-build.

use crate::core::target::Target;

/// Version of the whole base dependency set.
///
/// Bump this whenever a base dependency version changes: it is part of the
/// cached bundle name, so older bundles stop being fetched.
pub const BASE_DEPS_META_VERSION: &str = "10";

/// pugixml is kept as an unpacked source tree in both the source and build roots.
pub const PUGIXML_VERSION: &str = "1.2";

/// Released version of a main project.
///
/// kiwix-lib is released under the libkiwix version. `None` for targets that
/// have no release tracked here: the base dependencies, zimwriterfs, and the
/// Android app which follows its own release process.
pub fn main_project_version(target: Target) -> Option<&'static str> {
    match target {
        Target::Libzim => Some("9.2.3"),
        Target::KiwixLib => Some("14.0.0"),
        Target::KiwixTools => Some("3.7.0"),
        Target::ZimTools => Some("3.5.0"),
        Target::Zimwriterfs | Target::AllDependencies | Target::KiwixAndroid => None,
    }
}

/// Directory name of the pugixml source tree.
pub fn pugixml_dir_name() -> String {
    format!("pugixml-{}", PUGIXML_VERSION)
}

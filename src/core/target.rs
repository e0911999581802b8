//! Build targets - the projects kiwix-build knows how to build.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A project buildable by kiwix-build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Every base dependency, used to bootstrap the dependency cache.
    #[serde(rename = "alldependencies")]
    AllDependencies,
    #[serde(rename = "libzim")]
    Libzim,
    #[serde(rename = "kiwix-lib")]
    KiwixLib,
    #[serde(rename = "kiwix-tools")]
    KiwixTools,
    #[serde(rename = "zim-tools")]
    ZimTools,
    #[serde(rename = "zimwriterfs")]
    Zimwriterfs,
    #[serde(rename = "kiwix-android")]
    KiwixAndroid,
}

impl Target {
    pub const ALL: [Target; 7] = [
        Target::AllDependencies,
        Target::Libzim,
        Target::KiwixLib,
        Target::KiwixTools,
        Target::ZimTools,
        Target::Zimwriterfs,
        Target::KiwixAndroid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Target::AllDependencies => "alldependencies",
            Target::Libzim => "libzim",
            Target::KiwixLib => "kiwix-lib",
            Target::KiwixTools => "kiwix-tools",
            Target::ZimTools => "zim-tools",
            Target::Zimwriterfs => "zimwriterfs",
            Target::KiwixAndroid => "kiwix-android",
        }
    }

    /// Binaries installed by this project, if it ships any.
    ///
    /// This is the closed table of projects that can be packaged as binary
    /// archives.
    pub fn binaries(&self) -> Option<&'static [&'static str]> {
        match self {
            Target::KiwixTools => Some(&[
                "kiwix-install",
                "kiwix-manage",
                "kiwix-read",
                "kiwix-search",
                "kiwix-serve",
            ]),
            Target::ZimTools => Some(&[
                "zimbench",
                "zimdump",
                "zimsearch",
                "zimdiff",
                "zimpatch",
                "zimsplit",
            ]),
            Target::Zimwriterfs => Some(&["zimwriterfs"]),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown target '{}'; expected one of: {}",
                    s,
                    Target::ALL.map(|t| t.name()).join(", ")
                )
            })
    }
}

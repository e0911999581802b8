//! Where published binary archives go.

use std::fmt;

use crate::core::target::Target;

/// Artifact family an archive is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFamily {
    Kiwix,
    Zim,
}

impl ArchiveFamily {
    /// The family a target's archives belong to.
    pub fn of(target: Target) -> Self {
        match target {
            Target::KiwixLib | Target::KiwixTools => ArchiveFamily::Kiwix,
            _ => ArchiveFamily::Zim,
        }
    }

    /// Upper-case tag used in directory names (`KIWIX`, `ZIM`).
    pub fn dir_tag(&self) -> &'static str {
        match self {
            ArchiveFamily::Kiwix => "KIWIX",
            ArchiveFamily::Zim => "ZIM",
        }
    }
}

impl fmt::Display for ArchiveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFamily::Kiwix => f.write_str("kiwix"),
            ArchiveFamily::Zim => f.write_str("zim"),
        }
    }
}

/// Release or nightly publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Release,
    Nightly,
}

impl Channel {
    pub fn from_release(is_release: bool) -> Self {
        if is_release {
            Channel::Release
        } else {
            Channel::Nightly
        }
    }
}

/// One of the fixed output directories for binary archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchiveDestination {
    pub family: ArchiveFamily,
    pub channel: Channel,
}

/// Map a target to its archive destination.
///
/// Depends only on the target identity and the release flag, never on what
/// the build produced.
pub fn destination_for(target: Target, is_release: bool) -> ArchiveDestination {
    ArchiveDestination {
        family: ArchiveFamily::of(target),
        channel: Channel::from_release(is_release),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert_eq!(ArchiveFamily::of(Target::KiwixLib), ArchiveFamily::Kiwix);
        assert_eq!(ArchiveFamily::of(Target::KiwixTools), ArchiveFamily::Kiwix);
        assert_eq!(ArchiveFamily::of(Target::ZimTools), ArchiveFamily::Zim);
        assert_eq!(ArchiveFamily::of(Target::Zimwriterfs), ArchiveFamily::Zim);
        assert_eq!(ArchiveFamily::of(Target::Libzim), ArchiveFamily::Zim);
    }

    #[test]
    fn test_channel_follows_release_flag() {
        for target in Target::ALL {
            assert_eq!(destination_for(target, true).channel, Channel::Release);
            assert_eq!(destination_for(target, false).channel, Channel::Nightly);
            assert_eq!(
                destination_for(target, true).family,
                destination_for(target, false).family
            );
        }
    }
}

//! Core data structures for kiwix-ci.
//!
//! Everything here is pure: platform and event classification, the target
//! dispatch table, archive destinations and the directory layout. Nothing in
//! this module touches the filesystem or spawns processes.

pub mod destination;
pub mod event;
pub mod paths;
pub mod platform;
pub mod resolve;
pub mod target;
pub mod versions;

pub use destination::{destination_for, ArchiveDestination, ArchiveFamily, Channel};
pub use event::{is_release_tag, EventContext, EventType};
pub use paths::Paths;
pub use platform::{ArchiveFormat, PlatformId};
pub use resolve::resolve_targets;
pub use target::Target;

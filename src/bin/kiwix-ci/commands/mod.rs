//! Command implementations

pub mod archive;
pub mod deps_archive;
pub mod run;
pub mod targets;

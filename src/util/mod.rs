//! Shared utilities

pub mod config;
pub mod context;
pub mod errors;
pub mod fs;
pub mod process;
pub mod shell;

pub use config::Settings;
pub use context::{CiContext, CiOptions};
pub use errors::CiError;
pub use process::ProcessBuilder;
pub use shell::{Shell, Status};

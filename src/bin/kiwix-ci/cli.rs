//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kiwix_ci::util::shell::ColorChoice;
use kiwix_ci::Target;

/// kiwix-ci - CI driver for kiwix-build
///
/// Every run parameter can be given as an option or through the environment
/// variables set by the CI service.
#[derive(Parser)]
#[command(name = "kiwix-ci")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(flatten)]
    pub env: EnvArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Run parameters, read once at startup.
#[derive(Args)]
pub struct EnvArgs {
    /// kiwix-build target platform (native_dyn, android_arm, ...)
    #[arg(long, env = "PLATFORM")]
    pub platform: String,

    /// Operating system of the CI worker
    #[arg(long, env = "TRAVIS_OS_NAME", default_value = "linux")]
    pub os_name: String,

    /// CI event type (cron, pull_request, push, ...)
    #[arg(long, env = "TRAVIS_EVENT_TYPE", default_value = "push")]
    pub event_type: String,

    /// Git tag of the build; a `X.Y.Z` tag makes a release run
    #[arg(long, env = "TRAVIS_TAG", default_value = "")]
    pub tag: String,

    /// Date used for nightly archives (defaults to today)
    #[arg(long, env = "NIGHTLY_DATE")]
    pub nightly_date: Option<String>,

    /// CI checkout holding the upload key
    #[arg(long, env = "TRAVIS_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// Directory kiwix-build works in (defaults to the home directory)
    #[arg(long, env = "KIWIX_CI_HOME")]
    pub home: Option<PathBuf>,

    /// Settings file (defaults to ~/.kiwix-ci/config.toml)
    #[arg(long, env = "KIWIX_CI_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the whole CI pipeline
    Run,

    /// Print the targets a run would build
    Targets,

    /// Package the installed binaries of a project
    Archive(ArchiveArgs),

    /// Assemble a dependency bundle from the current build tree
    DepsArchive(DepsArchiveArgs),
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// Project to package (kiwix-tools, zim-tools, zimwriterfs)
    pub project: Target,

    /// Platform name used in the archive name (linux64, win32, ...)
    pub platform_name: String,
}

#[derive(Args)]
pub struct DepsArchiveArgs {
    /// Target the bundle is made for
    pub target: Target,

    /// Include completion markers, pugixml and toolchains
    #[arg(long)]
    pub full: bool,
}

//! Invocation of the kiwix-build orchestrator.

use anyhow::{Context, Result};

use crate::core::Target;
use crate::util::{CiContext, ProcessBuilder, Shell, Status};

/// Optional kiwix-build modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// Only build the target's dependencies.
    pub deps_only: bool,
    /// Build from release sources.
    pub make_release: bool,
    /// Also produce a source distribution.
    pub make_dist: bool,
}

impl BuildFlags {
    pub fn deps_only() -> Self {
        BuildFlags {
            deps_only: true,
            ..Default::default()
        }
    }

    pub fn release(make_release: bool) -> Self {
        BuildFlags {
            make_release,
            ..Default::default()
        }
    }

    pub fn dist() -> Self {
        BuildFlags {
            make_release: true,
            make_dist: true,
            ..Default::default()
        }
    }

    fn describe(&self) -> String {
        let mut modes = Vec::new();
        if self.deps_only {
            modes.push("deps-only");
        }
        if self.make_release {
            modes.push("release");
        }
        if self.make_dist {
            modes.push("dist");
        }
        if modes.is_empty() {
            String::new()
        } else {
            format!(" ({})", modes.join(", "))
        }
    }
}

/// Command line for building `target`, run from the home directory.
pub fn kiwix_build_command(ctx: &CiContext, target: Target, flags: BuildFlags) -> ProcessBuilder {
    let mut cmd = ProcessBuilder::new(&ctx.settings().tools.kiwix_build)
        .arg(target.name())
        .arg("--hide-progress")
        .args(["--target-platform", ctx.platform().as_str()]);

    if flags.deps_only {
        cmd = cmd.arg("--build-deps-only");
    }
    if flags.make_release {
        cmd = cmd.arg("--make-release");
    }
    if flags.make_dist {
        cmd = cmd.arg("--make-dist");
    }

    cmd.cwd(ctx.home())
}

/// Build one target. Any non-zero exit aborts the run.
pub fn run_kiwix_build(
    ctx: &CiContext,
    shell: &Shell,
    target: Target,
    flags: BuildFlags,
) -> Result<()> {
    let span = shell.span(
        Status::Building,
        format!("{}{}", target, flags.describe()),
    );

    kiwix_build_command(ctx, target, flags)
        .run()
        .with_context(|| format!("failed to build `{}`", target))?;

    span.finish();
    Ok(())
}

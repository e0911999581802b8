//! The CI driver.
//!
//! A run goes through these phases, in order, stopping at the first failure:
//!
//! 1. create the archive directories;
//! 2. fetch the base dependency bundle, or build and upload it on a miss;
//! 3. resolve the targets for the platform and event;
//! 4. pull requests: build each target once and stop;
//! 5. otherwise, per target: on cron runs build the dependencies and upload
//!    their bundle, then build the target (and its source distribution on
//!    `native_dyn` releases);
//! 6. publish source tarballs, binary archives and APKs.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::{resolve_targets, Target};
use crate::ops::deps_archive::{base_deps_archive_name, make_deps_archive, reset_install_marker};
use crate::ops::fetch::{fetch_base_deps, FetchOutcome};
use crate::ops::kiwix_build::{run_kiwix_build, BuildFlags};
use crate::ops::publish::publish_artifacts;
use crate::ops::transfer::{remote_path, scp};
use crate::util::fs::ensure_dir;
use crate::util::{CiContext, Shell, Status};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub targets: Vec<Target>,
    pub fetch: FetchOutcome,
    /// Whether the run stopped after the pull-request smoke build.
    pub smoke: bool,
    pub published: Vec<PathBuf>,
}

/// Run the whole CI pipeline.
pub fn run(ctx: &CiContext, shell: &Shell) -> Result<RunSummary> {
    for dir in ctx.paths().archive_roots(ctx.nightly_date()) {
        ensure_dir(&dir)?;
    }

    let fetch = prepare_base_deps(ctx, shell)?;

    let targets = resolve_targets(ctx.platform(), ctx.event());
    shell.status(
        Status::Info,
        format!(
            "{} on {} ({}): {}",
            ctx.event().event_type,
            ctx.platform(),
            if ctx.is_release() { "release" } else { "nightly" },
            targets
                .iter()
                .map(Target::name)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );

    if ctx.event().is_smoke_build() {
        for &target in &targets {
            run_kiwix_build(ctx, shell, target, BuildFlags::default())?;
        }
        return Ok(RunSummary {
            targets,
            fetch,
            smoke: true,
            published: Vec::new(),
        });
    }

    for &target in &targets {
        build_target(ctx, shell, target)?;
    }

    let published = publish_artifacts(ctx, shell, &targets)?;
    Ok(RunSummary {
        targets,
        fetch,
        smoke: false,
        published,
    })
}

/// Make the base dependencies available, from the cache or from source.
fn prepare_base_deps(ctx: &CiContext, shell: &Shell) -> Result<FetchOutcome> {
    let outcome = fetch_base_deps(ctx, shell)?;
    if outcome == FetchOutcome::Miss {
        run_kiwix_build(ctx, shell, Target::AllDependencies, BuildFlags::default())?;
        let archive = make_deps_archive(ctx, shell, Target::AllDependencies, true)?;
        scp(ctx, shell, &archive, &remote_path(ctx, &base_deps_archive_name(ctx)))?;
    }
    Ok(outcome)
}

/// One build-and-cache cycle for a target.
fn build_target(ctx: &CiContext, shell: &Shell, target: Target) -> Result<()> {
    if ctx.event().is_cron() {
        run_kiwix_build(ctx, shell, target, BuildFlags::deps_only())?;
        let archive = make_deps_archive(ctx, shell, target, false)?;
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        scp(ctx, shell, &archive, &remote_path(ctx, &name))?;
    }

    run_kiwix_build(ctx, shell, target, BuildFlags::release(ctx.is_release()))?;
    if ctx.is_release() && ctx.platform().makes_dist() {
        run_kiwix_build(ctx, shell, target, BuildFlags::dist())?;
    }

    reset_install_marker(ctx)
}

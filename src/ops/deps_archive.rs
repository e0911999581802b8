//! Dependency bundles cached between CI runs.
//!
//! A partial bundle (per target) holds what a target's dependencies
//! installed into the build root. A full bundle (bootstrap) additionally
//! holds kiwix-build's completion markers, the pugixml source trees and the
//! toolchains, so that a later run can skip building base dependencies
//! entirely.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::versions::{pugixml_dir_name, BASE_DEPS_META_VERSION};
use crate::core::Target;
use crate::ops::manifest::write_manifest;
use crate::util::fs::{glob_paths, remove_file_if_exists};
use crate::util::{CiContext, CiError, Shell, Status};

/// Name of a per-target dependency bundle.
pub fn deps_archive_name(ctx: &CiContext, target: Target) -> String {
    format!("deps_{}_{}_{}.tar.gz", ctx.os_name(), ctx.platform(), target)
}

/// Name of the bootstrap bundle holding every base dependency.
pub fn base_deps_archive_name(ctx: &CiContext) -> String {
    format!(
        "base_deps_{}_{}_{}.tar.gz",
        ctx.os_name(),
        ctx.platform(),
        BASE_DEPS_META_VERSION
    )
}

/// What goes into a dependency bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepsInputs {
    /// Member paths are stored relative to this directory, and the archive
    /// is written into it.
    pub base: PathBuf,
    pub paths: Vec<PathBuf>,
}

/// Collect the inputs of a bundle. The manifest must already be written.
pub fn collect_deps_inputs(ctx: &CiContext, full: bool) -> Result<DepsInputs> {
    let paths = ctx.paths();
    let base_dir = paths.base_dir();

    let install = paths.install_dir();
    if !install.is_dir() {
        return Err(CiError::MissingArtifact { path: install }.into());
    }

    let mut inputs = vec![install];
    inputs.extend(glob_paths(base_dir, "**/android-ndk*")?);
    if paths.cross_file().exists() {
        inputs.push(paths.cross_file());
    }
    inputs.push(paths.manifest_file());

    if !full {
        return Ok(DepsInputs {
            base: base_dir.to_path_buf(),
            paths: inputs,
        });
    }

    inputs.extend(glob_paths(&paths.archive_dir(), ".*_ok")?);
    inputs.extend(glob_paths(base_dir, "*/.*_ok")?);
    inputs.extend(glob_paths(&paths.source_dir(), "*/.*_ok")?);

    let pugixml = [
        paths.source_dir().join(pugixml_dir_name()),
        base_dir.join(pugixml_dir_name()),
    ];
    let mut found_pugixml = 0;
    for tree in pugixml {
        if tree.exists() {
            inputs.push(tree);
            found_pugixml += 1;
        } else {
            tracing::debug!("{} not present, skipping", tree.display());
        }
    }
    if found_pugixml == 0 {
        tracing::warn!(
            "neither copy of {} exists; the bundle will not contain it",
            pugixml_dir_name()
        );
    }

    if paths.toolchains_dir().exists() {
        inputs.push(paths.toolchains_dir());
    }

    Ok(DepsInputs {
        base: paths.home().to_path_buf(),
        paths: inputs,
    })
}

/// Assemble the dependency bundle of `target`.
///
/// Afterwards the `.install_packages_ok` marker is removed: the bundle is now
/// the record of the installed packages, and the next build must not assume
/// they are still present.
pub fn make_deps_archive(
    ctx: &CiContext,
    shell: &Shell,
    target: Target,
    full: bool,
) -> Result<PathBuf> {
    let archive_name = deps_archive_name(ctx, target);
    let span = shell.span(
        Status::Archiving,
        format!("{} ({})", archive_name, if full { "full" } else { "partial" }),
    );

    write_manifest(
        &ctx.paths().manifest_file(),
        &archive_name,
        target.name(),
        ctx.platform().as_str(),
        ctx.today(),
    )?;

    let inputs = collect_deps_inputs(ctx, full)?;
    let archive_path = inputs.base.join(&archive_name);
    write_tar_gz(&archive_path, &inputs)?;

    reset_install_marker(ctx)?;
    span.finish();
    Ok(archive_path)
}

/// Remove the marker kiwix-build leaves after installing system packages.
pub fn reset_install_marker(ctx: &CiContext) -> Result<()> {
    let marker = ctx.paths().install_marker();
    if remove_file_if_exists(&marker)? {
        tracing::debug!("removed {}", marker.display());
    }
    Ok(())
}

fn write_tar_gz(archive_path: &Path, inputs: &DepsInputs) -> Result<()> {
    let file = File::create(archive_path)
        .with_context(|| format!("failed to create {}", archive_path.display()))?;
    let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    tar.follow_symlinks(false);

    for path in &inputs.paths {
        let name = path.strip_prefix(&inputs.base).with_context(|| {
            format!(
                "{} is outside of {}",
                path.display(),
                inputs.base.display()
            )
        })?;
        tracing::debug!("adding {}", name.display());

        let meta = std::fs::symlink_metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?;
        if meta.is_dir() {
            tar.append_dir_all(name, path)
        } else {
            tar.append_path_with_name(path, name)
        }
        .with_context(|| format!("failed to add {} to archive", path.display()))?;
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

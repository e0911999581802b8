//! Binary archives for public deployment.
//!
//! A project's installed binaries are packaged as
//! `{project}_{platform}-{version-or-date}` in a zip (win32) or a tar.gz
//! (everything else). Tarball entries sit under a directory named after the
//! archive; zip entries are flat.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::versions::main_project_version;
use crate::core::{destination_for, ArchiveFormat, Target};
use crate::util::fs::ensure_dir;
use crate::util::{CiContext, CiError, Shell, Status};

/// Mode of a published archive. Temporary files start out owner-only.
#[cfg(unix)]
const ARCHIVE_MODE: u32 = 0o644;

/// Base name of a binary archive, without extension.
pub fn archive_name(project: Target, platform_name: &str, postfix: &str) -> String {
    format!("{}_{}-{}", project, platform_name, postfix)
}

/// Version postfix for release runs, nightly date otherwise.
pub fn archive_postfix(ctx: &CiContext, project: Target) -> Result<String> {
    if ctx.is_release() {
        let version = main_project_version(project).ok_or_else(|| CiError::NoReleaseVersion {
            project: project.to_string(),
        })?;
        Ok(version.to_string())
    } else {
        Ok(ctx.nightly_date().to_string())
    }
}

/// Package the installed binaries of `project` for `platform_name`.
///
/// Returns the path of the written archive.
pub fn make_archive(
    ctx: &CiContext,
    shell: &Shell,
    project: Target,
    platform_name: &str,
) -> Result<PathBuf> {
    let binaries = project.binaries().ok_or_else(|| CiError::NotPackaged {
        project: project.to_string(),
    })?;

    let dest = destination_for(project, ctx.is_release());
    let archive_dir = ctx.paths().destination_dir(dest, project, ctx.nightly_date());
    ensure_dir(&archive_dir)?;

    let format = ArchiveFormat::for_archive_platform(platform_name);
    let name = archive_name(project, platform_name, &archive_postfix(ctx, project)?);
    let archive_path = archive_dir.join(format!("{}{}", name, format.extension()));

    let span = shell.span(Status::Archiving, format!("{} for {}", project, platform_name));
    write_binary_archive(
        &archive_path,
        format,
        &ctx.paths().bin_dir(),
        &name,
        binaries,
    )?;
    span.finish();

    tracing::info!("wrote {} family archive {}", dest.family, archive_path.display());
    Ok(archive_path)
}

/// Write a binary archive.
///
/// Every binary must exist in `bin_dir`; a missing one fails before anything
/// is written. The archive is assembled in a temporary file next to
/// `archive_path` and only moved into place once complete, world-readable.
pub fn write_binary_archive(
    archive_path: &Path,
    format: ArchiveFormat,
    bin_dir: &Path,
    archive_name: &str,
    binaries: &[&str],
) -> Result<()> {
    let files: Vec<(PathBuf, String)> = binaries
        .iter()
        .map(|bin| {
            let file_name = format.binary_file_name(bin);
            (bin_dir.join(&file_name), file_name)
        })
        .collect();

    for (src, _) in &files {
        if !src.is_file() {
            return Err(CiError::MissingArtifact { path: src.clone() }.into());
        }
    }

    let dir = archive_path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;

    let tmp = match format {
        ArchiveFormat::Zip => write_zip(tmp, &files),
        ArchiveFormat::TarGz => write_tar_gz(tmp, archive_name, &files),
    }
    .with_context(|| format!("failed to write archive: {}", archive_path.display()))?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        tmp.as_file()
            .set_permissions(Permissions::from_mode(ARCHIVE_MODE))
            .with_context(|| format!("failed to set mode of {}", archive_path.display()))?;
    }

    tmp.persist(archive_path)
        .with_context(|| format!("failed to move archive into {}", archive_path.display()))?;
    Ok(())
}

fn write_zip(tmp: NamedTempFile, files: &[(PathBuf, String)]) -> Result<NamedTempFile> {
    let mut zip = ZipWriter::new(tmp);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);

    for (src, name) in files {
        zip.start_file(name.as_str(), options)?;
        let mut f = File::open(src)
            .with_context(|| format!("failed to open {}", src.display()))?;
        io::copy(&mut f, &mut zip)?;
    }

    Ok(zip.finish()?)
}

fn write_tar_gz(
    tmp: NamedTempFile,
    archive_name: &str,
    files: &[(PathBuf, String)],
) -> Result<NamedTempFile> {
    let encoder = GzEncoder::new(tmp, Compression::default());
    let mut tar = tar::Builder::new(encoder);

    for (src, name) in files {
        tar.append_path_with_name(src, format!("{}/{}", archive_name, name))
            .with_context(|| format!("failed to add {}", src.display()))?;
    }

    Ok(tar.into_inner()?.finish()?)
}

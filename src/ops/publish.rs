//! Publication of build outputs into the archive directories.
//!
//! Which outputs exist depends on the platform: source tarballs on
//! `native_dyn` releases, binary archives on the static platforms, APKs on
//! Android nightlies.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::versions::main_project_version;
use crate::core::{ArchiveFamily, Target};
use crate::ops::make_archive::make_archive;
use crate::util::fs::{copy_into, ensure_dir};
use crate::util::{CiContext, CiError, Shell, Status};

/// Publish everything the finished build of `targets` produced.
///
/// Returns the paths of the published files.
pub fn publish_artifacts(
    ctx: &CiContext,
    shell: &Shell,
    targets: &[Target],
) -> Result<Vec<PathBuf>> {
    let mut published = Vec::new();

    if ctx.is_release() && ctx.platform().makes_dist() {
        published.extend(copy_dist_tarballs(ctx, shell, targets)?);
    }

    if let Some(archives) = ctx.platform().public_archives() {
        for &project in archives.projects {
            if ctx.is_release() && main_project_version(project).is_none() {
                shell.status(Status::Skipped, format!("{} has no release version", project));
                continue;
            }
            published.push(make_archive(ctx, shell, project, archives.archive_platform)?);
        }
    }

    if ctx.platform().is_mobile() && targets.contains(&Target::KiwixAndroid) {
        published.extend(copy_android_apks(ctx, shell)?);
    }

    Ok(published)
}

/// Source tarball kiwix-build leaves for a release dist build.
///
/// `None` for targets without a released version.
pub fn dist_tarball(ctx: &CiContext, target: Target) -> Option<PathBuf> {
    let version = main_project_version(target)?;
    let dist_dir = ctx.paths().project_build_dir(target).join("meson-dist");
    Some(dist_dir.join(format!("{}-{}.tar.xz", target, version)))
}

/// Copy release source tarballs into `DIST_<FAMILY>_ARCHIVES/<target>`.
///
/// Fails with [`CiError::MissingArtifact`] when kiwix-build did not produce
/// the tarball of a released target.
pub fn copy_dist_tarballs(
    ctx: &CiContext,
    shell: &Shell,
    targets: &[Target],
) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for &target in targets {
        let Some(tarball) = dist_tarball(ctx, target) else {
            continue;
        };

        let out_dir = ctx.paths().dist_root(ArchiveFamily::of(target)).join(target.name());
        ensure_dir(&out_dir)?;

        if !tarball.is_file() {
            return Err(CiError::MissingArtifact { path: tarball }.into());
        }

        let dest = out_dir.join(file_name(&tarball));
        copy_into(&tarball, &dest)?;
        shell.status(Status::Copying, dest.display());
        copied.push(dest);
    }
    Ok(copied)
}

/// Copy the nightly APKs into the kiwix nightly directory.
pub fn copy_android_apks(ctx: &CiContext, shell: &Shell) -> Result<Vec<PathBuf>> {
    let source = android_apk_dir(ctx);
    let out_dir = ctx.paths().nightly_dir(ArchiveFamily::Kiwix, ctx.nightly_date());
    ensure_dir(&out_dir)?;

    let apk_name = format!("kiwix-{}", ctx.platform());
    let copies = [
        (
            source.join("debug/app-kiwix-debug.apk"),
            format!("{}-debug.apk", apk_name),
        ),
        (
            source.join("release/app-kiwix-release-unsigned.apk"),
            format!("{}-release_signed.apk", apk_name),
        ),
    ];

    let mut copied = Vec::new();
    for (src, name) in copies {
        let dest = out_dir.join(name);
        copy_into(&src, &dest)?;
        shell.status(Status::Copying, dest.display());
        copied.push(dest);
    }
    Ok(copied)
}

/// Gradle output directory of the app inside the platform build tree.
fn android_apk_dir(ctx: &CiContext) -> PathBuf {
    ctx.paths().project_build_dir(Target::KiwixAndroid).join("app/build/outputs/apk/kiwix")
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::{context_for, install_binaries};

    #[test]
    fn test_dist_tarball_locations() {
        let (_home, ctx) = context_for("native_dyn", "push", "1.0.0");
        let base = ctx.paths().base_dir();
        assert_eq!(
            dist_tarball(&ctx, Target::Libzim),
            Some(base.join("libzim/meson-dist/libzim-9.2.3.tar.xz"))
        );
        assert_eq!(
            dist_tarball(&ctx, Target::KiwixLib),
            Some(base.join("kiwix-lib/meson-dist/kiwix-lib-14.0.0.tar.xz"))
        );
        assert_eq!(dist_tarball(&ctx, Target::Zimwriterfs), None);
        assert_eq!(dist_tarball(&ctx, Target::KiwixAndroid), None);
    }

    fn write_dist_tarballs(ctx: &CiContext, targets: &[Target]) {
        for &target in targets {
            let tarball = dist_tarball(ctx, target).unwrap();
            fs::create_dir_all(tarball.parent().unwrap()).unwrap();
            fs::write(&tarball, "tarball").unwrap();
        }
    }

    #[test]
    fn test_release_dist_copies() {
        let (_home, ctx) = context_for("native_dyn", "push", "1.0.0");
        write_dist_tarballs(&ctx, &[Target::Libzim, Target::KiwixLib]);

        let published = publish_artifacts(
            &ctx,
            &Shell::quiet(),
            &[Target::Libzim, Target::KiwixLib, Target::Zimwriterfs],
        )
        .unwrap();

        assert_eq!(
            published,
            vec![
                ctx.home().join("DIST_ZIM_ARCHIVES/libzim/libzim-9.2.3.tar.xz"),
                ctx.home().join("DIST_KIWIX_ARCHIVES/kiwix-lib/kiwix-lib-14.0.0.tar.xz"),
            ]
        );
        assert!(!ctx.home().join("DIST_ZIM_ARCHIVES/zimwriterfs").exists());
    }

    #[test]
    fn test_missing_dist_tarball_fails() {
        let (_home, ctx) = context_for("native_dyn", "push", "1.0.0");
        write_dist_tarballs(&ctx, &[Target::Libzim]);

        let err = publish_artifacts(&ctx, &Shell::quiet(), &[Target::Libzim, Target::ZimTools])
            .unwrap_err();
        match err.downcast_ref::<CiError>() {
            Some(CiError::MissingArtifact { path }) => {
                assert_eq!(path, &dist_tarball(&ctx, Target::ZimTools).unwrap())
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_nightly_dyn_publishes_nothing() {
        let (_home, ctx) = context_for("native_dyn", "cron", "");
        let published = publish_artifacts(&ctx, &Shell::quiet(), &[Target::Libzim]).unwrap();
        assert!(published.is_empty());
    }

    #[test]
    fn test_static_platform_archives() {
        let (_home, ctx) = context_for("native_static", "cron", "");
        for target in [Target::KiwixTools, Target::ZimTools, Target::Zimwriterfs] {
            install_binaries(&ctx, target, false);
        }

        let published = publish_artifacts(&ctx, &Shell::quiet(), &[]).unwrap();
        let names: Vec<String> = published
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        let date = ctx.nightly_date();
        assert_eq!(
            names,
            vec![
                format!("kiwix-tools_linux64-{}.tar.gz", date),
                format!("zim-tools_linux64-{}.tar.gz", date),
                format!("zimwriterfs_linux64-{}.tar.gz", date),
            ]
        );
    }

    #[test]
    fn test_release_static_archives_skip_unreleased_projects() {
        let (_home, ctx) = context_for("native_static", "push", "1.0.0");
        for target in [Target::KiwixTools, Target::ZimTools] {
            install_binaries(&ctx, target, false);
        }

        let published = publish_artifacts(&ctx, &Shell::quiet(), &[]).unwrap();
        assert_eq!(
            published,
            vec![
                ctx.home().join("RELEASE_KIWIX_ARCHIVES/kiwix-tools/kiwix-tools_linux64-3.7.0.tar.gz"),
                ctx.home().join("RELEASE_ZIM_ARCHIVES/zim-tools/zim-tools_linux64-3.5.0.tar.gz"),
            ]
        );
    }

    #[test]
    fn test_android_apks() {
        let (_home, ctx) = context_for("android_arm", "cron", "");
        let source = ctx
            .home()
            .join("BUILD_android_arm/kiwix-android/app/build/outputs/apk/kiwix");
        for apk in [
            "debug/app-kiwix-debug.apk",
            "release/app-kiwix-release-unsigned.apk",
        ] {
            let path = source.join(apk);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "apk").unwrap();
        }

        let published =
            publish_artifacts(&ctx, &Shell::quiet(), &[Target::Libzim, Target::KiwixAndroid])
                .unwrap();
        let nightly = ctx.paths().nightly_dir(ArchiveFamily::Kiwix, ctx.nightly_date());
        assert_eq!(
            published,
            vec![
                nightly.join("kiwix-android_arm-debug.apk"),
                nightly.join("kiwix-android_arm-release_signed.apk"),
            ]
        );
    }

    #[test]
    fn test_android_without_app_publishes_nothing() {
        let (_home, ctx) = context_for("android_arm", "push", "1.0.0");
        let published =
            publish_artifacts(&ctx, &Shell::quiet(), &[Target::Libzim, Target::KiwixLib]).unwrap();
        assert!(published.is_empty());
    }
}

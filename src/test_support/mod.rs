//! Test fixtures for kiwix-ci unit tests.
//!
//! Every fixture works inside a throwaway home directory, so tests can build
//! the same `~/BUILD_<platform>` layout kiwix-build produces on CI.

use std::fs;
use std::fs::File;
use std::path::Path;

use tempfile::TempDir;

use crate::core::Target;
use crate::util::{CiContext, CiOptions};

/// Create a context rooted in a fresh temporary home directory.
///
/// The `TempDir` must be kept alive for as long as the context is used.
pub fn context_for(platform: &str, event_type: &str, tag: &str) -> (TempDir, CiContext) {
    let home = TempDir::new().unwrap();
    let ctx = CiContext::new(CiOptions {
        platform: platform.to_string(),
        os_name: "linux".to_string(),
        event_type: event_type.to_string(),
        tag: tag.to_string(),
        home: Some(home.path().to_path_buf()),
        ..Default::default()
    })
    .unwrap();
    (home, ctx)
}

fn touch(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Install fake binaries of `target` into `INSTALL/bin`.
pub fn install_binaries(ctx: &CiContext, target: Target, exe: bool) {
    let bin_dir = ctx.paths().bin_dir();
    for bin in target.binaries().unwrap() {
        let name = if exe {
            format!("{}.exe", bin)
        } else {
            bin.to_string()
        };
        touch(&bin_dir.join(name), &format!("binary {}", bin));
    }
}

/// Lay out a build tree like the one left behind by a base dependency build.
pub fn populate_build_tree(ctx: &CiContext) {
    let paths = ctx.paths();
    let base = paths.base_dir();

    touch(&paths.bin_dir().join("kiwix-serve"), "binary");
    touch(&base.join("android-ndk-r21e/source.properties"), "Pkg.Revision = 21.4");
    touch(&paths.cross_file(), "[binaries]\n");
    touch(&paths.install_marker(), "");

    touch(&paths.archive_dir().join(".libzim_ok"), "");
    touch(&base.join("libzim/.compile_ok"), "");
    touch(&paths.source_dir().join("libzim/.extract_ok"), "");

    touch(&paths.source_dir().join("pugixml-1.2/pugixml.hpp"), "");
    touch(&base.join("pugixml-1.2/pugixml.hpp"), "");

    touch(&paths.toolchains_dir().join("armhf/README"), "");
}

/// File names stored in a tar.gz archive, in archive order.
pub fn tar_gz_entries(path: &Path) -> Vec<String> {
    let file = File::open(path).unwrap();
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            entry
                .path()
                .unwrap()
                .to_string_lossy()
                .trim_end_matches('/')
                .to_string()
        })
        .collect()
}

/// File names stored in a zip archive.
pub fn zip_entries(path: &Path) -> Vec<String> {
    let file = File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(str::to_string).collect()
}

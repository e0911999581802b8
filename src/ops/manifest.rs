//! Human-readable descriptor shipped inside dependency archives.

use std::path::Path;

use anyhow::Result;

use crate::util::fs::write_string;

/// Render the manifest of a dependency archive.
pub fn manifest_text(archive_name: &str, target: &str, platform: &str, date: &str) -> String {
    format!(
        "{archive_name}\n\
         ***************************\n\
         \n\
         Dependencies archive for {target} on platform {platform}\n\
         Generated at {date}\n"
    )
}

/// Write the manifest of a dependency archive to `path`.
pub fn write_manifest(
    path: &Path,
    archive_name: &str,
    target: &str,
    platform: &str,
    date: &str,
) -> Result<()> {
    write_string(path, &manifest_text(archive_name, target, platform, date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_template() {
        let text = manifest_text(
            "deps_linux_native_dyn_libzim.tar.gz",
            "libzim",
            "native_dyn",
            "2024-05-01",
        );
        assert_eq!(
            text,
            "deps_linux_native_dyn_libzim.tar.gz\n\
             ***************************\n\
             \n\
             Dependencies archive for libzim on platform native_dyn\n\
             Generated at 2024-05-01\n"
        );
    }
}

//! Uploads to the remote CI cache.

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::{CiContext, CiError, ProcessBuilder, Shell, Status};

/// Remote location of `name` inside the upload directory.
pub fn remote_path(ctx: &CiContext, name: &str) -> String {
    format!("{}{}", ctx.settings().remote.scp_destination, name)
}

/// `scp -i <key> <what> <dest>`.
pub fn scp_command(ctx: &CiContext, what: &Path, dest: &str) -> Result<ProcessBuilder> {
    let key = ctx.ssh_key().ok_or(CiError::NoSshKey)?;
    Ok(ProcessBuilder::new(&ctx.settings().tools.scp)
        .arg("-i")
        .arg(key)
        .arg(what)
        .arg(dest))
}

/// Copy a local file to a remote destination.
pub fn scp(ctx: &CiContext, shell: &Shell, what: &Path, dest: &str) -> Result<()> {
    let span = shell.span(Status::Uploading, format!("{} to {}", what.display(), dest));
    scp_command(ctx, what, dest)?
        .run()
        .with_context(|| format!("failed to upload {}", what.display()))?;
    span.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_support::context_for;
    use crate::util::CiOptions;

    #[test]
    fn test_remote_path() {
        let (_home, ctx) = context_for("native_dyn", "cron", "");
        assert_eq!(
            remote_path(&ctx, "deps_linux_native_dyn_libzim.tar.gz"),
            "nightlybot@download.kiwix.org:/var/www/tmp.kiwix.org/ci/deps_linux_native_dyn_libzim.tar.gz"
        );
    }

    #[test]
    fn test_scp_requires_key() {
        let (_home, ctx) = context_for("native_dyn", "cron", "");
        let err = scp_command(&ctx, Path::new("/tmp/a.tar.gz"), "host:/dir/").unwrap_err();
        assert!(matches!(err.downcast_ref::<CiError>(), Some(CiError::NoSshKey)));
    }

    #[test]
    fn test_scp_command_line() {
        let ctx = CiContext::new(CiOptions {
            platform: "native_dyn".into(),
            os_name: "linux".into(),
            event_type: "cron".into(),
            build_dir: Some(PathBuf::from("/checkout")),
            home: Some(PathBuf::from("/home/ci")),
            ..Default::default()
        })
        .unwrap();

        let cmd = scp_command(&ctx, Path::new("/home/ci/a.tar.gz"), "host:/dir/a.tar.gz").unwrap();
        assert_eq!(cmd.get_program(), Path::new("scp"));
        assert_eq!(
            cmd.get_args(),
            &[
                "-i",
                "/checkout/travis/travisci_builder_id_key",
                "/home/ci/a.tar.gz",
                "host:/dir/a.tar.gz"
            ]
        );
    }
}

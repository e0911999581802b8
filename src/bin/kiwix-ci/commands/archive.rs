//! `kiwix-ci archive` command

use anyhow::Result;

use crate::cli::ArchiveArgs;
use kiwix_ci::ops::make_archive;
use kiwix_ci::util::{CiContext, Shell};

pub fn execute(args: ArchiveArgs, ctx: &CiContext, shell: &Shell) -> Result<()> {
    let path = make_archive(ctx, shell, args.project, &args.platform_name)?;
    println!("{}", path.display());
    Ok(())
}

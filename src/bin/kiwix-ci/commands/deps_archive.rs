//! `kiwix-ci deps-archive` command

use anyhow::Result;

use crate::cli::DepsArchiveArgs;
use kiwix_ci::ops::make_deps_archive;
use kiwix_ci::util::{CiContext, Shell};

pub fn execute(args: DepsArchiveArgs, ctx: &CiContext, shell: &Shell) -> Result<()> {
    let path = make_deps_archive(ctx, shell, args.target, args.full)?;
    println!("{}", path.display());
    Ok(())
}

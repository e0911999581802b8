//! `kiwix-ci targets` command

use anyhow::Result;

use kiwix_ci::resolve_targets;
use kiwix_ci::util::CiContext;

pub fn execute(ctx: &CiContext) -> Result<()> {
    for target in resolve_targets(ctx.platform(), ctx.event()) {
        println!("{}", target);
    }
    Ok(())
}

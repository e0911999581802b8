//! `kiwix-ci run` command

use anyhow::Result;

use kiwix_ci::ops::{self, FetchOutcome};
use kiwix_ci::util::{CiContext, Shell, Status};

pub fn execute(ctx: &CiContext, shell: &Shell) -> Result<()> {
    let summary = ops::run(ctx, shell)?;

    if summary.fetch == FetchOutcome::Miss {
        shell.note("base dependencies were rebuilt and uploaded");
    }
    if summary.smoke {
        shell.status(
            Status::Finished,
            format!("smoke build of {} target(s)", summary.targets.len()),
        );
        return Ok(());
    }

    for path in &summary.published {
        shell.status(Status::Created, path.display());
    }
    shell.status(
        Status::Finished,
        format!(
            "{} target(s), {} published file(s)",
            summary.targets.len(),
            summary.published.len()
        ),
    );
    Ok(())
}

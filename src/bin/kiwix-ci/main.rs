//! kiwix-ci CLI - CI driver for kiwix-build

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, EnvArgs};
use kiwix_ci::util::config::global_config_path;
use kiwix_ci::util::{CiContext, CiOptions, Settings, Shell};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("kiwix_ci=debug")
    } else if cli.quiet {
        EnvFilter::new("kiwix_ci=error")
    } else {
        EnvFilter::new("kiwix_ci=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);
    let ctx = load_context(cli.env)?;

    // Execute command
    match cli.command {
        Commands::Run => commands::run::execute(&ctx, &shell),
        Commands::Targets => commands::targets::execute(&ctx),
        Commands::Archive(args) => commands::archive::execute(args, &ctx, &shell),
        Commands::DepsArchive(args) => commands::deps_archive::execute(args, &ctx, &shell),
    }
}

fn load_context(env: EnvArgs) -> Result<CiContext> {
    let settings = match &env.config {
        Some(path) => Settings::load(path)?,
        None => global_config_path()
            .map(|path| Settings::load_or_default(&path))
            .unwrap_or_default(),
    };

    CiContext::new(CiOptions {
        platform: env.platform,
        os_name: env.os_name,
        event_type: env.event_type,
        tag: env.tag,
        nightly_date: env.nightly_date,
        build_dir: env.build_dir,
        home: env.home,
        settings,
    })
}

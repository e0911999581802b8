//! Run context: everything a CI run reads from its environment.
//!
//! The context is built once at startup and passed by reference to every
//! operation; nothing below this point reads process environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::core::{EventContext, Paths, PlatformId};
use crate::util::config::{Settings, SSH_KEY_PATH};

/// Raw inputs of a run, as gathered by the CLI.
#[derive(Debug, Clone, Default)]
pub struct CiOptions {
    pub platform: String,
    pub os_name: String,
    pub event_type: String,
    pub tag: String,
    /// Overrides the date used for nightly archives.
    pub nightly_date: Option<String>,
    /// CI checkout; the upload key lives inside it.
    pub build_dir: Option<PathBuf>,
    /// Overrides the home directory.
    pub home: Option<PathBuf>,
    pub settings: Settings,
}

/// Immutable configuration of one CI run.
#[derive(Debug, Clone)]
pub struct CiContext {
    platform: PlatformId,
    event: EventContext,
    paths: Paths,
    /// Date used in nightly archive names and directories.
    nightly_date: String,
    /// Date stamped into dependency manifests.
    today: String,
    ssh_key: Option<PathBuf>,
    settings: Settings,
}

impl CiContext {
    pub fn new(opts: CiOptions) -> Result<Self> {
        let home = match opts.home {
            Some(home) => home,
            None => BaseDirs::new()
                .map(|dirs| dirs.home_dir().to_path_buf())
                .context("failed to determine home directory")?,
        };

        // Both dates come from one clock read so a run never straddles two
        // days. An externally supplied NIGHTLY_DATE can still differ from
        // `today` on jobs crossing midnight.
        let today = chrono::Local::now().date_naive().to_string();
        let nightly_date = opts
            .nightly_date
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| today.clone());

        let ssh_key = opts
            .settings
            .remote
            .ssh_key
            .clone()
            .or_else(|| opts.build_dir.map(|dir| dir.join(SSH_KEY_PATH)));

        let platform = PlatformId::new(opts.platform);
        let paths = Paths::new(home, &platform);

        Ok(CiContext {
            event: EventContext::new(&opts.event_type, &opts.tag, opts.os_name),
            platform,
            paths,
            nightly_date,
            today,
            ssh_key,
            settings: opts.settings,
        })
    }

    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    pub fn event(&self) -> &EventContext {
        &self.event
    }

    pub fn is_release(&self) -> bool {
        self.event.is_release
    }

    pub fn os_name(&self) -> &str {
        &self.event.os_name
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn home(&self) -> &Path {
        self.paths.home()
    }

    pub fn nightly_date(&self) -> &str {
        &self.nightly_date
    }

    pub fn today(&self) -> &str {
        &self.today
    }

    pub fn ssh_key(&self) -> Option<&Path> {
        self.ssh_key.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

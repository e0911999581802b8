//! CI event classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Tags made of exactly three numeric components mark a release.
static RELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid release tag pattern"));

/// What triggered the CI run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Scheduled nightly run.
    Cron,
    /// Pull request verification.
    PullRequest,
    /// Anything else (push, api, ...).
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Cron => "cron",
            EventType::PullRequest => "pull_request",
            EventType::Other => "other",
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            "cron" => EventType::Cron,
            "pull_request" => EventType::PullRequest,
            _ => EventType::Other,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The event-dependent inputs of target resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub event_type: EventType,
    pub is_release: bool,
    pub os_name: String,
}

impl EventContext {
    /// Classify a run from the raw event type, git tag and OS name.
    pub fn new(event_type: &str, tag: &str, os_name: impl Into<String>) -> Self {
        EventContext {
            event_type: EventType::from(event_type),
            is_release: is_release_tag(tag),
            os_name: os_name.into(),
        }
    }

    pub fn is_cron(&self) -> bool {
        self.event_type == EventType::Cron
    }

    /// A cheap verification build: neither nightly nor release.
    pub fn is_smoke_build(&self) -> bool {
        !self.is_cron() && !self.is_release
    }

    pub fn is_osx(&self) -> bool {
        self.os_name == "osx"
    }
}

/// Check whether a tag names a release (`MAJOR.MINOR.PATCH`).
pub fn is_release_tag(tag: &str) -> bool {
    RELEASE_TAG.is_match(tag)
}

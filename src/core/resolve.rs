//! Target resolution: which projects a CI run builds.
//!
//! Platforms are matched against an ordered dispatch table; the first rule
//! whose predicate accepts the platform decides the target list. The last
//! rule accepts every platform, so resolution cannot fail.

use crate::core::event::EventContext;
use crate::core::platform::PlatformId;
use crate::core::target::Target;

use Target::{KiwixAndroid, KiwixLib, KiwixTools, Libzim, ZimTools, Zimwriterfs};

/// One row of the platform dispatch table.
struct Rule {
    name: &'static str,
    matches: fn(&PlatformId) -> bool,
    /// Targets of a pull request verification build.
    smoke: fn(&EventContext) -> &'static [Target],
    /// Targets of a nightly or release build.
    full: fn(&EventContext) -> &'static [Target],
}

const RULES: &[Rule] = &[
    Rule {
        name: "mobile",
        matches: PlatformId::is_mobile,
        smoke: mobile_smoke,
        full: mobile_full,
    },
    Rule {
        name: "apple-framework",
        matches: PlatformId::is_apple_framework,
        smoke: apple_smoke,
        full: apple_full,
    },
    Rule {
        name: "native",
        matches: PlatformId::is_native,
        smoke: native_smoke,
        full: native_full,
    },
    Rule {
        name: "fallback",
        matches: any_platform,
        smoke: fallback_smoke,
        full: fallback_full,
    },
];

fn any_platform(_: &PlatformId) -> bool {
    true
}

fn mobile_smoke(_: &EventContext) -> &'static [Target] {
    &[KiwixAndroid]
}

fn mobile_full(event: &EventContext) -> &'static [Target] {
    // The Android app is released on its own schedule.
    if event.is_release {
        &[Libzim, KiwixLib]
    } else {
        &[Libzim, KiwixLib, KiwixAndroid]
    }
}

fn apple_smoke(_: &EventContext) -> &'static [Target] {
    &[KiwixLib]
}

fn apple_full(_: &EventContext) -> &'static [Target] {
    &[Libzim, KiwixLib]
}

fn native_smoke(event: &EventContext) -> &'static [Target] {
    if event.is_osx() {
        &[KiwixLib, ZimTools, Zimwriterfs]
    } else {
        &[KiwixTools, ZimTools, Zimwriterfs]
    }
}

fn native_full(event: &EventContext) -> &'static [Target] {
    if event.is_osx() {
        &[Libzim, Zimwriterfs, ZimTools, KiwixLib]
    } else {
        &[Libzim, Zimwriterfs, ZimTools, KiwixLib, KiwixTools]
    }
}

fn fallback_smoke(_: &EventContext) -> &'static [Target] {
    &[KiwixTools]
}

fn fallback_full(_: &EventContext) -> &'static [Target] {
    &[Libzim, ZimTools, KiwixLib, KiwixTools]
}

fn rule_for(platform: &PlatformId) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(platform))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Compute the ordered list of targets to build.
///
/// Smoke builds (see [`EventContext::is_smoke_build`]) get a short
/// verification list and the caller must stop after building it.
pub fn resolve_targets(platform: &PlatformId, event: &EventContext) -> Vec<Target> {
    let rule = rule_for(platform);
    let targets = if event.is_smoke_build() {
        (rule.smoke)(event)
    } else {
        (rule.full)(event)
    };

    tracing::debug!(
        "platform {} matched rule `{}` ({} build): {:?}",
        platform,
        rule.name,
        if event.is_smoke_build() { "smoke" } else { "full" },
        targets
    );

    targets.to_vec()
}

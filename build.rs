// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=SNAPCAM_VERSION");

    // Packagers can pin the version without a git checkout
    let version = std::env::var("SNAPCAM_VERSION").unwrap_or_else(|_| describe_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Build a version string from `git describe`
///
/// - exact tag `v0.1.0` becomes `0.1.0-<hash>`
/// - `v0.1.0-5-gabcdef1` becomes `0.1.0-dirty-abcdef1`
/// - no tags at all falls back to the crate version plus hash
fn describe_version() -> String {
    let hash = git(&["rev-parse", "--short", "HEAD"]);

    let Some(described) = git(&["describe", "--tags", "--match", "v*"]) else {
        let pkg = env!("CARGO_PKG_VERSION");
        return match hash {
            Some(hash) => format!("{}-{}", pkg, hash),
            None => pkg.to_string(),
        };
    };

    let described = described.strip_prefix('v').unwrap_or(&described);
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();

    if parts.len() == 3 {
        let commit = parts[0].strip_prefix('g').unwrap_or(parts[0]);
        format!("{}-dirty-{}", parts[2], commit)
    } else {
        format!(
            "{}-{}",
            described,
            hash.unwrap_or_else(|| "unknown".to_string())
        )
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

//! Stamps the binary with its build identity (reported by `/health` and
//! the startup log).

use std::env;
use std::process::Command;

use chrono::{SecondsFormat, Utc};

fn main() {
    let stamps = [
        ("GIT_HASH", short_commit().unwrap_or_else(|| "unknown".into())),
        (
            "BUILD_TIMESTAMP",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            env::var("PROFILE").unwrap_or_else(|_| "unknown".into()),
        ),
    ];

    for (key, value) in stamps {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Abbreviated HEAD commit, or `None` outside a git checkout
fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2024-2025 ByteDance and/or its affiliates.
 */

use std::env;
use std::process::Command;

const UNKNOWN_COMMIT: &str = "unknown";

pub fn check_git_commit() {
    println!("cargo:rerun-if-env-changed=HAZEL_GIT_COMMIT");

    let commit = match env::var("HAZEL_GIT_COMMIT") {
        Ok(v) if !v.is_empty() => v,
        _ => query_git_head().unwrap_or_else(|| UNKNOWN_COMMIT.to_string()),
    };
    println!("cargo:rustc-env=HAZEL_BUILD_COMMIT={commit}");
}

fn query_git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    if commit.is_empty() {
        None
    } else {
        Some(commit.to_string())
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2024-2025 ByteDance and/or its affiliates.
 */

use std::env;

use chrono::{SecondsFormat, Utc};

/// Emit the build environment variables consumed through `env!` by the binaries.
///
/// `HAZEL_BUILD_DATE` may be pinned by the packaging scripts for reproducible builds.
pub fn check_basic() {
    let rustc = rustc_version::version_meta().unwrap();
    println!(
        "cargo:rustc-env=HAZEL_BUILD_RUSTC_VERSION={}",
        rustc.short_version_string
    );
    println!(
        "cargo:rustc-env=HAZEL_BUILD_RUSTC_CHANNEL={:?}",
        rustc.channel
    );

    println!(
        "cargo:rustc-env=HAZEL_BUILD_TARGET={}",
        env::var("TARGET").unwrap()
    );
    println!(
        "cargo:rustc-env=HAZEL_BUILD_PROFILE={}",
        env::var("PROFILE").unwrap()
    );

    println!("cargo:rerun-if-env-changed=HAZEL_BUILD_DATE");
    let build_date = match env::var("HAZEL_BUILD_DATE") {
        Ok(v) if !v.is_empty() => v,
        _ => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    println!("cargo:rustc-env=HAZEL_BUILD_DATE={build_date}");

    println!("cargo:rerun-if-env-changed=HAZEL_PACKAGE_VERSION");
    if let Ok(v) = env::var("HAZEL_PACKAGE_VERSION") {
        println!("cargo:rustc-env=HAZEL_PACKAGE_VERSION={v}");
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const PKG_NAME: &str = env!("CARGO_PKG_NAME");

const RUSTC_VERSION: &str = env!("HAZEL_BUILD_RUSTC_VERSION");
const RUSTC_CHANNEL: &str = env!("HAZEL_BUILD_RUSTC_CHANNEL");

const BUILD_TARGET: &str = env!("HAZEL_BUILD_TARGET");
const BUILD_PROFILE: &str = env!("HAZEL_BUILD_PROFILE");

pub(crate) const BUILD_DATE: &str = env!("HAZEL_BUILD_DATE");
pub(crate) const BUILD_COMMIT: &str = env!("HAZEL_BUILD_COMMIT");

const PACKAGE_VERSION: Option<&str> = option_env!("HAZEL_PACKAGE_VERSION");

/// The version reported in log records, the package version if set.
pub(crate) fn product_version() -> &'static str {
    PACKAGE_VERSION.unwrap_or(VERSION)
}

pub(crate) fn print_version(verbose_level: u8) {
    println!("{PKG_NAME} {VERSION}");
    if verbose_level > 0 {
        println!("Compiler: {RUSTC_VERSION} ({RUSTC_CHANNEL})");
        println!("Commit: {BUILD_COMMIT}, Date: {BUILD_DATE}");
    }
    if verbose_level > 1 {
        println!("Target: {BUILD_TARGET}, Profile: {BUILD_PROFILE}");
        if let Some(package_version) = PACKAGE_VERSION {
            println!("Package Version: {package_version}");
        }
    }
}

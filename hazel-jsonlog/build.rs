/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

fn main() {
    hazel_build_env::check_basic();
    hazel_build_env::check_git_commit();
}

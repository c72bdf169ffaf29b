/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2024-2025 ByteDance and/or its affiliates.
 */

mod basic;
pub use basic::check_basic;

mod git;
pub use git::check_git_commit;

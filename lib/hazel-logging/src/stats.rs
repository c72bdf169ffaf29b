/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default, Debug, Eq, PartialEq)]
pub struct LayoutSnapshot {
    pub total: u64,
    pub passed: u64,
    pub suppressed: u64,
    pub degraded: u64,
    pub size: u64,
}

#[derive(Default, Debug)]
pub struct LayoutStats {
    total: AtomicU64,
    passed: AtomicU64,
    suppressed: AtomicU64,
    degraded: AtomicU64,
    size: AtomicU64,
}

impl LayoutStats {
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            total: self.total.load(Ordering::Relaxed),
            passed: self.passed.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
            size: self.size.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn add_total(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_passed(&self) {
        self.passed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_degraded(&self) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_size(&self, size: usize) {
        self.size.fetch_add(size as u64, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot() {
        let stats = LayoutStats::default();
        stats.add_total();
        stats.add_total();
        stats.add_total();
        stats.add_passed();
        stats.add_size(10);
        stats.add_suppressed();
        stats.add_degraded();
        stats.add_size(5);

        assert_eq!(
            stats.snapshot(),
            LayoutSnapshot {
                total: 3,
                passed: 1,
                suppressed: 1,
                degraded: 1,
                size: 15,
            }
        );
    }
}

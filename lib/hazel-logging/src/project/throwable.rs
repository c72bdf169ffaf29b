/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ErrorChain;

const CAUSED_BY: &str = "Caused by: ";

/// Render an error chain as a multi line text.
///
/// The renderer must be started before use, or the output is always empty.
#[derive(Debug, Default)]
pub struct ThrowableRenderer {
    max_depth: Option<usize>,
    started: AtomicBool,
}

impl ThrowableRenderer {
    pub fn new() -> Self {
        ThrowableRenderer::default()
    }

    /// Only keep the first `depth` errors of the chain, `0` means no limit.
    pub fn with_max_depth(depth: usize) -> Self {
        ThrowableRenderer {
            max_depth: if depth > 0 { Some(depth) } else { None },
            started: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.started.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    pub fn render(&self, chain: &ErrorChain) -> String {
        if !self.is_started() {
            return String::new();
        }

        let messages = chain.messages();
        let total = messages.len();
        let shown = match self.max_depth {
            Some(depth) => total.min(depth),
            None => total,
        };

        let mut buf = String::new();
        for (i, msg) in messages[..shown].iter().enumerate() {
            if i > 0 {
                buf.push('\n');
                buf.push_str(CAUSED_BY);
            }
            buf.push_str(msg);
        }
        if shown < total {
            let _ = write!(buf, "\n... {} more", total - shown);
        }
        buf
    }
}

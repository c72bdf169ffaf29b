/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use serde_json::Value;

use hazel_datetime::TimestampFormatter;

use super::{EventProjector, ThrowableRenderer, keys};
use crate::{BuildMetadata, FieldMap, LayoutConfig, LogEvent};

/// Projector for generic application log events.
///
/// Diagnostic properties are merged after the fixed fields and may
/// overwrite them. Every event is projected, even one with an empty message.
#[derive(Debug)]
pub struct ClassicJsonLayout {
    metadata: BuildMetadata,
    throwable: ThrowableRenderer,
}

impl ClassicJsonLayout {
    pub fn new(metadata: BuildMetadata) -> Self {
        ClassicJsonLayout {
            metadata,
            throwable: ThrowableRenderer::new(),
        }
    }

    /// Apply the exception depth limit of the config.
    pub fn with_config(metadata: BuildMetadata, config: &LayoutConfig) -> Self {
        ClassicJsonLayout::new(metadata).with_exception_max_depth(config.exception_max_depth())
    }

    pub fn with_exception_max_depth(mut self, depth: Option<usize>) -> Self {
        self.throwable = ThrowableRenderer::with_max_depth(depth.unwrap_or_default());
        self
    }

    #[inline]
    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    #[inline]
    pub fn throwable_renderer(&self) -> &ThrowableRenderer {
        &self.throwable
    }
}

impl EventProjector for ClassicJsonLayout {
    type Event = LogEvent;

    fn start(&self) {
        self.throwable.start();
    }

    fn stop(&self) {
        self.throwable.stop();
    }

    fn project(&self, event: &LogEvent, timestamp: &TimestampFormatter) -> FieldMap {
        let mut map = FieldMap::new();
        super::put_timestamp(&mut map, timestamp, event.timestamp_millis);
        super::put_str(&mut map, keys::MESSAGE, &event.message);
        super::put_str(&mut map, keys::THREAD, &event.thread_name);
        super::put_str(&mut map, keys::LOG_CONTEXT, &event.context_name);
        super::put_str(&mut map, keys::LOG_LEVEL, &event.level);
        super::put_str(&mut map, keys::LOG_NAME, &event.logger_name);
        super::put_metadata(&mut map, &self.metadata);
        super::merge_properties(&mut map, &event.properties);

        if let Some(chain) = &event.error {
            let stack = self.throwable.render(chain);
            if !stack.is_empty() {
                map.insert(keys::EXCEPTION.to_string(), Value::String(stack));
            }
        }

        map
    }
}

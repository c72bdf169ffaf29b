/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use serde_json::{Number, Value};

use hazel_datetime::TimestampFormatter;

use super::{EventProjector, keys};
use crate::{AccessEvent, BuildMetadata, FieldMap, LayoutConfig};

/// Projector for http access events.
#[derive(Debug)]
pub struct AccessJsonLayout {
    metadata: BuildMetadata,
    skip_paths: Vec<String>,
}

impl AccessJsonLayout {
    pub fn new(metadata: BuildMetadata) -> Self {
        AccessJsonLayout {
            metadata,
            skip_paths: Vec::new(),
        }
    }

    /// Apply the skip paths of the config.
    pub fn with_config(metadata: BuildMetadata, config: &LayoutConfig) -> Self {
        AccessJsonLayout::new(metadata).with_skip_paths(config.access_skip_paths().iter().cloned())
    }

    /// Requests to these exact paths are not logged, health checks for example.
    pub fn with_skip_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    fn skipped(&self, path: &str) -> bool {
        self.skip_paths.iter().any(|p| p == path)
    }
}

fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

impl EventProjector for AccessJsonLayout {
    type Event = AccessEvent;

    fn project(&self, event: &AccessEvent, timestamp: &TimestampFormatter) -> FieldMap {
        let mut map = FieldMap::new();
        if self.skipped(&event.path) {
            return map;
        }

        let message = format!(
            "{} {} {} :: {} {} [{}] [{}]",
            event.method,
            event.version,
            event.path,
            event.status,
            event.reason_phrase(),
            event.user_agent.as_deref().unwrap_or("-"),
            format_duration(event.duration),
        );

        super::put_timestamp(&mut map, timestamp, event.timestamp_millis);
        map.insert(keys::MESSAGE.to_string(), Value::String(message));
        super::put_str(&mut map, keys::HTTP_METHOD, &event.method);
        super::put_str(&mut map, keys::HTTP_VERSION, &event.version);
        super::put_str(&mut map, keys::HTTP_PATH, &event.path);
        map.insert(keys::HTTP_STATUS.to_string(), Value::from(event.status));
        if let Some(ua) = &event.user_agent {
            super::put_str(&mut map, keys::HTTP_USER_AGENT, ua);
        }
        let millis = event.duration.as_nanos() as f64 / 1_000_000.0;
        let millis = Number::from_f64(millis).map(Value::Number).unwrap_or(Value::Null);
        map.insert(keys::HTTP_DURATION_MS.to_string(), millis);
        super::put_metadata(&mut map, &self.metadata);
        super::merge_properties(&mut map, &event.properties);
        map
    }
}

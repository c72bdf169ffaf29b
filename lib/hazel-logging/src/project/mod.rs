/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use serde_json::Value;

use hazel_datetime::TimestampFormatter;

use crate::{BuildMetadata, FieldMap};

mod throwable;
pub use throwable::ThrowableRenderer;

mod classic;
pub use classic::ClassicJsonLayout;

mod access;
pub use access::AccessJsonLayout;

pub const PRODUCT_NAME: &str = "Hazel";
pub const VENDOR_NAME: &str = "Noelware";

pub mod keys {
    pub const TIMESTAMP: &str = "@timestamp";
    pub const MESSAGE: &str = "message";
    pub const THREAD: &str = "thread";
    pub const LOG_CONTEXT: &str = "log.context";
    pub const LOG_LEVEL: &str = "log.level";
    pub const LOG_NAME: &str = "log.name";
    pub const DISTRIBUTION: &str = "hazel.distribution";
    pub const BUILD_DATE: &str = "hazel.build.date";
    pub const GIT_COMMIT: &str = "hazel.git.commit";
    pub const VERSION: &str = "hazel.version";
    pub const PRODUCT: &str = "metadata.product";
    pub const VENDOR: &str = "metadata.vendor";
    pub const DEDICATED_NODE: &str = "metadata.dedi.node";
    pub const EXCEPTION: &str = "exception";

    pub const HTTP_METHOD: &str = "http.method";
    pub const HTTP_VERSION: &str = "http.version";
    pub const HTTP_PATH: &str = "http.path";
    pub const HTTP_STATUS: &str = "http.status";
    pub const HTTP_USER_AGENT: &str = "http.user_agent";
    pub const HTTP_DURATION_MS: &str = "http.duration_ms";
}

/// Build the field map for one kind of event.
///
/// An empty map means the event should not be logged.
pub trait EventProjector {
    type Event;

    /// Called once before the first projection.
    fn start(&self) {}

    /// Called once on shutdown.
    fn stop(&self) {}

    fn project(&self, event: &Self::Event, timestamp: &TimestampFormatter) -> FieldMap;
}

fn put_str(map: &mut FieldMap, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}

/// The raw millis value is used if the timestamp can not be represented.
fn put_timestamp(map: &mut FieldMap, timestamp: &TimestampFormatter, millis: i64) {
    let value = match timestamp.format_millis(millis) {
        Some(s) => Value::String(s),
        None => Value::from(millis),
    };
    map.insert(keys::TIMESTAMP.to_string(), value);
}

fn put_metadata(map: &mut FieldMap, metadata: &BuildMetadata) {
    put_str(map, keys::DISTRIBUTION, metadata.distribution().as_str());
    put_str(map, keys::BUILD_DATE, metadata.build_date());
    put_str(map, keys::GIT_COMMIT, metadata.commit_hash());
    put_str(map, keys::VERSION, metadata.version());
    put_str(map, keys::PRODUCT, PRODUCT_NAME);
    put_str(map, keys::VENDOR, VENDOR_NAME);
    if let Some(node) = metadata.dedicated_node() {
        put_str(map, keys::DEDICATED_NODE, node);
    }
}

fn merge_properties(map: &mut FieldMap, properties: &FieldMap) {
    for (k, v) in properties {
        map.insert(k.clone(), v.clone());
    }
}

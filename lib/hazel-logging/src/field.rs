/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};

use serde_json::Value;

/// Ordered json object map.
///
/// The crate enables the `preserve_order` feature of serde_json, so the
/// output keeps insertion order, and overwriting an existing key keeps its
/// original position.
pub type FieldMap = serde_json::Map<String, Value>;

/// Render the map as `{k1=v1, k2=v2}`.
///
/// Strings are written without quotes, nested objects and arrays are
/// rendered recursively. This never fails, so it is used as the output of
/// last resort when the json formatter fails.
pub fn to_plain_string(map: &FieldMap) -> String {
    let mut buf = String::with_capacity(256);
    // writing to a String never fails
    let _ = write_plain_map(&mut buf, map);
    buf
}

fn write_plain_map(buf: &mut String, map: &FieldMap) -> fmt::Result {
    buf.push('{');
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        buf.push_str(k);
        buf.push('=');
        write_plain_value(buf, v)?;
    }
    buf.push('}');
    Ok(())
}

fn write_plain_value(buf: &mut String, value: &Value) -> fmt::Result {
    match value {
        Value::Null => buf.push_str("null"),
        Value::Bool(b) => write!(buf, "{b}")?,
        Value::Number(n) => write!(buf, "{n}")?,
        Value::String(s) => buf.push_str(s),
        Value::Array(a) => {
            buf.push('[');
            for (i, v) in a.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                write_plain_value(buf, v)?;
            }
            buf.push(']');
        }
        Value::Object(m) => write_plain_map(buf, m)?,
    }
    Ok(())
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::{FieldMap, FormatError, JsonFormatter};

/// Compact json output by serde_json.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerdeJsonFormatter;

impl JsonFormatter for SerdeJsonFormatter {
    fn format(&self, map: &FieldMap) -> Result<String, FormatError> {
        let s = serde_json::to_string(map)?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keep_order() {
        let mut map = FieldMap::new();
        map.insert("z".to_string(), json!("last"));
        map.insert("a".to_string(), json!({"k": [1, 2]}));
        map.insert("m".to_string(), json!("中文"));
        let s = SerdeJsonFormatter.format(&map).unwrap();
        assert_eq!(s, r#"{"z":"last","a":{"k":[1,2]},"m":"中文"}"#);
    }

    #[test]
    fn escape_control() {
        let mut map = FieldMap::new();
        map.insert("message".to_string(), json!("a\"b\nc"));
        let s = SerdeJsonFormatter.format(&map).unwrap();
        assert_eq!(s, r#"{"message":"a\"b\nc"}"#);
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::Arguments;

use log::warn;
use serde_json::{Number, Value};

use crate::{ErrorChain, FieldMap};

/// Collect slog key-values into event properties.
///
/// The first value emitted as an error becomes the error chain of the event,
/// later errors are kept as plain string properties.
#[derive(Default)]
pub(super) struct PropertyCollector {
    properties: FieldMap,
    error: Option<ErrorChain>,
}

impl PropertyCollector {
    pub(super) fn into_parts(self) -> (FieldMap, Option<ErrorChain>) {
        (self.properties, self.error)
    }

    fn insert(&mut self, key: slog::Key, value: Value) {
        self.properties.insert(key.to_string(), value);
    }

    fn emit_float(&mut self, key: slog::Key, val: f64) -> slog::Result {
        let value = match Number::from_f64(val) {
            Some(n) => Value::Number(n),
            None => Value::String(val.to_string()),
        };
        self.insert(key, value);
        Ok(())
    }
}

impl slog::Serializer for PropertyCollector {
    impl_integer_into_value!(usize => emit_usize);
    impl_integer_into_value!(isize => emit_isize);
    impl_integer_into_value!(u8 => emit_u8);
    impl_integer_into_value!(i8 => emit_i8);
    impl_integer_into_value!(u16 => emit_u16);
    impl_integer_into_value!(i16 => emit_i16);
    impl_integer_into_value!(u32 => emit_u32);
    impl_integer_into_value!(i32 => emit_i32);
    impl_integer_into_value!(u64 => emit_u64);
    impl_integer_into_value!(i64 => emit_i64);
    impl_float_into_value!(f32 => emit_f32);
    impl_float_into_value!(f64 => emit_f64);

    fn emit_bool(&mut self, key: slog::Key, val: bool) -> slog::Result {
        self.insert(key, Value::Bool(val));
        Ok(())
    }

    fn emit_char(&mut self, key: slog::Key, val: char) -> slog::Result {
        self.insert(key, Value::String(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.insert(key, Value::String(val.to_string()));
        Ok(())
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.insert(key, Value::Null);
        Ok(())
    }

    fn emit_none(&mut self, key: slog::Key) -> slog::Result {
        self.insert(key, Value::Null);
        Ok(())
    }

    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments) -> slog::Result {
        let s = match val.as_str() {
            Some(s) => s.to_string(),
            None => val.to_string(),
        };
        self.insert(key, Value::String(s));
        Ok(())
    }

    /// A value that can not be converted to json is kept as the error text,
    /// the record itself is still logged.
    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let value = match serde_json::to_value(val.as_serde()) {
            Ok(v) => v,
            Err(e) => {
                warn!("serde serialization error for key {key}: {e}");
                Value::String(format!("<unserializable: {e}>"))
            }
        };
        self.insert(key, value);
        Ok(())
    }

    fn emit_error(
        &mut self,
        key: slog::Key,
        error: &(dyn std::error::Error + 'static),
    ) -> slog::Result {
        if self.error.is_none() {
            self.error = Some(ErrorChain::capture(error));
        } else {
            self.insert(key, Value::String(error.to_string()));
        }
        Ok(())
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

macro_rules! impl_integer_into_value {
    ($(#[$m:meta])* $t:ty => $f:ident) => {
        $(#[$m])*
        fn $f(&mut self, key: slog::Key, val: $t) -> slog::Result {
            self.insert(key, serde_json::Value::from(val));
            Ok(())
        }
    };
}

macro_rules! impl_float_into_value {
    ($(#[$m:meta])* $t:ty => $f:ident) => {
        $(#[$m])*
        fn $f(&mut self, key: slog::Key, val: $t) -> slog::Result {
            self.emit_float(key, f64::from(val))
        }
    };
}

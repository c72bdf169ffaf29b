/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::str::FromStr;

use crate::{ConfigError, FieldMap, FormatError};

mod compact;
pub use compact::SerdeJsonFormatter;

mod ascii;
pub use ascii::AsciiJsonFormatter;

/// Serialize a field map into one json object string.
///
/// Implementations should not keep per call state, the same formatter is
/// used from all logging threads.
pub trait JsonFormatter {
    fn format(&self, map: &FieldMap) -> Result<String, FormatError>;
}

pub type BoxJsonFormatter = Box<dyn JsonFormatter + Send + Sync + UnwindSafe + RefUnwindSafe>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JsonFormatterKind {
    #[default]
    Compact,
    Ascii,
}

impl JsonFormatterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonFormatterKind::Compact => "compact",
            JsonFormatterKind::Ascii => "ascii",
        }
    }

    pub fn build(self) -> BoxJsonFormatter {
        match self {
            JsonFormatterKind::Compact => Box::new(SerdeJsonFormatter),
            JsonFormatterKind::Ascii => Box::new(AsciiJsonFormatter),
        }
    }
}

impl fmt::Display for JsonFormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonFormatterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "default" | "serde" | "serde_json" => Ok(JsonFormatterKind::Compact),
            "ascii" => Ok(JsonFormatterKind::Ascii),
            _ => Err(ConfigError::UnknownFormatter(s.to_string())),
        }
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::{FieldMap, FormatError, JsonFormatter};

/// Compact json output with all non-ascii chars escaped as `\uXXXX`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiJsonFormatter;

impl JsonFormatter for AsciiJsonFormatter {
    fn format(&self, map: &FieldMap) -> Result<String, FormatError> {
        let mut buf = Vec::with_capacity(256);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiEscape);
        map.serialize(&mut serializer)?;
        let s = String::from_utf8(buf)?;
        Ok(s)
    }
}

struct AsciiEscape;

impl Formatter for AsciiEscape {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(&bytes[start..i])?;
            }
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        if start < bytes.len() {
            writer.write_all(&bytes[start..])?;
        }
        Ok(())
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use hazel_datetime::{DatePattern, LogTimezone, TimestampFormatter};

use crate::event::DEFAULT_CONTEXT_NAME;
use crate::{ConfigError, JsonFormatterKind};

#[cfg(feature = "yaml")]
mod yaml;

/// Tunables of a json layout and its projectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    timestamp: TimestampFormatter,
    formatter: JsonFormatterKind,
    context_name: String,
    exception_max_depth: Option<usize>,
    access_skip_paths: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            timestamp: TimestampFormatter::default(),
            formatter: JsonFormatterKind::default(),
            context_name: DEFAULT_CONTEXT_NAME.to_string(),
            exception_max_depth: None,
            access_skip_paths: Vec::new(),
        }
    }
}

pub(crate) fn parse_timestamp_format(pattern: &str) -> Result<DatePattern, ConfigError> {
    DatePattern::parse(pattern).map_err(|e| ConfigError::InvalidTimestampFormat {
        pattern: pattern.to_string(),
        source: e,
    })
}

pub(crate) fn parse_timezone(id: &str) -> Result<LogTimezone, ConfigError> {
    LogTimezone::from_str(id).map_err(|e| ConfigError::InvalidTimezone {
        id: id.to_string(),
        source: e,
    })
}

impl LayoutConfig {
    #[inline]
    pub fn timestamp(&self) -> &TimestampFormatter {
        &self.timestamp
    }

    pub fn set_timestamp_format(&mut self, pattern: &str) -> Result<(), ConfigError> {
        let pattern = parse_timestamp_format(pattern)?;
        self.timestamp.set_pattern(pattern);
        Ok(())
    }

    pub fn set_timezone(&mut self, id: &str) -> Result<(), ConfigError> {
        let timezone = parse_timezone(id)?;
        self.timestamp.set_timezone(timezone);
        Ok(())
    }

    #[inline]
    pub fn formatter(&self) -> JsonFormatterKind {
        self.formatter
    }

    pub fn set_formatter(&mut self, name: &str) -> Result<(), ConfigError> {
        self.formatter = JsonFormatterKind::from_str(name)?;
        Ok(())
    }

    #[inline]
    pub fn context_name(&self) -> &str {
        &self.context_name
    }

    pub fn set_context_name(&mut self, name: impl Into<String>) {
        self.context_name = name.into();
    }

    #[inline]
    pub fn exception_max_depth(&self) -> Option<usize> {
        self.exception_max_depth
    }

    /// `0` means no limit.
    pub fn set_exception_max_depth(&mut self, depth: usize) {
        self.exception_max_depth = if depth > 0 { Some(depth) } else { None };
    }

    #[inline]
    pub fn access_skip_paths(&self) -> &[String] {
        &self.access_skip_paths
    }

    pub fn set_access_skip_paths(&mut self, paths: Vec<String>) {
        self.access_skip_paths = paths;
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use chrono::{DateTime, Utc};

use crate::{DatePattern, LogTimezone};

pub const DEFAULT_TIMESTAMP_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ssXXX";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimestampFormatter {
    pattern: DatePattern,
    timezone: LogTimezone,
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        // the default pattern is a compile time constant known to be valid
        let pattern = DatePattern::parse(DEFAULT_TIMESTAMP_PATTERN).unwrap();
        TimestampFormatter::new(pattern, LogTimezone::default())
    }
}

impl TimestampFormatter {
    pub fn new(pattern: DatePattern, timezone: LogTimezone) -> Self {
        TimestampFormatter { pattern, timezone }
    }

    #[inline]
    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    #[inline]
    pub fn timezone(&self) -> &LogTimezone {
        &self.timezone
    }

    pub fn set_pattern(&mut self, pattern: DatePattern) {
        self.pattern = pattern;
    }

    pub fn set_timezone(&mut self, timezone: LogTimezone) {
        self.timezone = timezone;
    }

    pub fn format_datetime(&self, utc: &DateTime<Utc>) -> String {
        let local = self.timezone.localize(utc);
        if self.pattern.needs_zone_name() {
            let label = self.timezone.zone_label(utc);
            self.pattern.format(&local, Some(&label))
        } else {
            self.pattern.format(&local, None)
        }
    }

    /// Returns `None` if the timestamp is out of the supported range.
    pub fn format_millis(&self, millis: i64) -> Option<String> {
        let utc = DateTime::from_timestamp_millis(millis)?;
        Some(self.format_datetime(&utc))
    }
}

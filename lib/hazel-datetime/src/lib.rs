/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod pattern;
pub use pattern::{DatePattern, PatternError};

mod timezone;
pub use timezone::{LogTimezone, TimezoneError, ZoneLabel};

mod formatter;
pub use formatter::{DEFAULT_TIMESTAMP_PATTERN, TimestampFormatter};

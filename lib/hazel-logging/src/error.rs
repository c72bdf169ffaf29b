/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use hazel_datetime::{PatternError, TimezoneError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timestamp format {pattern:?}: {source}")]
    InvalidTimestampFormat {
        pattern: String,
        source: PatternError,
    },
    #[error("invalid timezone {id:?}: {source}")]
    InvalidTimezone { id: String, source: TimezoneError },
    #[error("unknown json formatter {0:?}")]
    UnknownFormatter(String),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("json serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid utf-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("unsupported value for key {key}: {reason}")]
    Unsupported { key: String, reason: String },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("layout is not started")]
    NotStarted,
    #[error("layout has been stopped")]
    Stopped,
}

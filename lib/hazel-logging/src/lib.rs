/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Structured json layout for hazel logs.
//!
//! A [`JsonLayout`] turns one event into one line of json. The fields are
//! collected by an [`EventProjector`] for the kind of the event, and then
//! serialized by the active [`JsonFormatter`]. A failure in the formatter is
//! never returned to the caller, the fields are printed as plain `key=value`
//! text instead.

mod error;
pub use error::{ConfigError, FormatError, LifecycleError};

pub mod field;
pub use field::FieldMap;

pub mod format;
pub use format::{BoxJsonFormatter, JsonFormatter, JsonFormatterKind};

mod metadata;
pub use metadata::{BuildMetadata, Distribution};

mod event;
pub use event::{AccessEvent, ErrorChain, LogEvent};

pub mod project;
pub use project::{AccessJsonLayout, ClassicJsonLayout, EventProjector, ThrowableRenderer};

mod stats;
pub use stats::{LayoutSnapshot, LayoutStats};

mod layout;
pub use layout::JsonLayout;

mod config;
pub use config::LayoutConfig;

mod drain;
pub use drain::JsonLayoutDrain;

pub use hazel_datetime::{LogTimezone, TimestampFormatter};

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::sync::Mutex;

use log::warn;
use slog::{Drain, KV, OwnedKVList, Record};

use crate::event::DEFAULT_CONTEXT_NAME;
use crate::{ClassicJsonLayout, EventProjector, JsonLayout, LayoutConfig, LogEvent};

#[macro_use]
mod macros;

mod collect;
use collect::PropertyCollector;

/// A slog drain writing one json line for each record.
///
/// The layout should be started before the drain is installed, records
/// logged outside of the started state are returned as errors. Records the
/// projector suppresses are not written.
pub struct JsonLayoutDrain<W: Write, P = ClassicJsonLayout>
where
    P: EventProjector<Event = LogEvent>,
{
    layout: JsonLayout<P>,
    context_name: String,
    logger_name: Option<String>,
    writer: Mutex<W>,
}

impl<W, P> JsonLayoutDrain<W, P>
where
    W: Write,
    P: EventProjector<Event = LogEvent>,
{
    pub fn new(layout: JsonLayout<P>, writer: W) -> Self {
        JsonLayoutDrain {
            layout,
            context_name: DEFAULT_CONTEXT_NAME.to_string(),
            logger_name: None,
            writer: Mutex::new(writer),
        }
    }

    /// Take the context name from the config.
    pub fn with_config(layout: JsonLayout<P>, writer: W, config: &LayoutConfig) -> Self {
        JsonLayoutDrain::new(layout, writer).with_context_name(config.context_name())
    }

    pub fn with_context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = name.into();
        self
    }

    /// Use a fixed logger name instead of the tag or module of each record.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    #[inline]
    pub fn layout(&self) -> &JsonLayout<P> {
        &self.layout
    }

    #[inline]
    pub fn context_name(&self) -> &str {
        &self.context_name
    }

    pub fn stop(&self) {
        self.layout.stop();
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }

    fn build_event(&self, record: &Record, values: &OwnedKVList) -> LogEvent {
        let mut collector = PropertyCollector::default();
        // a failing value should not cost the whole record
        if let Err(e) = values.serialize(record, &mut collector) {
            warn!("failed to collect logger values: {e}");
        }
        if let Err(e) = record.kv().serialize(record, &mut collector) {
            warn!("failed to collect record values: {e}");
        }
        let (properties, error) = collector.into_parts();

        let logger_name = match &self.logger_name {
            Some(name) => name.as_str(),
            None if record.tag().is_empty() => record.module(),
            None => record.tag(),
        };

        LogEvent {
            properties,
            error,
            context_name: self.context_name.clone(),
            ..LogEvent::new(
                record.level().as_str(),
                logger_name,
                record.msg().to_string(),
            )
        }
    }
}

impl<W, P> Drain for JsonLayoutDrain<W, P>
where
    W: Write,
    P: EventProjector<Event = LogEvent>,
{
    type Ok = ();
    type Err = slog::Error;

    fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Error> {
        let event = self.build_event(record, values);
        let line = match self.layout.render(&event) {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(e) => return Err(io::Error::other(e).into()),
        };

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use log::warn;

use hazel_datetime::{LogTimezone, TimestampFormatter};

use crate::config;
use crate::field::to_plain_string;
use crate::{
    BoxJsonFormatter, ConfigError, EventProjector, JsonFormatter, JsonFormatterKind,
    LayoutConfig, LayoutStats, LifecycleError,
};

const STATE_CREATED: u8 = 0;
const STATE_STARTED: u8 = 1;
const STATE_STOPPED: u8 = 2;

/// Render events of one kind as single line json.
///
/// The configuration can only be changed through `&mut self`, which means
/// before the layout is shared with the logging threads. `render` can then
/// be called concurrently.
///
/// The layout moves from created to started to stopped, and can not be
/// restarted once stopped.
pub struct JsonLayout<P: EventProjector> {
    projector: P,
    timestamp: TimestampFormatter,
    formatter: BoxJsonFormatter,
    state: AtomicU8,
    stats: Arc<LayoutStats>,
}

impl<P: EventProjector> JsonLayout<P> {
    pub fn new(projector: P) -> Self {
        JsonLayout {
            projector,
            timestamp: TimestampFormatter::default(),
            formatter: JsonFormatterKind::default().build(),
            state: AtomicU8::new(STATE_CREATED),
            stats: Arc::new(LayoutStats::default()),
        }
    }

    /// Apply the timestamp and formatter settings. The projector knobs are
    /// applied by the `with_config` constructors of the projectors.
    pub fn with_config(projector: P, config: &LayoutConfig) -> Self {
        let mut layout = JsonLayout::new(projector);
        layout.set_config(config);
        layout
    }

    #[inline]
    pub fn projector(&self) -> &P {
        &self.projector
    }

    #[inline]
    pub fn timestamp_format(&self) -> &str {
        self.timestamp.pattern().as_str()
    }

    pub fn set_timestamp_format(&mut self, pattern: &str) -> Result<(), ConfigError> {
        let pattern = config::parse_timestamp_format(pattern)?;
        self.timestamp.set_pattern(pattern);
        Ok(())
    }

    #[inline]
    pub fn timezone(&self) -> &LogTimezone {
        self.timestamp.timezone()
    }

    pub fn set_timezone(&mut self, id: &str) -> Result<(), ConfigError> {
        let timezone = config::parse_timezone(id)?;
        self.timestamp.set_timezone(timezone);
        Ok(())
    }

    #[inline]
    pub fn timestamp_formatter(&self) -> &TimestampFormatter {
        &self.timestamp
    }

    #[inline]
    pub fn formatter(&self) -> &dyn JsonFormatter {
        self.formatter.as_ref()
    }

    pub fn set_formatter(&mut self, formatter: BoxJsonFormatter) {
        self.formatter = formatter;
    }

    pub fn set_config(&mut self, config: &LayoutConfig) {
        self.timestamp = config.timestamp().clone();
        self.formatter = config.formatter().build();
    }

    pub fn get_stats(&self) -> Arc<LayoutStats> {
        self.stats.clone()
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_STARTED
    }

    /// Start the projector. Calling it again on a started layout does nothing.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        match self.state.load(Ordering::Acquire) {
            STATE_CREATED => {
                self.projector.start();
                self.state.store(STATE_STARTED, Ordering::Release);
                Ok(())
            }
            STATE_STARTED => Ok(()),
            _ => Err(LifecycleError::Stopped),
        }
    }

    /// Stop the projector. This is safe to call more than once.
    pub fn stop(&self) {
        if self.state.swap(STATE_STOPPED, Ordering::AcqRel) == STATE_STARTED {
            self.projector.stop();
        }
    }

    /// Returns `Ok(None)` if the event should not be logged.
    ///
    /// Formatter errors are not returned. The fields are rendered as plain
    /// text instead and a warning is sent to the `log` facade.
    pub fn render(&self, event: &P::Event) -> Result<Option<String>, LifecycleError> {
        match self.state.load(Ordering::Acquire) {
            STATE_STARTED => {}
            STATE_CREATED => return Err(LifecycleError::NotStarted),
            _ => return Err(LifecycleError::Stopped),
        }

        self.stats.add_total();
        let map = self.projector.project(event, &self.timestamp);
        if map.is_empty() {
            self.stats.add_suppressed();
            return Ok(None);
        }

        let line = match self.formatter.format(&map) {
            Ok(s) => {
                self.stats.add_passed();
                s
            }
            Err(e) => {
                warn!("failed to format log record as json, fallback to plain text: {e}");
                self.stats.add_degraded();
                to_plain_string(&map)
            }
        };
        self.stats.add_size(line.len());
        Ok(Some(line))
    }
}

impl<P: EventProjector> Drop for JsonLayout<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

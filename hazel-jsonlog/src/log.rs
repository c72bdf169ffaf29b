/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::{Arguments, Write as _};
use std::io::{self, Write};

use chrono::Local;
use slog::{Drain, KV, OwnedKVList, Record, o};
use slog_scope::GlobalLoggerGuard;

/// Plain text drain for the diagnostics of this process.
///
/// The lines look like `{time} {level} {msg}, k: v` and go to stderr, so
/// they never mix with the json records on stdout.
struct StderrDrain;

struct KvFormatter<'a> {
    buf: &'a mut String,
}

impl slog::Serializer for KvFormatter<'_> {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments) -> slog::Result {
        let _ = write!(self.buf, ", {key}: {val}");
        Ok(())
    }
}

impl Drain for StderrDrain {
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record, values: &OwnedKVList) -> io::Result<()> {
        let mut buf = String::with_capacity(128);
        let _ = write!(
            buf,
            "{} {} {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
            record.level().as_short_str(),
            record.msg()
        );
        let mut kv_formatter = KvFormatter { buf: &mut buf };
        record.kv().serialize(record, &mut kv_formatter)?;
        values.serialize(record, &mut kv_formatter)?;
        buf.push('\n');

        io::stderr().lock().write_all(buf.as_bytes())
    }
}

pub fn setup(verbose_level: u8) -> Result<GlobalLoggerGuard, log::SetLoggerError> {
    let logger = slog::Logger::root(StderrDrain.ignore_res(), o!());
    let scope_guard = slog_scope::set_global_logger(logger);

    let log_level = match verbose_level {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };

    slog_stdlog::init_with_level(log_level)?;
    Ok(scope_guard)
}

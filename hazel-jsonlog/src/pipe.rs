/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{BufRead, Write};

use anyhow::Context;
use log::debug;
use slog::{Drain, Level, o};

use hazel_logging::{
    BuildMetadata, ClassicJsonLayout, JsonLayout, JsonLayoutDrain, LayoutConfig, LayoutSnapshot,
};

use crate::opts::ProcArgs;

pub fn build_metadata() -> BuildMetadata {
    BuildMetadata::new(
        crate::build::product_version(),
        crate::build::BUILD_COMMIT,
        crate::build::BUILD_DATE,
    )
    .detect_runtime()
}

fn log_line(logger: &slog::Logger, level: Level, line: &str) {
    match level {
        Level::Critical => slog::crit!(logger, "{}", line),
        Level::Error => slog::error!(logger, "{}", line),
        Level::Warning => slog::warn!(logger, "{}", line),
        Level::Info => slog::info!(logger, "{}", line),
        Level::Debug => slog::debug!(logger, "{}", line),
        Level::Trace => slog::trace!(logger, "{}", line),
    }
}

/// Log each non empty input line as one json record on `output`.
pub fn run<R, W>(
    args: &ProcArgs,
    config: &LayoutConfig,
    metadata: BuildMetadata,
    input: R,
    output: W,
) -> anyhow::Result<LayoutSnapshot>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let projector = ClassicJsonLayout::with_config(metadata, config);
    let mut layout = JsonLayout::with_config(projector, config);
    layout.start().context("failed to start json layout")?;
    let stats = layout.get_stats();
    debug!(
        "json layout started, timestamp format: {}, timezone: {}, formatter: {}",
        layout.timestamp_format(),
        layout.timezone(),
        config.formatter()
    );

    let mut drain = JsonLayoutDrain::with_config(layout, output, config);
    if let Some(name) = &args.logger_name {
        drain = drain.with_logger_name(name);
    }
    let logger = slog::Logger::root(drain.ignore_res(), o!());

    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        log_line(&logger, args.level, line);
    }

    // drop the drain to stop the layout
    drop(logger);
    Ok(stats.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn pipe_lines() {
        let args = ProcArgs {
            level: Level::Warning,
            logger_name: Some("hazel.test".to_string()),
            ..Default::default()
        };
        let mut config = LayoutConfig::default();
        config.set_timezone("UTC").unwrap();
        config.set_context_name("pipe");
        let metadata = BuildMetadata::new("1.0.0", "cafebabe", "2024-01-01T00:00:00Z");

        let buf = SharedBuf::default();
        let input = io::Cursor::new("first line\n\n  second line  \n");
        let snap = run(&args, &config, metadata, input, buf.clone()).unwrap();
        assert_eq!(snap.total, 2);
        assert_eq!(snap.passed, 2);

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["message"], "  second line");
        assert_eq!(v["log.level"], "WARN");
        assert_eq!(v["log.name"], "hazel.test");
        assert_eq!(v["log.context"], "pipe");
        assert_eq!(v["hazel.version"], "1.0.0");
    }
}

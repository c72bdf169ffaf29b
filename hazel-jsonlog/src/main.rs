/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use anyhow::Context;
use log::{debug, info};

use hazel_logging::LayoutConfig;

fn main() -> anyhow::Result<()> {
    let Some(proc_args) =
        hazel_jsonlog::opts::parse_clap().context("failed to parse command line options")?
    else {
        return Ok(());
    };

    // set up process logger early, only proc args is used inside
    let _log_guard =
        hazel_jsonlog::log::setup(proc_args.verbose_level).context("failed to setup logger")?;

    let config = match &proc_args.config_file {
        Some(path) => {
            let config = LayoutConfig::load_file(path)?;
            debug!("loaded config from {}", path.display());
            config
        }
        None => LayoutConfig::default(),
    };

    let metadata = hazel_jsonlog::pipe::build_metadata();
    let snap = hazel_jsonlog::pipe::run(
        &proc_args,
        &config,
        metadata,
        io::stdin().lock(),
        io::stdout(),
    )?;
    info!(
        "{} records rendered, {} suppressed, {} degraded, {} bytes",
        snap.passed + snap.degraded,
        snap.suppressed,
        snap.degraded,
        snap.size
    );
    Ok(())
}

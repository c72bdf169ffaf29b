/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint, value_parser};
use clap_complete::Shell;
use slog::Level;

const ARGS_COMPLETION: &str = "completion";
const ARGS_VERSION: &str = "version";
const ARGS_VERBOSE: &str = "verbose";
const ARGS_CONFIG_FILE: &str = "config-file";
const ARGS_LEVEL: &str = "level";
const ARGS_LOGGER_NAME: &str = "logger-name";

const LEVEL_NAMES: [&str; 6] = ["trace", "debug", "info", "warn", "error", "critical"];

#[derive(Debug)]
pub struct ProcArgs {
    pub verbose_level: u8,
    pub config_file: Option<PathBuf>,
    pub level: Level,
    pub logger_name: Option<String>,
}

impl Default for ProcArgs {
    fn default() -> Self {
        ProcArgs {
            verbose_level: 0,
            config_file: None,
            level: Level::Info,
            logger_name: None,
        }
    }
}

fn parse_level(s: &str) -> anyhow::Result<Level> {
    match s {
        "trace" => Ok(Level::Trace),
        "debug" => Ok(Level::Debug),
        "info" => Ok(Level::Info),
        "warn" => Ok(Level::Warning),
        "error" => Ok(Level::Error),
        "critical" => Ok(Level::Critical),
        _ => Err(anyhow!("unsupported log level {s}")),
    }
}

fn build_cli_args() -> Command {
    Command::new(crate::build::PKG_NAME)
        .about("Convert plain text lines from stdin to hazel json log records")
        .disable_version_flag(true)
        .arg(
            Arg::new(ARGS_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(ARGS_VERSION)
                .help("Show version")
                .action(ArgAction::SetTrue)
                .short('V')
                .long("version"),
        )
        .arg(
            Arg::new(ARGS_VERBOSE)
                .help("Show verbose output")
                .action(ArgAction::Count)
                .short('v')
                .long("verbose"),
        )
        .arg(
            Arg::new(ARGS_CONFIG_FILE)
                .help("Layout config file path")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .short('c')
                .long("config-file"),
        )
        .arg(
            Arg::new(ARGS_LEVEL)
                .help("Log level of each input line")
                .num_args(1)
                .value_name("LEVEL")
                .value_parser(LEVEL_NAMES)
                .default_value("info")
                .short('l')
                .long("level"),
        )
        .arg(
            Arg::new(ARGS_LOGGER_NAME)
                .help("Logger name of each input line")
                .num_args(1)
                .value_name("NAME")
                .short('n')
                .long("logger-name"),
        )
}

fn parse_matches(args: &ArgMatches) -> anyhow::Result<ProcArgs> {
    let mut proc_args = ProcArgs {
        verbose_level: args.get_count(ARGS_VERBOSE),
        ..Default::default()
    };
    if let Some(config_file) = args.get_one::<PathBuf>(ARGS_CONFIG_FILE) {
        proc_args.config_file = Some(config_file.clone());
    }
    if let Some(level) = args.get_one::<String>(ARGS_LEVEL) {
        proc_args.level = parse_level(level)?;
    }
    if let Some(name) = args.get_one::<String>(ARGS_LOGGER_NAME) {
        proc_args.logger_name = Some(name.to_string());
    }
    Ok(proc_args)
}

pub fn parse_clap() -> anyhow::Result<Option<ProcArgs>> {
    let args_parser = build_cli_args();
    let args = args_parser.get_matches();

    if let Some(target) = args.get_one::<Shell>(ARGS_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(None);
    }

    let proc_args = parse_matches(&args)?;
    if args.get_flag(ARGS_VERSION) {
        crate::build::print_version(proc_args.verbose_level);
        return Ok(None);
    }

    Ok(Some(proc_args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ProcArgs {
        let args = build_cli_args()
            .try_get_matches_from(argv.iter().copied())
            .unwrap();
        parse_matches(&args).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["hazel-jsonlog"]);
        assert_eq!(args.verbose_level, 0);
        assert_eq!(args.level, Level::Info);
        assert!(args.config_file.is_none());
        assert!(args.logger_name.is_none());
    }

    #[test]
    fn all_options() {
        let args = parse(&[
            "hazel-jsonlog",
            "-vv",
            "-c",
            "/etc/hazel/logging.yaml",
            "-l",
            "error",
            "--logger-name",
            "hazel.server",
        ]);
        assert_eq!(args.verbose_level, 2);
        assert_eq!(args.level, Level::Error);
        assert_eq!(
            args.config_file,
            Some(PathBuf::from("/etc/hazel/logging.yaml"))
        );
        assert_eq!(args.logger_name.as_deref(), Some("hazel.server"));
    }

    #[test]
    fn invalid_level() {
        assert!(
            build_cli_args()
                .try_get_matches_from(["hazel-jsonlog", "-l", "fatal"])
                .is_err()
        );
    }
}

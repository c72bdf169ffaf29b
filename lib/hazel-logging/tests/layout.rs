/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use slog::{Drain, Level, OwnedKVList, Record, RecordStatic, b, o, record_static};

use hazel_logging::{
    AccessEvent, AccessJsonLayout, BuildMetadata, ClassicJsonLayout, Distribution, ErrorChain,
    EventProjector, FieldMap, FormatError, JsonFormatter, JsonLayout, JsonLayoutDrain,
    LayoutConfig, LifecycleError, LogEvent, TimestampFormatter,
};

fn metadata() -> BuildMetadata {
    BuildMetadata::new("1.2.3", "0a1b2c3d", "2024-06-01T12:00:00Z")
        .with_distribution(Distribution::Docker)
}

fn classic_layout() -> JsonLayout<ClassicJsonLayout> {
    let mut layout = JsonLayout::new(ClassicJsonLayout::new(metadata()));
    layout.set_timezone("UTC").unwrap();
    layout
}

fn parse(line: &str) -> serde_json::Map<String, Value> {
    match serde_json::from_str::<Value>(line).unwrap() {
        Value::Object(map) => map,
        v => panic!("not a json object: {v}"),
    }
}

#[test]
fn hello_event() {
    let mut layout = classic_layout();
    layout.start().unwrap();

    let event =
        LogEvent::new("INFO", "hazel::server", "hello").with_timestamp_millis(1_700_000_000_000);
    let line = layout.render(&event).unwrap().unwrap();
    let map = parse(&line);
    assert_eq!(map["message"], "hello");
    assert_eq!(map["log.level"], "INFO");
    assert_eq!(map["@timestamp"], "2023-11-14T22:13:20Z");
    assert!(!map.contains_key("exception"));
    assert!(line.contains(r#""message":"hello""#));
    assert!(line.contains(r#""log.level":"INFO""#));
}

#[test]
fn empty_stack_suppressed() {
    let mut layout = classic_layout();
    layout.start().unwrap();

    let event = LogEvent::new("ERROR", "test", "failed").with_error(ErrorChain::from_messages([""]));
    let line = layout.render(&event).unwrap().unwrap();
    assert!(!parse(&line).contains_key("exception"));
}

#[test]
fn idempotent() {
    let mut layout = classic_layout();
    layout.start().unwrap();

    let event = LogEvent::new("WARN", "test", "same")
        .with_timestamp_millis(1_700_000_000_000)
        .with_thread_name("worker-1")
        .with_property("k", 1);
    let a = layout.render(&event).unwrap();
    let b = layout.render(&event).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fixed_fields_first() {
    let mut layout = classic_layout();
    layout.start().unwrap();

    let event = LogEvent::new("INFO", "test", "order")
        .with_property("zzz", "1")
        .with_property("aaa", "2");
    let line = layout.render(&event).unwrap().unwrap();
    let keys: Vec<String> = parse(&line).keys().cloned().collect();
    let vendor = keys.iter().position(|k| k == "metadata.vendor").unwrap();
    let zzz = keys.iter().position(|k| k == "zzz").unwrap();
    let aaa = keys.iter().position(|k| k == "aaa").unwrap();
    assert_eq!(keys[0], "@timestamp");
    assert!(vendor < zzz);
    assert!(vendor < aaa);
}

#[test]
fn shadowing() {
    let mut layout = classic_layout();
    layout.start().unwrap();

    let event = LogEvent::new("INFO", "test", "original").with_property("message", "from context");
    let line = layout.render(&event).unwrap().unwrap();
    assert_eq!(parse(&line)["message"], "from context");
}

struct FailingFormatter;

impl JsonFormatter for FailingFormatter {
    fn format(&self, _map: &FieldMap) -> Result<String, FormatError> {
        Err(FormatError::Unsupported {
            key: "message".to_string(),
            reason: "test".to_string(),
        })
    }
}

#[test]
fn fallback_contains_all_keys() {
    let mut layout = classic_layout();
    layout.set_formatter(Box::new(FailingFormatter));
    layout.start().unwrap();

    let event = LogEvent::new("INFO", "test", "degraded")
        .with_thread_name("main")
        .with_property("user", "noel");
    let line = layout.render(&event).unwrap().unwrap();
    assert!(line.starts_with('{'));
    assert!(line.ends_with('}'));
    for kv in [
        "message=degraded",
        "thread=main",
        "log.context=default",
        "log.level=INFO",
        "log.name=test",
        "hazel.distribution=docker",
        "hazel.build.date=2024-06-01T12:00:00Z",
        "hazel.git.commit=0a1b2c3d",
        "hazel.version=1.2.3",
        "metadata.product=Hazel",
        "metadata.vendor=Noelware",
        "user=noel",
    ] {
        assert!(line.contains(kv), "{kv} not found in {line}");
    }
    assert!(line.contains("@timestamp="));
    assert_eq!(layout.get_stats().snapshot().degraded, 1);
}

#[test]
fn lifecycle() {
    let mut layout = classic_layout();
    let event = LogEvent::new("INFO", "test", "hello");
    assert_eq!(layout.render(&event).unwrap_err(), LifecycleError::NotStarted);

    layout.start().unwrap();
    assert!(layout.projector().throwable_renderer().is_started());
    layout.stop();
    layout.stop();
    assert!(!layout.projector().throwable_renderer().is_started());
    assert_eq!(layout.render(&event).unwrap_err(), LifecycleError::Stopped);
    assert_eq!(layout.start().unwrap_err(), LifecycleError::Stopped);
}

#[test]
fn concurrent_render() {
    let mut layout = classic_layout();
    layout.start().unwrap();
    let layout = Arc::new(layout);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let layout = layout.clone();
            std::thread::spawn(move || {
                for j in 0..100 {
                    let event = LogEvent::new("INFO", "test", format!("t{i} m{j}"));
                    let line = layout.render(&event).unwrap().unwrap();
                    parse(&line);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = layout.get_stats().snapshot();
    assert_eq!(snap.total, 400);
    assert_eq!(snap.passed, 400);
}

#[test]
fn access_event() {
    let projector = AccessJsonLayout::new(metadata()).with_skip_paths(["/heartbeat"]);
    let mut layout = JsonLayout::new(projector);
    layout.set_timezone("UTC").unwrap();
    layout.start().unwrap();

    let event = AccessEvent::new("GET", "/api/v1/charts", 200, Duration::from_millis(3))
        .with_timestamp_millis(1_700_000_000_000)
        .with_user_agent("helm/3.14");
    let line = layout.render(&event).unwrap().unwrap();
    let map = parse(&line);
    assert_eq!(
        map["message"],
        "GET HTTP/1.1 /api/v1/charts :: 200 OK [helm/3.14] [3.00ms]"
    );
    assert_eq!(map["http.status"], 200);
    assert_eq!(map["hazel.distribution"], "docker");

    let event = AccessEvent::new("GET", "/heartbeat", 200, Duration::ZERO);
    assert_eq!(layout.render(&event).unwrap(), None);
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8(buf.clone())
            .unwrap()
            .lines()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn slog_drain() {
    let buf = SharedBuf::default();
    let mut layout = classic_layout();
    layout.start().unwrap();
    let drain = JsonLayoutDrain::new(layout, buf.clone()).with_context_name("hazel");
    let logger = slog::Logger::root(drain.fuse(), o!("service" => "registry"));

    slog::info!(logger, "server started"; "port" => 8989u16);
    let e = io::Error::other("disk full");
    slog::error!(logger, "failed to write blob"; "error" => slog::ErrorRef(&e));

    let lines = buf.lines();
    assert_eq!(lines.len(), 2);

    let first = parse(&lines[0]);
    assert_eq!(first["message"], "server started");
    assert_eq!(first["log.level"], "INFO");
    assert_eq!(first["log.context"], "hazel");
    assert_eq!(first["service"], "registry");
    assert_eq!(first["port"], 8989);
    assert!(!first.contains_key("exception"));

    let second = parse(&lines[1]);
    assert_eq!(second["log.level"], "ERROR");
    assert_eq!(second["exception"], "disk full");
    assert!(!second.contains_key("error"));
}

#[test]
fn slog_drain_empty_message() {
    let buf = SharedBuf::default();
    let mut layout = classic_layout();
    layout.start().unwrap();
    let logger = slog::Logger::root(JsonLayoutDrain::new(layout, buf.clone()).fuse(), o!());

    slog::warn!(logger, "");

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    let map = parse(&lines[0]);
    assert_eq!(map["message"], "");
    assert_eq!(map["log.level"], "WARN");
}

#[test]
fn slog_drain_nested_values() {
    let buf = SharedBuf::default();
    let mut layout = classic_layout();
    layout.start().unwrap();
    let logger = slog::Logger::root(JsonLayoutDrain::new(layout, buf.clone()).fuse(), o!());

    let mut labels = BTreeMap::new();
    labels.insert("chart".to_string(), "nginx".to_string());
    let mut bad = BTreeMap::new();
    bad.insert(vec![1u8, 2], 3u8);
    slog::info!(logger, "hello"; "labels" => slog::Serde(labels), "bad" => slog::Serde(bad));

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    let map = parse(&lines[0]);
    assert_eq!(map["message"], "hello");
    assert_eq!(map["labels"]["chart"], "nginx");
    assert!(map["bad"].as_str().unwrap().starts_with("<unserializable: "));
}

static RS: RecordStatic<'static> = record_static!(Level::Info, "");

fn log_once<W, P>(drain: &JsonLayoutDrain<W, P>, msg: &str) -> slog::Result
where
    W: Write,
    P: EventProjector<Event = LogEvent>,
{
    let values = OwnedKVList::from(o!());
    drain.log(&Record::new(&RS, &format_args!("{msg}"), b!()), &values)
}

#[test]
fn slog_drain_lifecycle() {
    let drain = JsonLayoutDrain::new(classic_layout(), Vec::new());
    assert!(log_once(&drain, "too early").is_err());
    assert!(drain.into_inner().unwrap().is_empty());

    let mut layout = classic_layout();
    layout.start().unwrap();
    let drain = JsonLayoutDrain::new(layout, Vec::new());
    log_once(&drain, "in time").unwrap();
    drain.stop();
    assert!(log_once(&drain, "too late").is_err());

    let output = String::from_utf8(drain.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(parse(lines[0])["message"], "in time");
}

/// Only keeps events carrying a `keep` property.
struct KeepFilter(ClassicJsonLayout);

impl EventProjector for KeepFilter {
    type Event = LogEvent;

    fn project(&self, event: &LogEvent, timestamp: &TimestampFormatter) -> FieldMap {
        if event.properties.contains_key("keep") {
            self.0.project(event, timestamp)
        } else {
            FieldMap::new()
        }
    }
}

#[test]
fn slog_drain_suppressed() {
    let mut layout = JsonLayout::new(KeepFilter(ClassicJsonLayout::new(metadata())));
    layout.start().unwrap();
    let stats = layout.get_stats();
    let drain = JsonLayoutDrain::new(layout, Vec::new());

    log_once(&drain, "dropped").unwrap();
    let values = OwnedKVList::from(o!("keep" => true));
    drain
        .log(&Record::new(&RS, &format_args!("kept"), b!()), &values)
        .unwrap();

    let output = String::from_utf8(drain.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(parse(lines[0])["message"], "kept");

    let snap = stats.snapshot();
    assert_eq!(snap.total, 2);
    assert_eq!(snap.suppressed, 1);
}

#[test]
fn config_applied() {
    let mut config = LayoutConfig::default();
    config.set_timezone("UTC").unwrap();
    config.set_context_name("registry");
    config.set_access_skip_paths(vec!["/heartbeat".to_string()]);

    let projector = AccessJsonLayout::with_config(metadata(), &config);
    let mut layout = JsonLayout::with_config(projector, &config);
    layout.start().unwrap();
    let event = AccessEvent::new("GET", "/heartbeat", 200, Duration::ZERO);
    assert_eq!(layout.render(&event).unwrap(), None);

    let projector = ClassicJsonLayout::with_config(metadata(), &config);
    let mut layout = JsonLayout::with_config(projector, &config);
    layout.start().unwrap();
    let drain = JsonLayoutDrain::with_config(layout, Vec::new(), &config);
    assert_eq!(drain.context_name(), "registry");
    log_once(&drain, "hello").unwrap();
    let output = String::from_utf8(drain.into_inner().unwrap()).unwrap();
    assert_eq!(parse(output.trim_end())["log.context"], "registry");
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_skip_paths() {
    let config = LayoutConfig::parse_yaml_str(
        r#"
timezone: UTC
access_skip_paths:
  - /heartbeat
"#,
    )
    .unwrap();

    let projector = AccessJsonLayout::with_config(metadata(), &config);
    let mut layout = JsonLayout::with_config(projector, &config);
    layout.start().unwrap();

    let event = AccessEvent::new("GET", "/heartbeat", 200, Duration::ZERO);
    assert_eq!(layout.render(&event).unwrap(), None);

    let event = AccessEvent::new("GET", "/api/v1/charts", 200, Duration::ZERO)
        .with_timestamp_millis(1_700_000_000_000);
    let line = layout.render(&event).unwrap().unwrap();
    assert_eq!(parse(&line)["@timestamp"], "2023-11-14T22:13:20Z");

    let snap = layout.get_stats().snapshot();
    assert_eq!(snap.suppressed, 1);
    assert_eq!(snap.passed, 1);
}

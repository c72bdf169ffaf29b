/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use crate::FieldMap;

pub(crate) const DEFAULT_CONTEXT_NAME: &str = "default";

fn current_thread_name() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}

/// Messages of an error and all of its sources, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorChain {
    messages: Vec<String>,
}

impl ErrorChain {
    pub fn capture(e: &(dyn Error + 'static)) -> Self {
        let mut messages = vec![e.to_string()];
        let mut source = e.source();
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }
        ErrorChain { messages }
    }

    pub fn from_messages<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorChain {
            messages: iter.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A generic application log event.
#[derive(Clone, Debug)]
pub struct LogEvent {
    pub timestamp_millis: i64,
    pub message: String,
    pub thread_name: String,
    pub context_name: String,
    pub level: String,
    pub logger_name: String,
    pub properties: FieldMap,
    pub error: Option<ErrorChain>,
}

impl LogEvent {
    /// Create an event stamped with the current time and thread.
    pub fn new<L, N, M>(level: L, logger_name: N, message: M) -> Self
    where
        L: Into<String>,
        N: Into<String>,
        M: Into<String>,
    {
        LogEvent {
            timestamp_millis: Utc::now().timestamp_millis(),
            message: message.into(),
            thread_name: current_thread_name(),
            context_name: DEFAULT_CONTEXT_NAME.to_string(),
            level: level.into(),
            logger_name: logger_name.into(),
            properties: FieldMap::new(),
            error: None,
        }
    }

    pub fn with_timestamp_millis(mut self, millis: i64) -> Self {
        self.timestamp_millis = millis;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = name.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_error(mut self, error: ErrorChain) -> Self {
        self.error = Some(error);
        self
    }
}

/// A finished http request.
#[derive(Clone, Debug)]
pub struct AccessEvent {
    pub timestamp_millis: i64,
    pub method: String,
    pub version: String,
    pub path: String,
    pub status: u16,
    /// the canonical reason phrase of the status is used if not set
    pub reason: Option<String>,
    pub user_agent: Option<String>,
    pub duration: Duration,
    pub properties: FieldMap,
}

impl AccessEvent {
    pub fn new<M, P>(method: M, path: P, status: u16, duration: Duration) -> Self
    where
        M: Into<String>,
        P: Into<String>,
    {
        AccessEvent {
            timestamp_millis: Utc::now().timestamp_millis(),
            method: method.into(),
            version: "HTTP/1.1".to_string(),
            path: path.into(),
            status,
            reason: None,
            user_agent: None,
            duration,
            properties: FieldMap::new(),
        }
    }

    pub fn with_timestamp_millis(mut self, millis: i64) -> Self {
        self.timestamp_millis = millis;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn reason_phrase(&self) -> &str {
        if let Some(reason) = &self.reason {
            return reason;
        }
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown")
    }
}

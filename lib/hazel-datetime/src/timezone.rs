/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use thiserror::Error;

const MAX_OFFSET_HOURS: u32 = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("empty timezone id")]
    Empty,
    #[error("invalid zone offset {0}")]
    InvalidOffset(String),
    #[error("unknown timezone id {0}")]
    UnknownId(String),
}

/// Names printed for the `z` pattern letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneLabel {
    pub abbreviation: String,
    pub id: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogTimezone {
    /// the host default timezone
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl LogTimezone {
    pub fn localize(&self, utc: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            LogTimezone::Local => utc.with_timezone(&Local).fixed_offset(),
            LogTimezone::Utc => utc.fixed_offset(),
            LogTimezone::Fixed(offset) => utc.with_timezone(offset),
            LogTimezone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
        }
    }

    /// For the host timezone the IANA id is taken from `TZ` or the
    /// `/etc/localtime` link. If neither resolves to a zone with the same
    /// offset, both names are the numeric offset, e.g. `+08:00`.
    pub fn zone_label(&self, utc: &DateTime<Utc>) -> ZoneLabel {
        match self {
            LogTimezone::Local => {
                let local = utc.with_timezone(&Local);
                if let Some(tz) = system_zone() {
                    let named = utc.with_timezone(&tz);
                    if named.fixed_offset().offset() == local.offset() {
                        return ZoneLabel {
                            abbreviation: named.offset().to_string(),
                            id: tz.name().to_string(),
                        };
                    }
                }
                let offset = local.offset().to_string();
                ZoneLabel {
                    abbreviation: offset.clone(),
                    id: offset,
                }
            }
            LogTimezone::Utc => ZoneLabel {
                abbreviation: "UTC".to_string(),
                id: "UTC".to_string(),
            },
            LogTimezone::Fixed(offset) => {
                let s = offset.to_string();
                ZoneLabel {
                    abbreviation: s.clone(),
                    id: s,
                }
            }
            LogTimezone::Named(tz) => ZoneLabel {
                abbreviation: utc.with_timezone(tz).offset().to_string(),
                id: tz.name().to_string(),
            },
        }
    }
}

impl fmt::Display for LogTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTimezone::Local => f.write_str("system"),
            LogTimezone::Utc => f.write_str("UTC"),
            LogTimezone::Fixed(offset) => write!(f, "{offset}"),
            LogTimezone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for LogTimezone {
    type Err = TimezoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimezoneError::Empty);
        }

        match s.to_ascii_uppercase().as_str() {
            "SYSTEM" | "LOCAL" => return Ok(LogTimezone::Local),
            "UTC" | "Z" | "GMT" | "UT" => return Ok(LogTimezone::Utc),
            _ => {}
        }

        if s.starts_with(['+', '-']) {
            return parse_offset(s).map(LogTimezone::Fixed);
        }
        for prefix in ["UTC", "GMT", "UT"] {
            if let Some(left) = s.strip_prefix(prefix) {
                if left.starts_with(['+', '-']) {
                    return parse_offset(left).map(LogTimezone::Fixed);
                }
            }
        }

        Tz::from_str(s)
            .map(LogTimezone::Named)
            .map_err(|_| TimezoneError::UnknownId(s.to_string()))
    }
}

fn system_zone() -> Option<Tz> {
    if let Ok(value) = std::env::var("TZ") {
        return parse_tz_env(&value);
    }
    let target = std::fs::read_link("/etc/localtime").ok()?;
    zone_from_localtime_link(target.to_str()?)
}

/// `TZ` may carry a leading ':' as allowed by POSIX.
fn parse_tz_env(value: &str) -> Option<Tz> {
    let value = value.trim();
    let value = value.strip_prefix(':').unwrap_or(value);
    if value.is_empty() {
        return None;
    }
    Tz::from_str(value).ok()
}

fn zone_from_localtime_link(target: &str) -> Option<Tz> {
    let (_, name) = target.rsplit_once("zoneinfo/")?;
    Tz::from_str(name).ok()
}

fn parse_offset(s: &str) -> Result<FixedOffset, TimezoneError> {
    let invalid = || TimezoneError::InvalidOffset(s.to_string());

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => return Err(invalid()),
    };

    let parts: Vec<&str> = if digits.contains(':') {
        digits.split(':').collect()
    } else {
        match digits.len() {
            1 | 2 => vec![digits],
            4 => vec![&digits[..2], &digits[2..]],
            6 => vec![&digits[..2], &digits[2..4], &digits[4..]],
            _ => return Err(invalid()),
        }
    };
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let mut fields = [0u32; 3];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if i > 0 && part.len() != 2 {
            return Err(invalid());
        }
        fields[i] = u32::from_str(part).map_err(|_| invalid())?;
    }

    let [hours, minutes, seconds] = fields;
    if hours > MAX_OFFSET_HOURS || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    let total = hours * 3600 + minutes * 60 + seconds;
    if total > MAX_OFFSET_HOURS * 3600 {
        return Err(invalid());
    }

    let total = total as i32;
    let total = if negative { -total } else { total };
    FixedOffset::east_opt(total).ok_or_else(invalid)
}

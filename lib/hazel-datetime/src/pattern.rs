/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use thiserror::Error;

use crate::ZoneLabel;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unterminated quote in date pattern")]
    UnterminatedQuote,
    #[error("unsupported pattern letter '{0}'")]
    UnsupportedLetter(char),
    #[error("invalid count {count} for pattern letter '{letter}'")]
    InvalidCount { letter: char, count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PatternItem {
    Literal(String),
    Era,
    Year(usize),
    Month(usize),
    DayOfMonth(usize),
    DayOfYear(usize),
    Weekday(usize),
    WeekdayNumber(usize),
    AmPm,
    Hour0To23(usize),
    Hour1To24(usize),
    Hour0To11(usize),
    Hour1To12(usize),
    Minute(usize),
    Second(usize),
    Millisecond(usize),
    ZoneName(usize),
    Rfc822Offset,
    IsoOffset(usize),
}

/// A compiled Java style date pattern, such as `yyyy-MM-dd'T'HH:mm:ssXXX`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatePattern {
    raw: String,
    items: Vec<PatternItem>,
}

impl DatePattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = raw.chars().collect();
        let mut items: Vec<PatternItem> = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    push_literal(&mut items, "'");
                    i += 2;
                    continue;
                }

                let mut literal = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        Some('\'') => {
                            if chars.get(i + 1) == Some(&'\'') {
                                literal.push('\'');
                                i += 2;
                            } else {
                                i += 1;
                                break;
                            }
                        }
                        Some(ch) => {
                            literal.push(*ch);
                            i += 1;
                        }
                        None => return Err(PatternError::UnterminatedQuote),
                    }
                }
                push_literal(&mut items, &literal);
            } else if c.is_ascii_alphabetic() {
                let start = i;
                while i < chars.len() && chars[i] == c {
                    i += 1;
                }
                items.push(letter_to_item(c, i - start)?);
            } else {
                let mut buf = [0u8; 4];
                push_literal(&mut items, c.encode_utf8(&mut buf));
                i += 1;
            }
        }

        Ok(DatePattern {
            raw: raw.to_string(),
            items,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn needs_zone_name(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, PatternItem::ZoneName(_)))
    }

    pub fn write_to<W: Write>(
        &self,
        w: &mut W,
        dt: &DateTime<FixedOffset>,
        zone: Option<&ZoneLabel>,
    ) -> fmt::Result {
        for item in &self.items {
            match item {
                PatternItem::Literal(s) => w.write_str(s)?,
                PatternItem::Era => {
                    if dt.year() > 0 {
                        w.write_str("AD")?
                    } else {
                        w.write_str("BC")?
                    }
                }
                PatternItem::Year(2) => write_padded(w, dt.year().rem_euclid(100) as u32, 2)?,
                PatternItem::Year(n) => write_padded(w, dt.year().unsigned_abs(), *n)?,
                PatternItem::Month(n) => {
                    let name = MONTH_NAMES[dt.month0() as usize];
                    match n {
                        1 | 2 => write_padded(w, dt.month(), *n)?,
                        3 => w.write_str(&name[..3])?,
                        _ => w.write_str(name)?,
                    }
                }
                PatternItem::DayOfMonth(n) => write_padded(w, dt.day(), *n)?,
                PatternItem::DayOfYear(n) => write_padded(w, dt.ordinal(), *n)?,
                PatternItem::Weekday(n) => {
                    let name = WEEKDAY_NAMES[dt.weekday().num_days_from_monday() as usize];
                    if *n <= 3 {
                        w.write_str(&name[..3])?
                    } else {
                        w.write_str(name)?
                    }
                }
                PatternItem::WeekdayNumber(n) => {
                    write_padded(w, dt.weekday().number_from_monday(), *n)?
                }
                PatternItem::AmPm => {
                    if dt.hour12().0 {
                        w.write_str("PM")?
                    } else {
                        w.write_str("AM")?
                    }
                }
                PatternItem::Hour0To23(n) => write_padded(w, dt.hour(), *n)?,
                PatternItem::Hour1To24(n) => {
                    let hour = if dt.hour() == 0 { 24 } else { dt.hour() };
                    write_padded(w, hour, *n)?
                }
                PatternItem::Hour0To11(n) => write_padded(w, dt.hour() % 12, *n)?,
                PatternItem::Hour1To12(n) => write_padded(w, dt.hour12().1, *n)?,
                PatternItem::Minute(n) => write_padded(w, dt.minute(), *n)?,
                PatternItem::Second(n) => write_padded(w, dt.second(), *n)?,
                PatternItem::Millisecond(n) => {
                    // leap second nanos are folded into the last millisecond
                    let millis = dt.timestamp_subsec_millis().min(999);
                    write_padded(w, millis, *n)?
                }
                PatternItem::ZoneName(n) => {
                    if let Some(zone) = zone {
                        if *n < 4 {
                            w.write_str(&zone.abbreviation)?
                        } else {
                            w.write_str(&zone.id)?
                        }
                    }
                }
                PatternItem::Rfc822Offset => {
                    write_offset(w, dt.offset().local_minus_utc(), false, true)?
                }
                PatternItem::IsoOffset(n) => {
                    let secs = dt.offset().local_minus_utc();
                    if secs == 0 {
                        w.write_char('Z')?
                    } else {
                        match n {
                            1 => write_offset(w, secs, false, false)?,
                            2 => write_offset(w, secs, false, true)?,
                            _ => write_offset(w, secs, true, true)?,
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn format(&self, dt: &DateTime<FixedOffset>, zone: Option<&ZoneLabel>) -> String {
        let mut s = String::with_capacity(self.raw.len() + 8);
        // writing into a String never fails
        let _ = self.write_to(&mut s, dt, zone);
        s
    }
}

fn push_literal(items: &mut Vec<PatternItem>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(PatternItem::Literal(last)) = items.last_mut() {
        last.push_str(s);
    } else {
        items.push(PatternItem::Literal(s.to_string()));
    }
}

fn letter_to_item(letter: char, count: usize) -> Result<PatternItem, PatternError> {
    let item = match letter {
        'G' => PatternItem::Era,
        'y' => PatternItem::Year(count),
        'M' | 'L' => PatternItem::Month(count),
        'd' => PatternItem::DayOfMonth(count),
        'D' => PatternItem::DayOfYear(count),
        'E' => PatternItem::Weekday(count),
        'u' => PatternItem::WeekdayNumber(count),
        'a' => PatternItem::AmPm,
        'H' => PatternItem::Hour0To23(count),
        'k' => PatternItem::Hour1To24(count),
        'K' => PatternItem::Hour0To11(count),
        'h' => PatternItem::Hour1To12(count),
        'm' => PatternItem::Minute(count),
        's' => PatternItem::Second(count),
        'S' => PatternItem::Millisecond(count),
        'z' => PatternItem::ZoneName(count),
        'Z' => PatternItem::Rfc822Offset,
        'X' => {
            if count > 3 {
                return Err(PatternError::InvalidCount { letter, count });
            }
            PatternItem::IsoOffset(count)
        }
        _ => return Err(PatternError::UnsupportedLetter(letter)),
    };
    Ok(item)
}

fn write_padded<W: Write>(w: &mut W, value: u32, width: usize) -> fmt::Result {
    write!(w, "{value:0width$}")
}

fn write_offset<W: Write>(w: &mut W, secs: i32, colon: bool, with_minutes: bool) -> fmt::Result {
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.unsigned_abs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;

    w.write_char(sign)?;
    write_padded(w, hours, 2)?;
    if with_minutes {
        if colon {
            w.write_char(':')?;
        }
        write_padded(w, minutes, 2)?;
    }
    Ok(())
}

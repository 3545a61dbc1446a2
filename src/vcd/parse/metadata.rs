// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use chrono::prelude::*;
use itertools::Itertools;

use super::combinator_atoms::{digit, take_while};
use super::types::ParseResult;
use crate::error::{Error, Result};
use crate::vcd::reader::Cursor;
use crate::vcd::types::{Date, Timescale, TimescaleUnit, Version};

const DATE_FORMAT: &str = "%a %b %e %T %Y";

fn try_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A date is typically composed of the 5 words
/// {Day, Month, Date(number in month), hh:mm:ss, year}, but some simulators
/// shuffle them, so when the usual order fails we try every permutation.
pub(super) fn parse_date(words: &[(String, Cursor)]) -> Date {
    let words = words.iter().map(|(word, _)| word.as_str()).collect_vec();
    let full_date = words.iter().join(" ");

    if let Some(date) = try_date(&full_date) {
        return Date::Parsed(date);
    }

    if words.len() == 5 {
        let permuted = words
            .iter()
            .permutations(words.len())
            .find_map(|permutation| try_date(&permutation.into_iter().join(" ")));
        if let Some(date) = permuted {
            return Date::Parsed(date);
        }
    }

    Date::Raw(full_date)
}

pub(super) fn parse_version(words: &[(String, Cursor)]) -> Version {
    Version(words.iter().map(|(word, _)| word).join(" "))
}

fn parse_unit(unit: &str, cursor: Cursor) -> Result<TimescaleUnit> {
    match unit {
        "fs" => Ok(TimescaleUnit::Fs),
        "ps" => Ok(TimescaleUnit::Ps),
        "ns" => Ok(TimescaleUnit::Ns),
        "us" => Ok(TimescaleUnit::Us),
        "ms" => Ok(TimescaleUnit::Ms),
        "s" => Ok(TimescaleUnit::S),
        _ => Err(Error::Parse {
            cursor,
            message: format!("unknown time unit `{unit}`"),
        }),
    }
}

/// Accepts both `1ps` and `1 ps`.
pub(super) fn parse_timescale(words: &[(String, Cursor)], cursor: Cursor) -> Result<Timescale> {
    let Some((word, cursor)) = words.first() else {
        return Err(Error::Parse {
            cursor,
            message: "empty `$timescale`".to_string(),
        });
    };

    let ParseResult { matched, residual } = take_while(word, digit);
    let magnitude: u32 = matched.parse().map_err(|e| Error::Parse {
        cursor: *cursor,
        message: format!("bad timescale magnitude `{word}`: {e}"),
    })?;

    let unit = if residual.is_empty() {
        let (word, cursor) = words.get(1).ok_or_else(|| Error::Parse {
            cursor: *cursor,
            message: "timescale is missing its unit".to_string(),
        })?;
        parse_unit(word, *cursor)?
    } else {
        parse_unit(residual, *cursor)?
    };

    Ok(Timescale { magnitude, unit })
}

// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Value change section: `#<time>` words and single bit changes.

use crate::error::{Error, Result};
use crate::vcd::reader::Cursor;
use crate::vcd::types::{ScalarValue, Timestamp, Token};

pub(super) fn parse_time(word: &str, cursor: Cursor) -> Result<Token> {
    let value = &word[1..];
    let time = value.parse::<Timestamp>().map_err(|e| Error::Parse {
        cursor,
        message: format!("failed to parse `{value}` as a timestamp: {e}"),
    })?;
    Ok(Token::ChangeTime(time))
}

// 1!
// ^ - level
//  ^ - id_code, always glued onto the level
pub(super) fn parse_scalar_change(word: &str, cursor: Cursor) -> Result<Token> {
    let mut chars = word.chars();
    let level = chars.next().ok_or_else(|| Error::Parse {
        cursor,
        message: "empty value change".to_string(),
    })?;

    let value = match level {
        '0' => ScalarValue::Zero,
        '1' => ScalarValue::One,
        'x' | 'X' | 'z' | 'Z' | 'u' | 'U' | 'w' | 'W' | '-' | 'l' | 'L' | 'h' | 'H' => {
            ScalarValue::DontCare(level)
        }
        _ => {
            return Err(Error::Parse {
                cursor,
                message: format!("`{word}` is neither a keyword nor a value change"),
            })
        }
    };

    let id_code = chars.as_str();
    if id_code.is_empty() {
        return Err(Error::Parse {
            cursor,
            message: format!("value change `{word}` has no identifier"),
        });
    }

    Ok(Token::ChangeScalar {
        id_code: id_code.to_string(),
        value,
    })
}

// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use super::types::ParseResult;

pub(super) fn digit(chr: u8) -> bool {
    chr.is_ascii_digit()
}

pub(super) fn take_until(word: &str, pattern: u8) -> ParseResult<'_> {
    let new_start = word
        .as_bytes()
        .iter()
        .position(|chr| *chr == pattern)
        .unwrap_or(word.len());

    ParseResult {
        matched: &word[0..new_start],
        residual: &word[new_start..],
    }
}

pub(super) fn take_while(word: &str, cond: fn(u8) -> bool) -> ParseResult<'_> {
    let new_start = word
        .as_bytes()
        .iter()
        .position(|chr| !cond(*chr))
        .unwrap_or(word.len());

    ParseResult {
        matched: &word[0..new_start],
        residual: &word[new_start..],
    }
}

/// Matches as much of `pattern` as `word` starts with.
pub(super) fn tag<'a>(word: &'a str, pattern: &str) -> ParseResult<'a> {
    let new_start = word
        .as_bytes()
        .iter()
        .zip(pattern.as_bytes())
        .take_while(|(c_lhs, c_rhs)| c_lhs == c_rhs)
        .count();

    ParseResult {
        matched: &word[0..new_start],
        residual: &word[new_start..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms() {
        let res = take_while("100ps", digit);
        assert_eq!(res.matched, "100");
        assert_eq!(res.residual, "ps");

        let res = take_until("12:34:56", b':');
        assert_eq!(res.matched, "12");
        assert_eq!(res.residual, ":34:56");

        let res = tag("$enddefinitions", "$end");
        assert_eq!(res.matched, "$end");
        assert_eq!(res.residual, "definitions");

        // a partial match only consumes the common prefix
        let res = tag("$var", "$end");
        assert_eq!(res.matched, "$");
        assert!(take_while("ps", digit).matched().is_none());
    }
}

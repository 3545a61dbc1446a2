// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Turns the words of a dump into a lazy stream of typed [`Token`]s.

use std::io::Read;

use log::trace;

use super::reader::{Cursor, WordReader};
use super::types::Token;
use crate::error::{Error, Result};

mod combinator_atoms;
mod events;
mod metadata;
mod scopes;
mod types;

use combinator_atoms::tag;
use types::ParseResult;

/// Forward-only token source over any reader. Yields `Err` at most once,
/// after which the stream is over.
pub struct Tokenizer<R: Read> {
    word_reader: WordReader<R>,
    failed: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(file: R) -> Tokenizer<R> {
        Tokenizer {
            word_reader: WordReader::new(file),
            failed: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let Some((word, cursor)) = self.word_reader.next_word()? else {
                return Ok(None);
            };

            let ParseResult { matched, residual } = tag(&word, "$");
            if matched == "$" {
                match self.parse_keyword(residual, cursor)? {
                    Some(token) => return Ok(Some(token)),
                    None => continue,
                }
            }

            let token = match word.as_bytes()[0] {
                b'#' => events::parse_time(&word, cursor)?,
                b'b' | b'B' => {
                    let (id_code, _) = self.expect_word("a vector identifier")?;
                    Token::ChangeVector {
                        id_code,
                        value: word[1..].to_string(),
                    }
                }
                b'r' | b'R' => {
                    let (id_code, _) = self.expect_word("a real identifier")?;
                    Token::ChangeReal {
                        id_code,
                        value: word[1..].to_string(),
                    }
                }
                _ => events::parse_scalar_change(&word, cursor)?,
            };
            return Ok(Some(token));
        }
    }

    fn parse_keyword(&mut self, keyword: &str, cursor: Cursor) -> Result<Option<Token>> {
        let token = match keyword {
            "date" => {
                let words = self.words_until_end()?;
                Token::Date(metadata::parse_date(&words))
            }
            "version" => {
                let words = self.words_until_end()?;
                Token::Version(metadata::parse_version(&words))
            }
            "timescale" => {
                let words = self.words_until_end()?;
                Token::Timescale(metadata::parse_timescale(&words, cursor)?)
            }
            "scope" => {
                let words = self.words_until_end()?;
                scopes::parse_scope(&words, cursor)?
            }
            "upscope" => {
                self.words_until_end()?;
                Token::Upscope
            }
            "var" => {
                let words = self.words_until_end()?;
                Token::Var(scopes::parse_var(&words, cursor)?)
            }
            "enddefinitions" => {
                self.words_until_end()?;
                Token::EndDefinitions
            }
            "comment" => {
                // although we don't keep comments, we still need to advance
                // past them
                self.words_until_end()?;
                return Ok(None);
            }
            "dumpoff" => Token::DumpOff,
            // the changes inside these sections are ordinary changes, and the
            // `$end` closing them carries no information
            "dumpvars" | "dumpall" | "dumpon" | "end" => {
                trace!("skipping `${keyword}` at {cursor}");
                return Ok(None);
            }
            _ => {
                return Err(Error::Parse {
                    cursor,
                    message: format!("unknown keyword `${keyword}`"),
                })
            }
        };
        Ok(Some(token))
    }

    fn expect_word(&mut self, what: &str) -> Result<(String, Cursor)> {
        let position = self.word_reader.position();
        self.word_reader.next_word()?.ok_or_else(|| Error::Parse {
            cursor: position,
            message: format!("reached end of file while looking for {what}"),
        })
    }

    /// Collects every word up to, but excluding, the next `$end`.
    fn words_until_end(&mut self) -> Result<Vec<(String, Cursor)>> {
        let mut words = vec![];
        loop {
            let (word, cursor) = self.expect_word("`$end`")?;
            if word == "$end" {
                return Ok(words);
            }
            words.push((word, cursor));
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcd::types::*;

    fn tokenize(text: &str) -> Vec<Token> {
        Tokenizer::new(text.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn header_and_body() {
        let text = "\
$date Mon Jan 16 03:04:05 2023 $end
$version ModelSim Version 10.5b $end
$comment anything at all $end
$timescale 1ps $end
$scope module top $end
$var wire 1 ! clk $end
$var wire 1 \" pks_ref [0][12] $end
$upscope $end
$enddefinitions $end
#0
$dumpvars
0!
x\"
b1010 #
r1.5 $
$end
#100
1!
$dumpoff
x!
$end
";
        let tokens = tokenize(text);
        assert!(matches!(tokens[0], Token::Date(Date::Parsed(_))));
        assert_eq!(
            tokens[1],
            Token::Version(Version("ModelSim Version 10.5b".to_string()))
        );
        assert_eq!(
            tokens[2],
            Token::Timescale(Timescale {
                magnitude: 1,
                unit: TimescaleUnit::Ps
            })
        );
        assert_eq!(
            tokens[3],
            Token::Scope {
                kind: "module".to_string(),
                name: "top".to_string()
            }
        );
        assert_eq!(
            tokens[5],
            Token::Var(VarDecl {
                var_type: VarType::Wire,
                width: 1,
                id_code: "\"".to_string(),
                reference: "pks_ref".to_string(),
                bit_index: BitIndex::Pair(0, 12),
            })
        );
        assert_eq!(tokens[6], Token::Upscope);
        assert_eq!(tokens[7], Token::EndDefinitions);
        assert_eq!(tokens[8], Token::ChangeTime(0));
        assert_eq!(
            tokens[10],
            Token::ChangeScalar {
                id_code: "\"".to_string(),
                value: ScalarValue::DontCare('x')
            }
        );
        assert_eq!(
            tokens[11],
            Token::ChangeVector {
                id_code: "#".to_string(),
                value: "1010".to_string()
            }
        );
        assert!(matches!(tokens[12], Token::ChangeReal { .. }));
        assert_eq!(tokens[13], Token::ChangeTime(100));
        assert_eq!(tokens[15], Token::DumpOff);
        assert_eq!(tokens.len(), 17);
    }

    #[test]
    fn stops_after_first_error() {
        let mut tokens = Tokenizer::new("$bogus $end\n#10\n".as_bytes());
        match tokens.next() {
            Some(Err(Error::Parse { cursor, .. })) => {
                assert_eq!(cursor.to_string(), "line 1, word 1")
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(tokens.next().is_none());
    }

    #[test]
    fn unterminated_section() {
        let result: Result<Vec<_>> = Tokenizer::new("$scope module top".as_bytes()).collect();
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}

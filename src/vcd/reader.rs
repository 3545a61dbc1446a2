// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::io::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line(pub usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word(pub usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(pub Line, pub Word);

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cursor(Line(line), Word(word)) = self;
        write!(f, "line {line}, word {word}")
    }
}

/// Hands out the whitespace separated words of a dump one at a time,
/// pulling lines from the underlying reader only when the words buffered
/// so far have been consumed.
pub struct WordReader<R: Read> {
    reader: io::BufReader<R>,
    eof: bool,
    buffer: String,
    curr_line: usize,
    words: VecDeque<(String, Cursor)>,
}

impl<R: Read> WordReader<R> {
    pub fn new(file: R) -> WordReader<R> {
        WordReader {
            reader: io::BufReader::new(file),
            eof: false,
            buffer: String::new(),
            curr_line: 0,
            words: VecDeque::new(),
        }
    }

    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_word(&mut self) -> io::Result<Option<(String, Cursor)>> {
        // blank lines yield no words, so keep reading until we either
        // find some or run out of file
        while self.words.is_empty() {
            if self.eof {
                return Ok(None);
            }

            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                self.eof = true;
                continue;
            }
            self.curr_line += 1;

            for (word_idx, word) in self.buffer.split_ascii_whitespace().enumerate() {
                let cursor = Cursor(Line(self.curr_line), Word(word_idx + 1));
                self.words.push_back((word.to_string(), cursor));
            }
        }

        Ok(self.words.pop_front())
    }

    /// Position just past the last word handed out, for errors raised at
    /// the end of the input.
    pub fn position(&self) -> Cursor {
        Cursor(Line(self.curr_line), Word(0))
    }
}

// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Every fatal condition the converter can run into.

use std::io;
use std::path::PathBuf;

use crate::vcd::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dump path does not exist.
    #[error("{} does not exist", .0.display())]
    MissingInput(PathBuf),

    /// The header could not be turned into a symbol table.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The requested window starts after the last recorded event of a signal.
    #[error(
        "scanned {signal} until {last_time}, but no event reached the start time {start_time}"
    )]
    ResampleWindowUnreachable {
        signal: String,
        start_time: u64,
        last_time: u64,
    },

    /// An event was left behind by the resampling clock. Only a corrupt
    /// event list, or events that do not land on the tick grid, get here.
    #[error(
        "for {signal}, the next event at {next_event} (index {index}) \
         is earlier than the current time of {time}"
    )]
    ResampleInvariantViolation {
        signal: String,
        index: usize,
        next_event: u64,
        time: u64,
    },

    #[error("time went backwards from #{from} to #{to}")]
    TimeWentBackwards { from: u64, to: u64 },

    #[error("parse error at {cursor}: {message}")]
    Parse { cursor: Cursor, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

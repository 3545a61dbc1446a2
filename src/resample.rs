// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Zero-order hold resampling of an event list onto a fixed tick grid.

use num::{BigUint, Zero};

use crate::error::{Error, Result};
use crate::signal::EventList;
use crate::vcd::Timestamp;

/// Sample times `start_time, start_time + tick_width, ...` up to and
/// including `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub tick_width: Timestamp,
}

/// Samples `events` once per tick of `window`, repeating the most recent
/// value between events and after the last one.
///
/// Every event at or after `start_time` must land exactly on a tick. An
/// event the clock steps over is reported as
/// [`Error::ResampleInvariantViolation`] rather than silently dropped.
pub fn resample(signal: &str, events: &EventList, window: &Window) -> Result<Vec<BigUint>> {
    let Window {
        start_time,
        end_time,
        tick_width,
    } = *window;
    let events = events.events();

    let Some(mut index) = events.iter().position(|event| event.time >= start_time) else {
        return Err(Error::ResampleWindowUnreachable {
            signal: signal.to_string(),
            start_time,
            last_time: events.last().map_or(0, |event| event.time),
        });
    };

    // before the first event every binding still holds its initial 0
    let mut held = match index.checked_sub(1) {
        Some(prev) => events[prev].value.clone(),
        None => BigUint::zero(),
    };

    let mut samples = vec![];
    let mut time = start_time;
    while time <= end_time {
        match events.get(index) {
            Some(next) if next.time == time => {
                held = next.value.clone();
                index += 1;
            }
            Some(next) if next.time < time => {
                return Err(Error::ResampleInvariantViolation {
                    signal: signal.to_string(),
                    index,
                    next_event: next.time,
                    time,
                });
            }
            // hold
            _ => {}
        }
        samples.push(held.clone());

        time = match time.checked_add(tick_width) {
            Some(time) => time,
            None => break,
        };
    }

    Ok(samples)
}

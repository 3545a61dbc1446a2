// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Body pass: rebuilds every tracked signal's value history from the
//! single bit changes that follow `$enddefinitions`.
//!
//! A change line reports the value a bit took at the timestamp in effect,
//! and a signal may need several change lines to settle. Values are thus
//! committed when the *next* `#time` arrives, stamped with the time they
//! took effect at, once per signal per timestamp.

use log::{info, trace};

use crate::config::ProgressConfig;
use crate::error::{Error, Result};
use crate::signal::{EventList, SignalDescriptor};
use crate::symbols::{Header, SymbolTable};
use crate::vcd::{ScalarValue, Timestamp, Token};

/// Everything the body pass learned about one tracked signal.
#[derive(Debug, Clone)]
pub struct AssembledSignal {
    pub descriptor: SignalDescriptor,
    pub events: EventList,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub header: Header,
    pub signals: Vec<AssembledSignal>,
    /// last timestamp seen before the dump ended or was switched off
    pub final_time: Timestamp,
    /// requested signals the header never declared
    pub missing: Vec<String>,
}

struct ProgressReporter<'a> {
    config: &'a ProgressConfig,
    next_report: Timestamp,
}

impl<'a> ProgressReporter<'a> {
    fn new(config: &'a ProgressConfig) -> Self {
        ProgressReporter {
            config,
            next_report: 0,
        }
    }

    fn observe(&mut self, time: Timestamp) {
        let interval = self.config.interval;
        if interval == 0 || time <= self.next_report {
            return;
        }
        info!("at {} {}", time / interval, self.config.unit);
        self.next_report = (time / interval).saturating_add(1).saturating_mul(interval);
    }
}

enum Flow {
    Continue,
    Stop,
}

struct Assembler<'a> {
    table: SymbolTable,
    events: Vec<EventList>,
    /// timestamp of the changes currently being read
    time: Timestamp,
    /// timestamp before the latest `#time`
    prev_time: Timestamp,
    progress: ProgressReporter<'a>,
}

impl<'a> Assembler<'a> {
    fn step(&mut self, token: Token) -> Result<Flow> {
        match token {
            Token::ChangeTime(time) => self.change_time(time)?,
            Token::ChangeScalar { id_code, value } => self.change_scalar(&id_code, value),
            // ModelSim follows a `$dumpoff` with an `x` for every variable,
            // so nothing after it can be trusted.
            Token::DumpOff => {
                info!("dump switched off at #{}", self.time);
                return Ok(Flow::Stop);
            }
            other => trace!("ignoring {other:?}"),
        }
        Ok(Flow::Continue)
    }

    fn change_time(&mut self, time: Timestamp) -> Result<()> {
        if time < self.time {
            return Err(Error::TimeWentBackwards {
                from: self.time,
                to: time,
            });
        }

        self.prev_time = self.time;
        self.time = time;
        self.progress.observe(time);

        for (signal, events) in self.table.signals.iter_mut().zip(&mut self.events) {
            if let Some(value) = signal.take_dirty() {
                events.push(self.prev_time, value);
            }
        }
        Ok(())
    }

    fn change_scalar(&mut self, id_code: &str, value: ScalarValue) {
        let level = match value {
            ScalarValue::Zero => false,
            ScalarValue::One => true,
            // an unknown level can't be folded into an integer, so the last
            // known value stands
            ScalarValue::DontCare(level) => {
                trace!("ignoring `{level}` on {id_code} at #{}", self.time);
                return;
            }
        };

        let SymbolTable {
            signals, bindings, ..
        } = &mut self.table;
        for binding in bindings.get(id_code).into_iter().flatten() {
            signals[binding.signal.0].drive(binding.bit, level);
        }
    }

    fn finish(mut self) -> Assembly {
        for (signal, events) in self.table.signals.iter_mut().zip(&mut self.events) {
            signal.take_dirty();
            events.push(self.time, signal.value().clone());
        }

        let signals = self
            .table
            .signals
            .into_iter()
            .zip(self.events)
            .map(|(descriptor, events)| AssembledSignal { descriptor, events })
            .collect();

        Assembly {
            header: self.table.header,
            signals,
            final_time: self.time,
            missing: self.table.missing,
        }
    }
}

/// Consumes the rest of the token stream and returns one event list per
/// tracked signal, each ending with an entry at the final timestamp.
pub fn assemble<I>(tokens: &mut I, table: SymbolTable, progress: &ProgressConfig) -> Result<Assembly>
where
    I: Iterator<Item = Result<Token>>,
{
    let mut assembler = Assembler {
        events: vec![EventList::new(); table.signals.len()],
        table,
        time: 0,
        prev_time: 0,
        progress: ProgressReporter::new(progress),
    };

    for token in tokens {
        if let Flow::Stop = assembler.step(token?)? {
            break;
        }
    }

    let assembly = assembler.finish();
    info!("done with the dump body, final time is #{}", assembly.final_time);
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::build_symbol_table;
    use crate::vcd::{BitIndex, VarDecl, VarType};
    use num::BigUint;

    fn var(id_code: &str, reference: &str, bit_index: BitIndex) -> Token {
        Token::Var(VarDecl {
            var_type: VarType::Wire,
            width: 1,
            id_code: id_code.to_string(),
            reference: reference.to_string(),
            bit_index,
        })
    }

    fn change(id_code: &str, value: ScalarValue) -> Token {
        Token::ChangeScalar {
            id_code: id_code.to_string(),
            value,
        }
    }

    fn run(tokens: Vec<Token>, requested: &[&str]) -> Result<Assembly> {
        let requested = requested.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut tokens = tokens.into_iter().map(Ok);
        let table = build_symbol_table(&mut tokens, &requested)?;
        assemble(&mut tokens, table, &ProgressConfig::default())
    }

    fn history(signal: &AssembledSignal) -> Vec<(Timestamp, u64)> {
        signal
            .events
            .events()
            .iter()
            .map(|event| {
                let digits = event.value.to_u64_digits();
                (event.time, digits.first().copied().unwrap_or(0))
            })
            .collect()
    }

    fn header() -> Vec<Token> {
        vec![
            var("!", "clk", BitIndex::None),
            var("a", "data", BitIndex::Pair(0, 0)),
            var("b", "data", BitIndex::Pair(0, 1)),
            var("c", "data", BitIndex::Pair(0, 2)),
            var("d", "data", BitIndex::Pair(0, 3)),
            Token::EndDefinitions,
        ]
    }

    #[test]
    fn commits_once_per_timestamp_at_the_previous_time() {
        use ScalarValue::*;
        let mut tokens = header();
        tokens.extend([
            Token::ChangeTime(0),
            change("!", Zero),
            change("a", Zero),
            change("b", Zero),
            change("c", Zero),
            change("d", Zero),
            Token::ChangeTime(100),
            change("!", One),
            change("a", One),
            Token::ChangeTime(150),
            change("c", One),
            Token::ChangeTime(250),
            change("!", Zero),
            change("a", Zero),
            change("c", Zero),
            Token::ChangeTime(300),
        ]);

        let assembly = run(tokens, &["clk", "data_0"]).unwrap();
        assert_eq!(assembly.final_time, 300);

        let clk = &assembly.signals[0];
        assert_eq!(clk.descriptor.name, "clk");
        assert_eq!(history(clk), vec![(0, 0), (100, 1), (250, 0), (300, 0)]);

        let data = &assembly.signals[1];
        assert_eq!(data.descriptor.width, 4);
        assert_eq!(
            history(data),
            vec![(0, 0), (100, 1), (150, 5), (250, 0), (300, 0)]
        );
    }

    #[test]
    fn dont_care_levels_keep_the_last_value() {
        use ScalarValue::*;
        let mut tokens = header();
        tokens.extend([
            Token::ChangeTime(0),
            change("!", DontCare('x')),
            Token::ChangeTime(10),
            change("!", One),
            Token::ChangeTime(20),
            change("!", DontCare('z')),
            Token::ChangeTime(30),
        ]);

        let assembly = run(tokens, &["clk"]).unwrap();
        // nothing is committed for the don't-care changes
        assert_eq!(history(&assembly.signals[0]), vec![(10, 1), (30, 1)]);
    }

    #[test]
    fn untouched_signals_still_reach_the_final_time() {
        let mut tokens = header();
        tokens.extend([Token::ChangeTime(0), Token::ChangeTime(40)]);

        let assembly = run(tokens, &["data_0"]).unwrap();
        assert_eq!(history(&assembly.signals[0]), vec![(40, 0)]);
    }

    #[test]
    fn changes_after_the_last_time_are_kept() {
        let mut tokens = header();
        tokens.extend([Token::ChangeTime(70), change("d", ScalarValue::One)]);

        let assembly = run(tokens, &["data_0"]).unwrap();
        assert_eq!(history(&assembly.signals[0]), vec![(70, 8)]);
    }

    #[test]
    fn dump_off_discards_the_rest() {
        use ScalarValue::*;
        let mut tokens = header();
        tokens.extend([
            Token::ChangeTime(400),
            change("!", One),
            Token::ChangeTime(500),
            Token::DumpOff,
            change("!", DontCare('x')),
            Token::ChangeTime(600),
            change("!", Zero),
        ]);

        let assembly = run(tokens, &["clk"]).unwrap();
        assert_eq!(assembly.final_time, 500);
        assert_eq!(history(&assembly.signals[0]), vec![(400, 1), (500, 1)]);
    }

    #[test]
    fn repeated_timestamps_do_not_duplicate_entries() {
        use ScalarValue::*;
        let mut tokens = header();
        tokens.extend([
            Token::ChangeTime(10),
            change("!", One),
            Token::ChangeTime(10),
            change("!", Zero),
            Token::ChangeTime(20),
        ]);

        let assembly = run(tokens, &["clk"]).unwrap();
        assert_eq!(history(&assembly.signals[0]), vec![(10, 0), (20, 0)]);
    }

    #[test]
    fn time_must_not_go_backwards() {
        let mut tokens = header();
        tokens.extend([Token::ChangeTime(20), Token::ChangeTime(10)]);
        assert!(matches!(
            run(tokens, &["clk"]),
            Err(Error::TimeWentBackwards { from: 20, to: 10 })
        ));
    }

    #[test]
    fn vector_changes_are_ignored() {
        let mut tokens = header();
        tokens.extend([
            Token::ChangeTime(0),
            Token::ChangeVector {
                id_code: "a".to_string(),
                value: "1111".to_string(),
            },
            Token::ChangeTime(5),
        ]);
        let assembly = run(tokens, &["data_0"]).unwrap();
        assert_eq!(assembly.signals[0].events.events()[0].value, BigUint::from(0u32));
    }
}

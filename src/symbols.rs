// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Header pass: maps dump identifiers onto the signals the caller asked for.

use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::signal::{Binding, SignalDescriptor, SignalIdx};
use crate::vcd::{BitIndex, Date, Timescale, Token, VarDecl, Version};

/// Header facts that are reported but never change how the body is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub date: Option<Date>,
    pub version: Option<Version>,
    pub timescale: Option<Timescale>,
    /// first top level scope, usually the testbench
    pub top: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    pub header: Header,
    /// tracked signals that were declared, in request order
    pub signals: Vec<SignalDescriptor>,
    /// requested names that no declaration matched
    pub missing: Vec<String>,
    pub(crate) bindings: HashMap<String, Vec<Binding>>,
}

impl SymbolTable {
    pub fn bindings(&self, id_code: &str) -> &[Binding] {
        self.bindings.get(id_code).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Name and bit position a declaration contributes, with two level arrays
/// flattened: `sig[2][5]` becomes bit 5 of `sig_2`.
fn effective_name(decl: &VarDecl) -> std::result::Result<(String, Option<u32>), String> {
    match &decl.bit_index {
        BitIndex::None => Ok((decl.reference.clone(), None)),
        BitIndex::Single(bit) => Ok((decl.reference.clone(), Some(*bit))),
        BitIndex::Pair(outer, inner) => Ok((format!("{}_{outer}", decl.reference), Some(*inner))),
        BitIndex::Range(msb, lsb) => Err(format!("[{msb}:{lsb}]")),
        BitIndex::Unsupported(raw) => Err(raw.clone()),
    }
}

struct Builder<'a> {
    header: Header,
    scopes: Vec<String>,
    requested: HashMap<&'a str, usize>,
    slots: Vec<Option<SignalDescriptor>>,
    bindings: HashMap<String, Vec<Binding>>,
}

impl<'a> Builder<'a> {
    fn new(requested: &'a [String]) -> Self {
        for name in requested.iter().duplicates() {
            warn!("signal {name} was requested more than once");
        }
        let requested = requested
            .iter()
            .map(String::as_str)
            .unique()
            .enumerate()
            .map(|(idx, name)| (name, idx))
            .collect::<HashMap<_, _>>();

        Builder {
            header: Header::default(),
            scopes: vec![],
            slots: vec![None; requested.len()],
            requested,
            bindings: HashMap::new(),
        }
    }

    fn declare(&mut self, decl: VarDecl) -> Result<()> {
        let (name, bit) = match effective_name(&decl) {
            Ok(named) => named,
            Err(shape) => {
                if self.requested.contains_key(decl.reference.as_str()) {
                    return Err(Error::MalformedHeader(format!(
                        "tracked signal {} is declared with unsupported index {shape}",
                        decl.reference
                    )));
                }
                trace!("ignoring {}{shape}", decl.reference);
                return Ok(());
            }
        };

        let Some(&slot) = self.requested.get(name.as_str()) else {
            return Ok(());
        };

        if bit.is_none() && decl.width > 1 {
            warn!(
                "{name} is a {}-bit vector; only single bit changes are tracked",
                decl.width
            );
        }

        let scope_path = self.scopes.iter().join(".");
        let signal = self.slots[slot].get_or_insert_with(|| {
            debug!("found {name} for the first time in scope `{scope_path}`");
            SignalDescriptor::new(name.clone())
        });

        if signal.width > 0 && signal.positional != bit.is_some() {
            return Err(Error::MalformedHeader(format!(
                "{name} is declared both as a scalar and as an array"
            )));
        }

        let binding = Binding {
            signal: SignalIdx(slot),
            bit,
        };
        let bindings = self.bindings.entry(decl.id_code).or_default();
        // the same identifier may be declared again in another scope
        if !bindings.contains(&binding) {
            bindings.push(binding);
            signal.add_binding(bit);
        }

        Ok(())
    }

    fn finish(self, requested: &[String]) -> SymbolTable {
        let mut remap = vec![None; self.slots.len()];
        let mut signals = vec![];
        for (slot, signal) in self.slots.into_iter().enumerate() {
            if let Some(signal) = signal {
                remap[slot] = Some(SignalIdx(signals.len()));
                signals.push(signal);
            }
        }

        let missing = requested
            .iter()
            .unique()
            .filter(|name| !signals.iter().any(|signal| &signal.name == *name))
            .cloned()
            .collect::<Vec<_>>();
        for name in &missing {
            warn!("signal {name} is not declared in the dump and will produce no output");
        }

        let bindings = self
            .bindings
            .into_iter()
            .map(|(id_code, bindings)| {
                let bindings = bindings
                    .into_iter()
                    .filter_map(|Binding { signal, bit }| {
                        let SignalIdx(slot) = signal;
                        remap[slot].map(|signal| Binding { signal, bit })
                    })
                    .collect();
                (id_code, bindings)
            })
            .collect();

        SymbolTable {
            header: self.header,
            signals,
            missing,
            bindings,
        }
    }
}

/// Consumes tokens up to and including `$enddefinitions`.
pub fn build_symbol_table<I>(tokens: &mut I, requested: &[String]) -> Result<SymbolTable>
where
    I: Iterator<Item = Result<Token>>,
{
    let mut builder = Builder::new(requested);

    for token in tokens {
        match token? {
            Token::Date(date) => builder.header.date = Some(date),
            Token::Version(version) => builder.header.version = Some(version),
            Token::Timescale(timescale) => {
                debug!("timescale is {timescale:?}");
                builder.header.timescale = Some(timescale);
            }
            Token::Scope { name, .. } => {
                if builder.header.top.is_none() {
                    builder.header.top = Some(name.clone());
                }
                builder.scopes.push(name);
            }
            Token::Upscope => {
                builder.scopes.pop();
            }
            Token::Var(decl) => builder.declare(decl)?,
            Token::EndDefinitions => return Ok(builder.finish(requested)),
            other => trace!("ignoring {other:?} in header"),
        }
    }

    Err(Error::MalformedHeader(
        "reached the end of the dump without finding `$enddefinitions`".to_string(),
    ))
}

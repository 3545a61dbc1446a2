// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Rebuilds multi-bit signal histories from the single bit changes of a
//! VCD dump and resamples them onto a fixed time grid.

pub mod vcd;

mod assembler;
mod config;
mod error;
mod output;
mod pipeline;
mod resample;
mod signal;
mod symbols;

pub use assembler::{assemble, AssembledSignal, Assembly};
pub use config::{Config, ProgressConfig, DEFAULT_TICK_WIDTH};
pub use error::{Error, Result};
pub use output::{output_path, write_samples};
pub use pipeline::{assemble_dump, convert, convert_reader, resample_assembly, Conversion};
pub use resample::{resample, Window};
pub use signal::{Binding, Event, EventList, SignalDescriptor, SignalIdx, ValueFormat};
pub use symbols::{build_symbol_table, Header, SymbolTable};

pub use num::BigUint;

// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Single pass driver: tokens -> symbol table -> event lists -> samples -> files.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info};
use num::BigUint;

use crate::assembler::{assemble, Assembly};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::write_samples;
use crate::resample::{resample, Window};
use crate::symbols::{build_symbol_table, Header};
use crate::vcd::{Timestamp, Tokenizer};

#[derive(Debug, Clone)]
pub struct Conversion {
    pub header: Header,
    pub final_time: Timestamp,
    /// one file per tracked signal, in request order
    pub outputs: Vec<PathBuf>,
    /// requested signals the dump never declared
    pub missing: Vec<String>,
}

/// Reads a whole dump from `reader` and returns its event lists.
pub fn assemble_dump<R: Read>(reader: R, signals: &[String], config: &Config) -> Result<Assembly> {
    let mut tokens = Tokenizer::new(reader);

    let table = build_symbol_table(&mut tokens, signals)?;
    debug!("header: {:?}", table.header);
    info!(
        "tracking {} of {} requested signals",
        table.signals.len(),
        signals.len()
    );

    assemble(&mut tokens, table, &config.report)
}

/// Resamples every signal of `assembly`. Nothing is returned unless every
/// signal could be resampled.
pub fn resample_assembly(assembly: &Assembly, config: &Config) -> Result<Vec<Vec<BigUint>>> {
    let window = Window {
        start_time: config.start_time,
        end_time: assembly.final_time,
        tick_width: config.tick_width,
    };

    assembly
        .signals
        .iter()
        .map(|signal| {
            let name = &signal.descriptor.name;
            debug!("resampling {name} from {} events", signal.events.len());
            resample(name, &signal.events, &window)
        })
        .collect()
}

/// Runs the whole conversion over any reader, writing the artifacts into
/// `config.output_dir`.
pub fn convert_reader<R: Read>(reader: R, signals: &[String], config: &Config) -> Result<Conversion> {
    config.validate()?;

    let assembly = assemble_dump(reader, signals, config)?;
    let series = resample_assembly(&assembly, config)?;

    info!("writing {} files", series.len());
    let outputs = assembly
        .signals
        .iter()
        .zip(&series)
        .map(|(signal, samples)| {
            let descriptor = &signal.descriptor;
            write_samples(
                &config.output_dir,
                &descriptor.name,
                descriptor.format(),
                samples,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Conversion {
        header: assembly.header,
        final_time: assembly.final_time,
        outputs,
        missing: assembly.missing,
    })
}

/// Converts the dump at `path`.
pub fn convert(path: &Path, signals: &[String], config: &Config) -> Result<Conversion> {
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    info!("{} found", path.display());

    let file = File::open(path)?;
    convert_reader(file, signals, config)
}

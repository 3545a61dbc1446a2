// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use num::BigUint;

use crate::error::{Error, Result};
use crate::signal::ValueFormat;

pub fn output_path(dir: &Path, signal: &str) -> PathBuf {
    dir.join(format!("{signal}_proc.dat"))
}

/// Writes one rendered sample per line, replacing any previous file.
pub fn write_samples(
    dir: &Path,
    signal: &str,
    format: ValueFormat,
    samples: &[BigUint],
) -> Result<PathBuf> {
    let path = output_path(dir, signal);

    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&path)?);
        for sample in samples {
            writeln!(writer, "{}", format.render(sample))?;
        }
        writer.flush()
    };

    write().map_err(|source| Error::Output {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn one_line_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let samples = [1u32, 5, 0].map(BigUint::from);

        let path = write_samples(
            dir.path(),
            "data_0",
            ValueFormat::Hex { digits: 8 },
            &samples,
        )
        .unwrap();

        assert_eq!(path, dir.path().join("data_0_proc.dat"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "00000001\n00000005\n00000000\n"
        );
    }

    #[test]
    fn previous_output_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "clk");
        fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        write_samples(dir.path(), "clk", ValueFormat::Decimal, &[BigUint::from(1u32)]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n");
    }

    #[test]
    fn unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not").join("there");
        let result = write_samples(&missing, "clk", ValueFormat::Decimal, &[]);
        assert!(matches!(result, Err(Error::Output { .. })));
    }
}

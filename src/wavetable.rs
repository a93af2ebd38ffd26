// wave.txt -- a text based wavetable editor
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Reading and writing waveforms in the plain-text wavetable format.
//!
//! A wavetable file holds a single line of whitespace-separated numbers,
//! one per sample. The decoder is deliberately lenient: hand-edited files
//! with stray tokens or out-of-range values still yield a usable waveform
//! instead of an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use snafu::Snafu;

use crate::waveform::{AMP_MAX, AMP_MIN, WAVE_LENGTH};

/// Errors when moving wavetables between disk and memory.
///
/// Always recoverable: a failed load or save leaves the in-memory
/// waveform exactly as it was.
#[derive(Debug, Snafu)]
pub enum PresetError {
    #[snafu(display("could not read wavetable {}: {}", path.display(), source))]
    Read { path: PathBuf, source: io::Error },
    #[snafu(display("could not write wavetable {}: {}", path.display(), source))]
    Write { path: PathBuf, source: io::Error },
}

/// Decode wavetable text into exactly [`WAVE_LENGTH`] in-range samples.
///
/// Only the first non-empty line is considered. Each token is parsed as a
/// float and truncated towards zero; a token that does not parse counts as
/// zero. Values are clamped to the amplitude range, and the result is
/// zero-padded or truncated to the fixed length. Decoding never fails.
pub fn decode(text: &str) -> Vec<i8> {
    let line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let mut samples: Vec<i8> = line
        .split_whitespace()
        .take(WAVE_LENGTH)
        .map(|token| {
            let value = token.parse::<f64>().unwrap_or(0.0) as i64;
            value.max(AMP_MIN as i64).min(AMP_MAX as i64) as i8
        })
        .collect();
    samples.resize(WAVE_LENGTH, 0);
    samples
}

/// Encode samples as a single line of whitespace-separated integers.
///
/// The inverse of [`decode`] for any in-range input.
pub fn encode(samples: &[i8]) -> String {
    let mut line = samples
        .iter()
        .map(|sample| sample.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

/// Load the wavetable stored at `path`.
pub fn load(path: &Path) -> Result<Vec<i8>, PresetError> {
    let text = fs::read_to_string(path).map_err(|source| PresetError::Read {
        path: path.to_owned(),
        source,
    })?;
    debug!("loaded wavetable from {}", path.display());
    Ok(decode(&text))
}

/// Save `samples` at `path` in the wavetable format.
pub fn save(path: &Path, samples: &[i8]) -> Result<(), PresetError> {
    fs::write(path, encode(samples)).map_err(|source| PresetError::Write {
        path: path.to_owned(),
        source,
    })?;
    debug!("saved wavetable to {}", path.display());
    Ok(())
}

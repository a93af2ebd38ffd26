// wave.txt -- a text based wavetable editor
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Enumerating the wavetables and scores available on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

/// The two kinds of files the editor deals in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PresetKind {
    /// A stored waveform, see [`crate::wavetable`].
    Wavetable,
    /// A score for the external synthesizer, opaque to the editor.
    Score,
}

impl PresetKind {
    /// File extension for this kind, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            PresetKind::Wavetable => "txt",
            PresetKind::Score => "mml",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PresetKind::Wavetable => "wavetable",
            PresetKind::Score => "score",
        }
    }
}

/// The identifiers that can currently be selected, one list per kind.
///
/// The lists are plain directory listings taken at [`Catalog::refresh`]
/// time; they are not kept in sync with later filesystem changes.
pub struct Catalog {
    wavetable_dir: PathBuf,
    score_dir: PathBuf,
    wavetables: Vec<String>,
    scores: Vec<String>,
}

impl Catalog {
    /// Set up a catalog over the two directories and take the initial listing.
    pub fn new(wavetable_dir: PathBuf, score_dir: PathBuf) -> Self {
        let mut catalog = Self {
            wavetable_dir,
            score_dir,
            wavetables: Vec::new(),
            scores: Vec::new(),
        };
        catalog.refresh();
        catalog
    }

    /// Re-list both directories.
    pub fn refresh(&mut self) {
        self.wavetables = list_dir(&self.wavetable_dir, PresetKind::Wavetable.extension());
        self.scores = list_dir(&self.score_dir, PresetKind::Score.extension());
    }

    /// Wavetable identifiers, lexicographically sorted.
    pub fn wavetables(&self) -> &[String] {
        &self.wavetables
    }

    /// Score identifiers, lexicographically sorted.
    pub fn scores(&self) -> &[String] {
        &self.scores
    }

    /// Path where the preset with the given identifier is expected.
    ///
    /// Pure path construction; whether the file exists is decided by
    /// whoever opens it.
    pub fn resolve(&self, kind: PresetKind, name: &str) -> PathBuf {
        let dir = match kind {
            PresetKind::Wavetable => &self.wavetable_dir,
            PresetKind::Score => &self.score_dir,
        };
        dir.join(format!("{}.{}", name, kind.extension()))
    }
}

/// List the identifiers in `dir` carrying `extension`, sorted.
///
/// A directory that cannot be read yields an empty listing, which is a
/// valid, displayable state (no presets available yet).
fn list_dir(dir: &Path, extension: &str) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("not listing {}: {}", dir.display(), err);
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
                return None;
            }
            Some(path.file_stem()?.to_str()?.to_owned())
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_filters_and_sorts() {
        let waves = tempfile::tempdir().unwrap();
        let scores = tempfile::tempdir().unwrap();
        fs::write(waves.path().join("square1.txt"), "0").unwrap();
        fs::write(waves.path().join("sine1.txt"), "0").unwrap();
        fs::write(waves.path().join("readme.md"), "not a wavetable").unwrap();
        fs::write(scores.path().join("march.mml"), "").unwrap();
        let catalog = Catalog::new(waves.path().to_owned(), scores.path().to_owned());
        assert_eq!(catalog.wavetables(), ["sine1", "square1"]);
        assert_eq!(catalog.scores(), ["march"]);
    }

    #[test]
    fn missing_directories_list_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path().join("waves"), dir.path().join("songs"));
        assert!(catalog.wavetables().is_empty());
        assert!(catalog.scores().is_empty());
    }

    #[test]
    fn refresh_picks_up_new_presets() {
        let waves = tempfile::tempdir().unwrap();
        let scores = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::new(waves.path().to_owned(), scores.path().to_owned());
        assert!(catalog.wavetables().is_empty());
        fs::write(waves.path().join("pulse.txt"), "0").unwrap();
        catalog.refresh();
        assert_eq!(catalog.wavetables(), ["pulse"]);
    }

    #[test]
    fn resolving_is_pure_path_construction() {
        let catalog = Catalog::new(PathBuf::from("waves"), PathBuf::from("songs"));
        assert_eq!(
            catalog.resolve(PresetKind::Wavetable, "sine1"),
            Path::new("waves/sine1.txt")
        );
        assert_eq!(
            catalog.resolve(PresetKind::Score, "march"),
            Path::new("songs/march.mml")
        );
    }
}

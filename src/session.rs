// wave.txt -- a text based wavetable editor
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The editing session driven by the display layer.
//!
//! A [`Session`] owns the waveform being edited, the preset file it is
//! tied to, the catalog of loadable presets and the current playback
//! selections. The display layer calls the operations here and re-renders
//! from [`Session::snapshot`] afterwards; nothing in this module calls
//! back into it.

use std::io;
use std::path::{Path, PathBuf};

use log::info;
use snafu::Snafu;

use crate::catalog::{Catalog, PresetKind};
use crate::output::synth;
use crate::waveform::{Edit, Snapshot, WaveformBuffer};
use crate::wavetable::{self, PresetError};

/// Why a session operation could not be carried out.
///
/// None of these are fatal: the waveform and the catalog keep their last
/// valid state and the user may simply retry.
#[derive(Debug, Snafu)]
pub enum SessionError {
    /// Loading or saving the preset file failed.
    #[snafu(display("{}", source))]
    Preset { source: PresetError },
    /// `save` was called before any preset file was opened or saved.
    #[snafu(display("no preset file has been opened or saved yet"))]
    NoPresetPath,
    /// The identifier is not in the catalog.
    #[snafu(display("unknown {} identifier: {}", kind.describe(), name))]
    UnknownIdentifier { kind: PresetKind, name: String },
    /// Playback needs both a wavetable and a score selection.
    #[snafu(display("nothing selected: choose a wavetable and a score first"))]
    NothingSelected,
    /// The synthesizer process could not be started.
    #[snafu(display("could not start synthesizer {}: {}", program.display(), source))]
    Spawn { program: PathBuf, source: io::Error },
}

/// One editing session: a waveform, the file it came from, and what to play.
pub struct Session {
    buffer: WaveformBuffer,
    preset_path: Option<PathBuf>,
    catalog: Catalog,
    selected_wavetable: Option<String>,
    selected_score: Option<String>,
    synth_program: PathBuf,
}

impl Session {
    /// Start from a silent waveform with no preset file attached.
    pub fn new(catalog: Catalog, synth_program: PathBuf) -> Self {
        Self {
            buffer: WaveformBuffer::new(),
            preset_path: None,
            catalog,
            selected_wavetable: None,
            selected_score: None,
            synth_program,
        }
    }

    // --- editing, forwarded to the waveform buffer ---

    pub fn raise(&mut self) -> Edit {
        self.buffer.raise()
    }

    pub fn lower(&mut self) -> Edit {
        self.buffer.lower()
    }

    pub fn move_left(&mut self) -> Edit {
        self.buffer.move_left()
    }

    pub fn move_right(&mut self) -> Edit {
        self.buffer.move_right()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.buffer.snapshot()
    }

    // --- catalog ---

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn refresh_catalog(&mut self) {
        self.catalog.refresh();
    }

    // --- persistence ---

    /// Load the preset at `path` into the waveform and remember the path.
    ///
    /// On failure neither the waveform nor the remembered path changes.
    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        let samples = wavetable::load(path).map_err(|source| SessionError::Preset { source })?;
        self.buffer.replace(samples);
        self.preset_path = Some(path.to_owned());
        info!("opened {}", path.display());
        Ok(())
    }

    /// Load a wavetable by its catalog identifier.
    pub fn open_wavetable(&mut self, name: &str) -> Result<(), SessionError> {
        self.known(PresetKind::Wavetable, name)?;
        let path = self.catalog.resolve(PresetKind::Wavetable, name);
        self.open(&path)
    }

    /// Save the waveform at `path` and remember the path.
    pub fn save_as(&mut self, path: &Path) -> Result<(), SessionError> {
        wavetable::save(path, self.buffer.samples())
            .map_err(|source| SessionError::Preset { source })?;
        self.preset_path = Some(path.to_owned());
        Ok(())
    }

    /// Save the waveform to the path remembered from the last open or save.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let path = self.preset_path.clone().ok_or(SessionError::NoPresetPath)?;
        wavetable::save(&path, self.buffer.samples())
            .map_err(|source| SessionError::Preset { source })
    }

    pub fn preset_path(&self) -> Option<&Path> {
        self.preset_path.as_deref()
    }

    // --- playback ---

    pub fn select_wavetable(&mut self, name: &str) -> Result<(), SessionError> {
        self.known(PresetKind::Wavetable, name)?;
        self.selected_wavetable = Some(name.to_owned());
        Ok(())
    }

    pub fn select_score(&mut self, name: &str) -> Result<(), SessionError> {
        self.known(PresetKind::Score, name)?;
        self.selected_score = Some(name.to_owned());
        Ok(())
    }

    pub fn selected_wavetable(&self) -> Option<&str> {
        self.selected_wavetable.as_deref()
    }

    pub fn selected_score(&self) -> Option<&str> {
        self.selected_score.as_deref()
    }

    /// Hand the selected wavetable and score to the external synthesizer.
    ///
    /// Fire and forget: the child process is not tracked, and playing
    /// again while an earlier synthesis is still running is allowed.
    /// Refuses without starting anything when either selection is missing.
    pub fn play(&self) -> Result<(), SessionError> {
        let wavetable = self
            .selected_wavetable
            .as_deref()
            .ok_or(SessionError::NothingSelected)?;
        let score = self
            .selected_score
            .as_deref()
            .ok_or(SessionError::NothingSelected)?;
        let wavetable = self.catalog.resolve(PresetKind::Wavetable, wavetable);
        let score = self.catalog.resolve(PresetKind::Score, score);
        synth::launch(&self.synth_program, &wavetable, &score).map_err(|source| {
            SessionError::Spawn {
                program: self.synth_program.clone(),
                source,
            }
        })?;
        Ok(())
    }

    fn known(&self, kind: PresetKind, name: &str) -> Result<(), SessionError> {
        let names = match kind {
            PresetKind::Wavetable => self.catalog.wavetables(),
            PresetKind::Score => self.catalog.scores(),
        };
        if names.iter().any(|known| known == name) {
            Ok(())
        } else {
            Err(SessionError::UnknownIdentifier {
                kind,
                name: name.to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn session_with_presets() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let waves = dir.path().join("wavetables");
        let scores = dir.path().join("mmls");
        fs::create_dir(&waves).unwrap();
        fs::create_dir(&scores).unwrap();
        fs::write(waves.join("sine1.txt"), "1 2 3").unwrap();
        fs::write(scores.join("march.mml"), "cdefg").unwrap();
        let catalog = Catalog::new(waves, scores);
        let session = Session::new(catalog, PathBuf::from("/no/such/synthe"));
        (dir, session)
    }

    #[test]
    fn play_without_selection_is_refused() {
        let (_dir, session) = session_with_presets();
        assert!(matches!(session.play(), Err(SessionError::NothingSelected)));
    }

    #[test]
    fn play_needs_both_selections() {
        let (_dir, mut session) = session_with_presets();
        session.select_wavetable("sine1").unwrap();
        assert!(matches!(session.play(), Err(SessionError::NothingSelected)));
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let (_dir, mut session) = session_with_presets();
        assert!(matches!(
            session.select_wavetable("does-not-exist"),
            Err(SessionError::UnknownIdentifier { .. })
        ));
        assert_eq!(session.selected_wavetable(), None);
    }

    #[test]
    fn spawn_failure_is_surfaced() {
        let (_dir, mut session) = session_with_presets();
        session.select_wavetable("sine1").unwrap();
        session.select_score("march").unwrap();
        assert!(matches!(session.play(), Err(SessionError::Spawn { .. })));
    }

    #[test]
    fn open_by_identifier_fills_the_waveform() {
        let (_dir, mut session) = session_with_presets();
        session.open_wavetable("sine1").unwrap();
        assert_eq!(&session.snapshot().samples[..3], &[1, 2, 3]);
    }

    #[test]
    fn failed_open_leaves_the_waveform_untouched() {
        let (dir, mut session) = session_with_presets();
        session.raise();
        session.raise();
        let before = session.snapshot();
        assert!(session.open(&dir.path().join("missing.txt")).is_err());
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.preset_path(), None);
    }

    #[test]
    fn save_remembers_the_path() {
        let (dir, mut session) = session_with_presets();
        assert!(matches!(session.save(), Err(SessionError::NoPresetPath)));
        session.raise();
        let path = dir.path().join("wavetables").join("edited.txt");
        session.save_as(&path).unwrap();
        session.raise();
        session.save().unwrap();
        assert_eq!(wavetable::load(&path).unwrap()[0], 2);
    }
}

// wave.txt -- a text based wavetable editor
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `wavedit` is the command line front end of the wavetable editor.
//!
//! It is a thin presentation layer: every command calls into the session
//! and prints the resulting state; all invariants live in the library.

use std::io;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use simple_logger;
use structopt::StructOpt;

use wave_txt::catalog::{Catalog, PresetKind};
use wave_txt::session::{Session, SessionError};
use wave_txt::wavetable;

#[derive(Debug, StructOpt)]
#[structopt(name = "wavedit", about = "Sculpting wavetables by hand")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Directory holding the wavetable presets.
    #[structopt(long, default_value = "wavetables", parse(from_os_str))]
    wavetables: PathBuf,

    /// Directory holding the scores.
    #[structopt(long, default_value = "mmls", parse(from_os_str))]
    scores: PathBuf,

    /// The external synthesizer program.
    #[structopt(long, default_value = "synthe", parse(from_os_str))]
    synth: PathBuf,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// List the wavetables and scores in the catalog.
    List,
    /// Print the samples of a stored wavetable.
    Show { name: String },
    /// Play a score through a wavetable on the external synthesizer.
    Play { wavetable: String, score: String },
    /// Edit a waveform interactively on stdin.
    Edit {
        /// Wavetable to start from; a silent waveform if not given.
        name: Option<String>,
    },
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let catalog = Catalog::new(opt.wavetables, opt.scores);
    let mut session = Session::new(catalog, opt.synth);

    match opt.command {
        Command::List => {
            println!("wavetables:");
            for name in session.catalog().wavetables() {
                println!("  {}", name);
            }
            println!("scores:");
            for name in session.catalog().scores() {
                println!("  {}", name);
            }
            Ok(())
        }
        Command::Show { name } => {
            let path = session.catalog().resolve(PresetKind::Wavetable, &name);
            let samples = wavetable::load(&path).map_err(to_io)?;
            print!("{}", wavetable::encode(&samples));
            Ok(())
        }
        Command::Play { wavetable, score } => {
            session.select_wavetable(&wavetable).map_err(to_io)?;
            session.select_score(&score).map_err(to_io)?;
            session.play().map_err(to_io)
        }
        Command::Edit { name } => {
            if let Some(name) = name {
                session.select_wavetable(&name).map_err(to_io)?;
                session.open_wavetable(&name).map_err(to_io)?;
            }
            edit_loop(&mut session)
        }
    }
}

fn to_io<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::Other, err)
}

/// Read editing commands line by line until EOF or `q`.
///
/// The command set mirrors the keys of the original editor: `u`/`d` move
/// the amplitude under the cursor, `l`/`r` move the cursor. Everything
/// else is file and playback plumbing.
fn edit_loop(session: &mut Session) -> io::Result<()> {
    println!("u/d raise or lower, l/r move the cursor,");
    println!("o NAME open, w [FILE] write, s NAME choose score, p play, q quit");
    print_state(session);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(word) => word,
            None => continue,
        };
        let argument = words.next();

        match (command, argument) {
            ("u", _) | ("up", _) => {
                if !session.raise().applied() {
                    println!("the amplitude is already at its maximum");
                }
                print_state(session);
            }
            ("d", _) | ("down", _) => {
                if !session.lower().applied() {
                    println!("the amplitude is already at its minimum");
                }
                print_state(session);
            }
            ("l", _) | ("left", _) => {
                if !session.move_left().applied() {
                    println!("cannot move further left");
                }
                print_state(session);
            }
            ("r", _) | ("right", _) => {
                if !session.move_right().applied() {
                    println!("cannot move further right");
                }
                print_state(session);
            }
            ("o", Some(name)) => {
                let opened = session
                    .select_wavetable(name)
                    .and_then(|()| session.open_wavetable(name));
                report(opened);
                print_state(session);
            }
            ("w", Some(file)) => {
                report(session.save_as(Path::new(file)));
                session.refresh_catalog();
            }
            ("w", None) => report(session.save()),
            ("s", Some(name)) => report(session.select_score(name)),
            ("p", _) | ("play", _) => report(session.play()),
            ("q", _) | ("quit", _) => return Ok(()),
            _ => println!("unknown command: {}", command),
        }
    }
}

fn report(result: Result<(), SessionError>) {
    if let Err(err) = result {
        println!("{}", err);
    }
}

fn print_state(session: &Session) {
    let state = session.snapshot();
    let line = state
        .samples
        .iter()
        .map(|sample| sample.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    println!(
        "cursor at {} (amplitude {})",
        state.cursor, state.samples[state.cursor]
    );
}

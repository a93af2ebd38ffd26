//! Easy interface for playing a score through the external synthesizer.

use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::info;

/// The invocation handed to the synthesizer: the wavetable path first,
/// the score path second. What the program does with them is its business.
fn command(program: &Path, wavetable: &Path, score: &Path) -> Command {
    let mut command = Command::new(program);
    command
        .arg(wavetable)
        .arg(score)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Start the synthesizer on the given wavetable and score.
///
/// Fire and forget: the child is not waited on and its output is not
/// captured. Launching again while an earlier synthesis is still running
/// is allowed and yields two independent processes.
pub fn launch(program: &Path, wavetable: &Path, score: &Path) -> io::Result<Child> {
    info!(
        "launching {} {} {}",
        program.display(),
        wavetable.display(),
        score.display()
    );
    command(program, wavetable, score).spawn()
}

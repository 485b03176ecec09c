use crate::error::Error;
use log::debug;
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{channel, Sender};

/// Runs external tools. Implemented by [`ProcessRunner`], and by stubs in tests.
pub trait Runner: Sync {
    /// Runs `program` to completion, returning its stdout and stderr lines in arrival order.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<Vec<String>, Error>;
}

pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<Vec<String>, Error> {
        debug!("spawning {} {:?}", program.display(), args);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::ProcessSpawnFailed {
                program: program.to_owned(),
                source,
            })?;

        let (tx, rx) = channel();
        let readers = [
            child.stdout.take().map(|out| forward_lines(out, tx.clone())),
            child.stderr.take().map(|err| forward_lines(err, tx.clone())),
        ];
        drop(tx);
        let output: Vec<String> = rx.into_iter().collect();
        for reader in readers.into_iter().flatten() {
            reader.join().unwrap();
        }

        let status = child.wait().map_err(Error::io(program))?;
        if !status.success() {
            return Err(Error::ProcessFailed {
                program: program.to_owned(),
                code: status.code(),
                output,
            });
        }
        Ok(output)
    }
}

fn forward_lines(
    stream: impl Read + Send + 'static,
    tx: Sender<String>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        // Drain to EOF regardless of encoding; the child must never see a closed pipe.
        while let Ok(read) = reader.read_until(b'\n', &mut buf) {
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let _ = tx.send(line.trim_end_matches(['\n', '\r']).to_owned());
            buf.clear();
        }
    })
}

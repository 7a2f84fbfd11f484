//! Where the printed output ends up: stdout, a file, or the clipboard.

use crate::clipboard::copy_to_clipboard;
use crate::error::{FilesToPromptError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
    Clipboard,
}

/// A [`Write`] target that counts bytes and knows how to finish itself.
pub struct OutputSink {
    target: Target,
    bytes: u64,
}

enum Target {
    Stdout(BufWriter<Stdout>),
    File(PathBuf, BufWriter<File>),
    Buffer(Vec<u8>),
}

impl OutputSink {
    pub fn open(destination: &Destination) -> Result<Self> {
        let target = match destination {
            Destination::Stdout => Target::Stdout(BufWriter::new(io::stdout())),
            Destination::File(path) => {
                let file = File::create(path).map_err(|e| FilesToPromptError::io(path, e))?;
                Target::File(path.clone(), BufWriter::new(file))
            }
            Destination::Clipboard => Target::Buffer(Vec::new()),
        };
        Ok(Self { target, bytes: 0 })
    }

    /// Flushes buffered output, handing it to the clipboard when that is the
    /// destination. Returns the number of bytes written.
    pub fn finalize(self) -> Result<u64> {
        match self.target {
            Target::Stdout(mut out) => {
                out.flush().map_err(|e| FilesToPromptError::io("<stdout>", e))?
            }
            Target::File(path, mut out) => out.flush().map_err(|e| FilesToPromptError::io(path, e))?,
            Target::Buffer(buf) => {
                let text = String::from_utf8_lossy(&buf);
                copy_to_clipboard(&text)?;
            }
        }
        Ok(self.bytes)
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = match &mut self.target {
            Target::Stdout(out) => out.write(buf)?,
            Target::File(_, out) => out.write(buf)?,
            Target::Buffer(out) => out.write(buf)?,
        };
        self.bytes += written as u64;
        Ok(written)
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut self.target {
            Target::Stdout(out) => out.flush(),
            Target::File(_, out) => out.flush(),
            Target::Buffer(_) => Ok(()),
        }
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes discovered hostnames, one per line
pub struct NameWriter {
    inner: Box<dyn Write + Send>,
    written: u64,
}

impl NameWriter {
    /// Writes to standard output
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Creates (or truncates) the file at `path` and writes to it
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::from_writer(File::create(path)?))
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Box::new(BufWriter::new(writer)),
            written: 0,
        }
    }

    pub fn write_name(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", name)?;
        self.written += 1;
        Ok(())
    }

    /// Number of names written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

//! Command output sinks
//!
//! Long output such as the text graph goes through the `minus` pager when a
//! person is reading it; pipes, tests and `NO_PAGER=1` get plain stdout.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Adapts the `minus` pager to `std::io::Write`
///
/// The pager handle is shared: text written here is shown once the owning
/// [`Sink`] is finished.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where a command's output ends up
pub enum Sink {
    Stdout,
    Pager(Pager),
}

impl Sink {
    /// Page when stdout is a terminal and `NO_PAGER` is unset
    pub fn detect() -> Self {
        if std::env::var_os("NO_PAGER").is_none() && io::stdout().is_terminal() {
            Sink::Pager(Pager::new())
        } else {
            Sink::Stdout
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Sink::Stdout => Box::new(io::stdout()),
            Sink::Pager(pager) => Box::new(PagerWriter::new(pager.clone())),
        }
    }

    /// Show paged output; blocks until the pager is closed
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush()?,
            Sink::Pager(pager) => minus::page_all(pager)?,
        }
        Ok(())
    }
}

/// Whether stdout is read by a person, for automatic coloring
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

//! In-memory log sink for the TUI.
//!
//! While the terminal is in raw mode nothing may be written to stderr, so the
//! subscriber writes into a small ring of recent lines which the log panel
//! displays, newest first.

use color_eyre::eyre::{eyre, Result as EyreResult};
use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::fmt::{time::Uptime, MakeWriter};

/// Most recent log lines kept for display
pub const MAX_LOG_LINES: usize = 15;

#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_front(line);
            lines.truncate(self.capacity);
        }
    }

    /// Newest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// One formatted event; committed to the buffer when dropped
pub struct LogLine {
    buf: Vec<u8>,
    target: LogBuffer,
}

impl io::Write for LogLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.target.push(line.trim_end().to_string());
        }
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogLine;

    fn make_writer(&'a self) -> Self::Writer {
        LogLine {
            buf: Vec::new(),
            target: self.clone(),
        }
    }
}

/// Install the global subscriber writing into `buffer`
pub fn init(buffer: LogBuffer, verbose: bool) -> EyreResult<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(buffer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(Uptime::default())
        .with_max_level(level)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn keeps_newest_lines_up_to_capacity() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.snapshot(), vec!["line 4", "line 3", "line 2"]);
    }

    #[test]
    fn writer_commits_on_drop() {
        let buffer = LogBuffer::new(MAX_LOG_LINES);
        {
            let mut writer = buffer.make_writer();
            write!(writer, "stroke 0 completed").unwrap();
            writeln!(writer, " with 3 notes").unwrap();
            assert!(buffer.snapshot().is_empty());
        }
        assert_eq!(buffer.snapshot(), vec!["stroke 0 completed with 3 notes"]);
    }
}

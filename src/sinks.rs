use std::{
    io::Write,
    sync::{Arc, Mutex, MutexGuard},
};

use eyre::Context;

use crate::{LogSink, Stream};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Writes to the process stdout/stderr.
pub struct StdioSink {}

impl StdioSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogSink for StdioSink {
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<()> {
        // The stream lock is held for the whole line so concurrent records
        // never interleave.
        match stream {
            Stream::Stdout => {
                let mut writer = std::io::stdout().lock();
                writer
                    .write_all(line.as_bytes())
                    .context("Can't write stdout")?;
                writer.flush().context("Can't flush stdout")
            }
            Stream::Stderr => {
                let mut writer = std::io::stderr().lock();
                writer
                    .write_all(line.as_bytes())
                    .context("Can't write stderr")?;
                writer.flush().context("Can't flush stderr")
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().lock().flush();
        let _ = std::io::stderr().lock().flush();
    }
}

#[derive(Default)]
struct Captured {
    bytes: Vec<u8>,
    failing: bool,
}

/// Captures both streams in memory. Clones share the same buffers.
#[derive(Clone, Default)]
pub struct MemorySink {
    stdout: Arc<Mutex<Captured>>,
    stderr: Arc<Mutex<Captured>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn captured(&self, stream: Stream) -> &Mutex<Captured> {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }

    /// Makes every write to `stream` fail until turned off again.
    pub fn set_failing(&self, stream: Stream, failing: bool) {
        lock(self.captured(stream)).failing = failing;
    }

    pub fn contents(&self, stream: Stream) -> String {
        String::from_utf8_lossy(&lock(self.captured(stream)).bytes).into_owned()
    }

    pub fn lines(&self, stream: Stream) -> Vec<String> {
        self.contents(stream).lines().map(str::to_string).collect()
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.lines(Stream::Stdout)
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.lines(Stream::Stderr)
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.stdout).bytes.is_empty() && lock(&self.stderr).bytes.is_empty()
    }

    pub fn clear(&self) {
        lock(&self.stdout).bytes.clear();
        lock(&self.stderr).bytes.clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, stream: Stream, line: &str) -> eyre::Result<()> {
        let mut captured = lock(self.captured(stream));
        if captured.failing {
            return Err(eyre::eyre!("{} is closed", stream));
        }

        captured.bytes.extend_from_slice(line.as_bytes());
        Ok(())
    }

    fn flush(&self) {}
}

pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogSink for NullSink {
    fn write_line(&self, _stream: Stream, _line: &str) -> eyre::Result<()> {
        Ok(())
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_streams_apart() {
        let sink = MemorySink::new();
        sink.write_line(Stream::Stdout, "out\n").unwrap();
        sink.write_line(Stream::Stderr, "err\n").unwrap();

        assert_eq!(sink.stdout_lines(), vec!["out"]);
        assert_eq!(sink.stderr_lines(), vec!["err"]);
    }

    #[test]
    fn memory_sink_clones_share_buffers() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.write_line(Stream::Stdout, "shared\n").unwrap();

        assert_eq!(handle.stdout_lines(), vec!["shared"]);
        handle.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn failing_stream_rejects_writes() {
        let sink = MemorySink::new();
        sink.set_failing(Stream::Stdout, true);

        let err = sink.write_line(Stream::Stdout, "lost\n").unwrap_err();
        assert_eq!(err.to_string(), "stdout is closed");
        assert!(sink.is_empty());

        sink.set_failing(Stream::Stdout, false);
        sink.write_line(Stream::Stdout, "kept\n").unwrap();
        assert_eq!(sink.stdout_lines(), vec!["kept"]);
    }

    #[test]
    fn null_sink_accepts_everything() {
        let sink = NullSink::new();
        assert!(sink.write_line(Stream::Stderr, "gone\n").is_ok());
    }
}

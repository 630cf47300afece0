//! In-memory stream recording
//!
//! An [`InMemoryStreamRecorder`] drains a reader on its own thread into a
//! bounded line buffer. Content travels back to the caller over a bounded
//! channel whose single message doubles as the completion signal; a
//! drain-side I/O failure is carried on the error path of that message and
//! re-raised when the caller requests the content.

use std::io::{BufRead, BufReader, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MAX_LINES: usize = 100;

/// Errors surfaced when requesting recorded stream contents.
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Timed out after {0:?} waiting for stream contents")]
    Timeout(Duration),

    #[error("Stream recorder terminated without delivering contents")]
    Disconnected,

    #[error("Failed to drain stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Records a stream's lines up to a cap; past the cap only the final line is
/// retained and the gap is rendered as a `[...]` line.
#[derive(Debug, Clone)]
pub struct InMemoryStreamRecorder {
    max_lines: usize,
}

impl Default for InMemoryStreamRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl InMemoryStreamRecorder {
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }

    /// Start draining the reader on a dedicated thread.
    pub fn record<R>(&self, reader: R) -> StreamContentsHandle
    where
        R: Read + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);
        let max_lines = self.max_lines;
        let thread = thread::spawn(move || drain(reader, max_lines, sender));
        StreamContentsHandle {
            receiver,
            thread: Some(thread),
        }
    }
}

fn drain<R: Read>(reader: R, max_lines: usize, sender: SyncSender<Result<String, std::io::Error>>) {
    let mut buffer = String::new();
    let mut line_count = 0usize;
    let mut overflow_line = None;

    for line in BufReader::new(reader).lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                // Receiver may already have given up; nothing left to do.
                let _ = sender.send(Err(error));
                return;
            }
        };
        line_count += 1;
        if line_count <= max_lines {
            if line_count > 1 {
                buffer.push('\n');
            }
            buffer.push_str(&line);
        } else {
            overflow_line = Some(line);
        }
    }

    let contents = match overflow_line {
        Some(last_line) => format!("{buffer}\n[...]\n{last_line}"),
        None => buffer,
    };
    let _ = sender.send(Ok(contents));
}

/// Handle to content being recorded on another thread.
pub struct StreamContentsHandle {
    receiver: Receiver<Result<String, std::io::Error>>,
    thread: Option<JoinHandle<()>>,
}

impl StreamContentsHandle {
    /// Block until the stream reaches end-of-file or the timeout elapses,
    /// whichever comes first. A failure raised while draining is re-raised
    /// here, not swallowed.
    pub fn await_contents(mut self, timeout: Duration) -> Result<String, RecorderError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(Ok(contents)) => {
                if let Some(thread) = self.thread.take() {
                    let _ = thread.join();
                }
                Ok(contents)
            }
            Ok(Err(error)) => {
                if let Some(thread) = self.thread.take() {
                    let _ = thread.join();
                }
                Err(RecorderError::Io(error))
            }
            // On timeout the drain thread may still be blocked on the reader;
            // it is left detached rather than joined.
            Err(RecvTimeoutError::Timeout) => Err(RecorderError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(RecorderError::Disconnected),
        }
    }
}

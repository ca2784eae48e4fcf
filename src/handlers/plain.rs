//! # Plain-text collaborators for debugging and demos.
//!
//! [`PlainHandler`] reports and renders fault records as bare text;
//! [`MemoryLogger`] buffers log lines in memory and drains them on the
//! shutdown flush. Both are enabled via the `plain` feature.
//!
//! ## Output format
//! ```text
//! [fault] kind=warning msg="loose comparison" at=eval.src:9     (report, stderr)
//!
//! uncaught: division by zero                                    (console sink)
//!     at calc.src:42
//!
//! [500] uncaught: division by zero (calc.src:42)                (outbound channel)
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use faultvisor::{MemoryLogger, PlainHandler, Runtime};
//! let runtime = Runtime::builder()
//!     .with_handler(Arc::new(PlainHandler))
//!     .with_logger(Arc::new(MemoryLogger::new()))
//!     .build();
//! ```

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::fault::FaultRecord;
use crate::handlers::{Handle, Logger, Response};

/// Bare-text fault handler.
///
/// Enabled via the `plain` feature. Reports one `key=value` line to stderr
/// and renders short text blocks for either context.
///
/// Not intended for production use - implement a custom [`Handle`] for
/// structured reporting or real response formats.
pub struct PlainHandler;

impl PlainHandler {
    fn describe(record: &FaultRecord) -> String {
        let head = format!("{}: {}", record.kind().as_label(), record.message());
        match record.location() {
            Some(location) => format!("{head} ({location})"),
            None => head,
        }
    }
}

impl Handle for PlainHandler {
    fn report(&self, record: &FaultRecord) {
        match record.location() {
            Some(location) => eprintln!(
                "[fault] kind={} msg={:?} at={}",
                record.kind(),
                record.message(),
                location
            ),
            None => eprintln!("[fault] kind={} msg={:?}", record.kind(), record.message()),
        }
    }

    fn render(&self, record: &FaultRecord) -> Box<dyn Response> {
        Box::new(PlainResponse::new(500, Self::describe(record)))
    }

    fn render_for_console(&self, record: &FaultRecord, sink: &mut dyn Write) {
        let _ = writeln!(sink, "{}: {}", record.kind().as_label(), record.message());
        if let Some(location) = record.location() {
            let _ = writeln!(sink, "    at {location}");
        }
        if let Some(cause) = record.cause() {
            let mut source = cause.source();
            while let Some(err) = source {
                let _ = writeln!(sink, "    caused by: {err}");
                source = err.source();
            }
        }
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// One-line text response with a numeric status.
pub struct PlainResponse {
    status: u16,
    body: String,
}

impl PlainResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Response for PlainResponse {
    fn send(&self, channel: &mut dyn Write) -> io::Result<()> {
        writeln!(channel, "[{}] {}", self.status, self.body)
    }
}

/// In-memory line buffer that drains to a writer on flush.
///
/// Enabled via the `plain` feature. The host pushes lines during the run;
/// the shutdown flush drains them to the target (stderr unless replaced).
pub struct MemoryLogger {
    entries: Mutex<Vec<String>>,
    target: Mutex<Box<dyn Write + Send>>,
}

impl MemoryLogger {
    /// Logger draining to stderr.
    pub fn new() -> Self {
        Self::with_target(Box::new(io::stderr()))
    }

    /// Logger draining to the given writer.
    pub fn with_target(target: Box<dyn Write + Send>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            target: Mutex::new(target),
        }
    }

    /// Buffers one line.
    pub fn push(&self, line: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn flush(&self) {
        let drained: Vec<String> = {
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            entries.drain(..).collect()
        };
        let mut target = self
            .target
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for line in drained {
            let _ = writeln!(target, "{line}");
        }
        let _ = target.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::{FaultKind, RawFault};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl SharedSink {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_rendering_includes_kind_message_and_location() {
        let record = FaultRecord::from_raw(RawFault::new(2, "loose comparison").at("eval.src", 9));
        let mut sink = Vec::new();
        PlainHandler.render_for_console(&record, &mut sink);

        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("warning: loose comparison"));
        assert!(text.contains("at eval.src:9"));
    }

    #[test]
    fn test_response_is_one_line_with_status() {
        let record = FaultRecord::new(FaultKind::Uncaught, "division by zero").at("calc.src", 42);
        let response = PlainHandler.render(&record);

        let mut channel = Vec::new();
        response.send(&mut channel).unwrap();
        assert_eq!(
            String::from_utf8(channel).unwrap(),
            "[500] uncaught: division by zero (calc.src:42)\n"
        );
    }

    #[test]
    fn test_memory_logger_drains_on_flush() {
        let sink = SharedSink::default();
        let logger = MemoryLogger::with_target(Box::new(sink.clone()));
        logger.push("request started");
        logger.push("request failed");
        assert_eq!(logger.len(), 2);

        logger.flush();
        assert!(logger.is_empty());
        assert_eq!(sink.contents(), "request started\nrequest failed\n");

        // A second flush has nothing left to write.
        logger.flush();
        assert_eq!(sink.contents(), "request started\nrequest failed\n");
    }
}

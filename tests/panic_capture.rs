//! End-to-end panic interception through the installed process-global hook.
//!
//! Lives in its own integration binary: the hook is process-wide state, so
//! it gets a process of its own here while the inline unit suites all opt
//! out of panic capture. One test walks the whole scenario sequentially -
//! clean capture first, then collaborator failures on both dispatch paths.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use thiserror::Error;

use faultvisor::{
    Config, Exception, ExecutionContext, FaultKind, FaultRecord, Handle, Interceptor, Logger,
    Response, Runtime,
};

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

/// Handler that records every dispatched record and can be switched into a
/// failing mode where `report` panics after recording.
#[derive(Default)]
struct RecordingHandler {
    records: Mutex<Vec<FaultRecord>>,
    fail_reports: AtomicBool,
}

impl RecordingHandler {
    fn records(&self) -> Vec<FaultRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Handle for RecordingHandler {
    fn report(&self, record: &FaultRecord) {
        self.records.lock().unwrap().push(record.clone());
        if self.fail_reports.load(Ordering::SeqCst) {
            panic!("report blew up");
        }
    }

    fn render(&self, record: &FaultRecord) -> Box<dyn Response> {
        Box::new(BodyLine(format!("[500] {}", record.message())))
    }

    fn render_for_console(&self, record: &FaultRecord, sink: &mut dyn Write) {
        let _ = writeln!(sink, "{}", record.message());
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

struct BodyLine(String);

impl Response for BodyLine {
    fn send(&self, channel: &mut dyn Write) -> io::Result<()> {
        writeln!(channel, "{}", self.0)
    }
}

#[derive(Default)]
struct CountingLogger {
    flushes: AtomicUsize,
}

impl Logger for CountingLogger {
    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Error, Debug)]
#[error("order total went negative")]
struct BillingFault;

impl Exception for BillingFault {}

#[test]
fn test_hook_captures_panics_and_contains_reporter_failures() {
    let handler = Arc::new(RecordingHandler::default());
    let logger = Arc::new(CountingLogger::default());
    let outbound = SharedSink::default();
    let runtime = Runtime::builder()
        .with_context(ExecutionContext::Service)
        .with_outbound(Box::new(outbound.clone()))
        .with_handler(Arc::clone(&handler) as Arc<dyn Handle>)
        .with_logger(Arc::clone(&logger) as Arc<dyn Logger>)
        .build();
    let interceptor = Arc::new(Interceptor::new(Config::default()));
    let guard = interceptor
        .clone()
        .register(Arc::clone(&runtime))
        .expect("first registration");

    // An uncaught panic on another thread is dispatched by the hook before
    // the thread finishes unwinding, so joining is enough to observe it.
    let crashed = thread::spawn(|| {
        panic!("split failed");
    })
    .join();
    assert!(crashed.is_err());

    let records = handler.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), FaultKind::Uncaught);
    assert_eq!(records[0].message(), "split failed");
    let site = records[0].location().expect("panic site").to_string();
    assert!(site.contains("panic_capture.rs"), "unexpected site: {site}");
    assert_eq!(outbound.contents(), "[500] split failed\n");

    // A reporter that panics during a host-called dispatch is noted and
    // contained: the record still renders exactly once and the process
    // keeps going.
    handler.fail_reports.store(true, Ordering::SeqCst);
    interceptor.handle_exception(Arc::new(BillingFault));

    let records = handler.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].message(), "order total went negative");
    assert_eq!(
        outbound.contents(),
        "[500] split failed\n[500] order total went negative\n"
    );

    // Same containment when the dispatch came from the hook itself.
    let crashed = thread::spawn(|| {
        panic!("second failure");
    })
    .join();
    assert!(crashed.is_err());

    let records = handler.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].kind(), FaultKind::Uncaught);
    assert_eq!(records[2].message(), "second failure");
    assert_eq!(
        outbound.contents(),
        "[500] split failed\n[500] order total went negative\n[500] second failure\n"
    );

    drop(guard);
    assert_eq!(logger.flushes.load(Ordering::SeqCst), 1);
}

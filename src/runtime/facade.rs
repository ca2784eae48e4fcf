//! # Hosting runtime facade - the slice of the application the interceptor sees.
//!
//! [`Runtime`] carries everything dispatch needs from the embedding
//! application: the execution context, the current reporting mask, the last
//! raw fault the host recorded, the capability [`Registry`], and the two
//! output channels.
//!
//! ```text
//!                    ┌───────────── Runtime ─────────────┐
//!  host ── record ──►│ last-fault slot                   │
//!  host ── adjust ──►│ reporting mask (atomic)           │
//!  host ── bind ────►│ registry: Handle, Logger, ...     │
//!                    │ console sink      (default stderr)│◄── render_for_console
//!                    │ outbound channel  (default stdout)│◄── Response::send
//!                    └───────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - One `Runtime` per process lifetime, shared via `Arc`.
//! - The reporting mask is atomic: the gate always reads the current value,
//!   and adjustments never block a dispatch in flight.
//! - The last-fault slot is host-written; the shutdown path is its consumer.
//! - Sink locks recover from poisoning, since rendering often runs on a
//!   thread that is already failing.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::fault::{RawFault, ReportingMask};
use crate::handlers::{Handle, Logger};
use crate::runtime::Registry;

/// Where the process is executing, which selects the rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Interactive terminal session; faults render to the console sink.
    Console,
    /// Networked request handling; faults render to a response sent on the
    /// outbound channel.
    Service,
}

/// Shared facade over the hosting application.
pub struct Runtime {
    context: ExecutionContext,
    reporting: AtomicU32,
    last_fault: Mutex<Option<RawFault>>,
    registry: Registry,
    console: Mutex<Box<dyn Write + Send>>,
    outbound: Mutex<Box<dyn Write + Send>>,
}

impl Runtime {
    /// Starts building a runtime. Finish with [`RuntimeBuilder::build`].
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Active execution context.
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Current reporting mask.
    pub fn reporting(&self) -> ReportingMask {
        ReportingMask::from_bits(self.reporting.load(Ordering::Relaxed))
    }

    /// Replaces the reporting mask. Takes effect for the next gate check.
    pub fn set_reporting(&self, mask: ReportingMask) {
        self.reporting.store(mask.bits(), Ordering::Relaxed);
    }

    /// Records the most recent raw fault. The previous one is replaced.
    ///
    /// Fatal engine conditions never travel through the live error path;
    /// this slot is how they stay visible until the shutdown sweep reads it.
    pub fn record_fault(&self, fault: RawFault) {
        let mut slot = self
            .last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(fault);
    }

    /// The most recent recorded raw fault, if any.
    pub fn last_fault(&self) -> Option<RawFault> {
        self.last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The capability registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Binds the fault handler capability.
    pub fn set_handler(&self, handler: Arc<dyn Handle>) {
        self.registry.bind(handler);
    }

    /// Binds the logger capability.
    pub fn set_logger(&self, logger: Arc<dyn Logger>) {
        self.registry.bind(logger);
    }

    /// Runs `f` with exclusive access to the console sink.
    pub(crate) fn with_console<R>(&self, f: impl FnOnce(&mut dyn Write) -> R) -> R {
        let mut sink = self
            .console
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(sink.as_mut())
    }

    /// Runs `f` with exclusive access to the outbound channel.
    pub(crate) fn with_outbound<R>(&self, f: impl FnOnce(&mut dyn Write) -> R) -> R {
        let mut channel = self
            .outbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(channel.as_mut())
    }
}

/// # Builder for [`Runtime`].
///
/// ## Defaults
/// - context: [`ExecutionContext::Console`]
/// - reporting: [`ReportingMask::ALL`]
/// - console sink: stderr
/// - outbound channel: stdout
/// - no handler, no logger bound
pub struct RuntimeBuilder {
    context: ExecutionContext,
    reporting: ReportingMask,
    console: Option<Box<dyn Write + Send>>,
    outbound: Option<Box<dyn Write + Send>>,
    handler: Option<Arc<dyn Handle>>,
    logger: Option<Arc<dyn Logger>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            context: ExecutionContext::Console,
            reporting: ReportingMask::ALL,
            console: None,
            outbound: None,
            handler: None,
            logger: None,
        }
    }

    /// Sets the execution context.
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Sets the initial reporting mask.
    ///
    /// Registration may overwrite this with the interceptor's configured
    /// mask; after that, [`Runtime::set_reporting`] adjusts it live.
    pub fn with_reporting(mut self, mask: ReportingMask) -> Self {
        self.reporting = mask;
        self
    }

    /// Replaces the console sink (default: stderr).
    pub fn with_console(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.console = Some(sink);
        self
    }

    /// Replaces the outbound channel (default: stdout).
    pub fn with_outbound(mut self, channel: Box<dyn Write + Send>) -> Self {
        self.outbound = Some(channel);
        self
    }

    /// Binds the fault handler capability.
    pub fn with_handler(mut self, handler: Arc<dyn Handle>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Binds the logger capability.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the shared runtime.
    pub fn build(self) -> Arc<Runtime> {
        let runtime = Runtime {
            context: self.context,
            reporting: AtomicU32::new(self.reporting.bits()),
            last_fault: Mutex::new(None),
            registry: Registry::new(),
            console: Mutex::new(self.console.unwrap_or_else(|| Box::new(io::stderr()))),
            outbound: Mutex::new(self.outbound.unwrap_or_else(|| Box::new(io::stdout()))),
        };
        if let Some(handler) = self.handler {
            runtime.set_handler(handler);
        }
        if let Some(logger) = self.logger {
            runtime.set_logger(logger);
        }
        Arc::new(runtime)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;

    #[test]
    fn test_builder_defaults() {
        let runtime = Runtime::builder().build();
        assert_eq!(runtime.context(), ExecutionContext::Console);
        assert_eq!(runtime.reporting(), ReportingMask::ALL);
        assert!(runtime.last_fault().is_none());
        assert!(runtime.registry().is_empty());
    }

    #[test]
    fn test_reporting_mask_round_trip() {
        let runtime = Runtime::builder()
            .with_reporting(ReportingMask::NONE)
            .build();
        assert_eq!(runtime.reporting(), ReportingMask::NONE);

        runtime.set_reporting(ReportingMask::only(FaultKind::Warning));
        assert!(runtime.reporting().contains(FaultKind::Warning));
        assert!(!runtime.reporting().contains(FaultKind::Notice));
    }

    #[test]
    fn test_last_fault_slot_keeps_the_latest() {
        let runtime = Runtime::builder().build();
        runtime.record_fault(RawFault::new(2, "first"));
        runtime.record_fault(RawFault::new(16, "second").at("boot.src", 3));

        let last = runtime.last_fault().unwrap();
        assert_eq!(last.code, 16);
        assert_eq!(last.message, "second");
        // Reading does not clear the slot.
        assert!(runtime.last_fault().is_some());
    }

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
    fn test_custom_sinks_receive_writes() {
        let console = SharedSink::default();
        let outbound = SharedSink::default();
        let runtime = Runtime::builder()
            .with_console(Box::new(console.clone()))
            .with_outbound(Box::new(outbound.clone()))
            .build();

        runtime.with_console(|sink| writeln!(sink, "to console").unwrap());
        runtime.with_outbound(|channel| writeln!(channel, "to outbound").unwrap());

        assert_eq!(console.contents(), "to console\n");
        assert_eq!(outbound.contents(), "to outbound\n");
    }
}

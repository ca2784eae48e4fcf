//! # Interceptor - capture, classify, and route every uncaught failure.
//!
//! One [`Interceptor`] serves the whole process. It registers with a
//! [`Runtime`](crate::Runtime) exactly once and from then on owns three
//! entry points:
//!
//! ## Architecture
//! ```text
//! raw error ──► handle_runtime_error ──► mask gate ──► Escalation::Dropped
//!                                           │
//!                                           ▼
//!                               Escalation::Escalated(err)
//!                                           │ (host propagates; uncaught)
//! panic hook ───┐                           ▼
//! uncaught exc ─┴─► handle_exception ──► FaultRecord ──► HandlerResolver
//!                                                            │
//!                                            ┌───────────────┤
//!                                            ▼               ▼
//!                                     Handle::report      context?
//!                                      (isolated)          ├─ Console ─► render_for_console ─► console sink
//!                                                          └─ Service ─► render ─► Response::send ─► outbound
//! guard drop ───┐
//! OS signal ────┴─► handle_shutdown ──► residual fault fatal? ─► same dispatch (isolated)
//!                           └──────────► Logger::flush()   (always, exactly once)
//! ```
//!
//! ## Rules
//! - Registration is first-wins; the hooks are inert until it happens.
//! - A signal suppressed by the mask produces no record and no side effect.
//! - A panic in `Handle::report` is caught and noted on stderr; rendering
//!   still runs.
//! - Handler resolution failure is the one sanctioned abnormal termination:
//!   outside shutdown the process aborts rather than swallow a fault.
//! - The shutdown path flushes the logger exactly once, whatever the fatal
//!   dispatch does.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::config::Config;
use crate::core::hook;
use crate::core::resolver::HandlerResolver;
use crate::core::ShutdownGuard;
use crate::error::{EscalatedError, Escalation, InterceptError};
use crate::fault::{Exception, FaultKind, FaultRecord, RawFault};
use crate::runtime::{ExecutionContext, Runtime};

/// How a dispatched record was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Rendered to the interactive console sink.
    Console,
    /// Rendered to a response and sent on the outbound channel.
    Responded,
}

/// Process-wide fault interceptor.
///
/// ### Responsibilities
/// - normalize every input (raw signal, exception, residual fatal) into a
///   [`FaultRecord`] before any collaborator sees it;
/// - gate raw signals through the runtime's reporting mask;
/// - resolve the handler per dispatch and drive report-then-render;
/// - run the shutdown sweep and guarantee the final logger flush.
///
/// ### Notes
/// The interceptor holds no handler or logger itself; collaborators live in
/// the runtime registry and can be rebound at any time.
pub struct Interceptor {
    config: Config,
    runtime: OnceLock<Arc<Runtime>>,
    shutdown_done: AtomicBool,
}

impl Interceptor {
    /// Creates an unregistered interceptor.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            runtime: OnceLock::new(),
            shutdown_done: AtomicBool::new(false),
        }
    }

    /// Attaches the interceptor to the hosting runtime.
    ///
    /// First call wins: it installs the configured reporting mask, installs
    /// the process-global panic hook (unless `capture_panics` is off), and
    /// returns the [`ShutdownGuard`] whose drop runs [`handle_shutdown`].
    /// Later calls change nothing and return `None`.
    ///
    /// Takes the `Arc` by value (clone it in) because the panic hook and the
    /// guard both keep a reference for the life of the process.
    ///
    /// [`handle_shutdown`]: Interceptor::handle_shutdown
    pub fn register(self: Arc<Self>, runtime: Arc<Runtime>) -> Option<ShutdownGuard> {
        if self.runtime.set(Arc::clone(&runtime)).is_err() {
            return None;
        }
        runtime.set_reporting(self.config.reporting);
        if self.config.capture_panics {
            hook::install(Arc::clone(&self));
        }
        Some(ShutdownGuard::new(self))
    }

    /// Whether [`register`](Interceptor::register) has happened.
    pub fn is_registered(&self) -> bool {
        self.runtime.get().is_some()
    }

    /// Entry point for uncaught exceptions.
    ///
    /// Infallible wrapper over [`dispatch`](Interceptor::dispatch): dispatch
    /// errors become stderr notes, except handler-resolution failure, which
    /// terminates the process - an uncaught fault with nowhere to go must
    /// not be swallowed. Inert before registration.
    pub fn handle_exception(&self, exception: Arc<dyn Exception>) {
        match self.dispatch(exception) {
            Ok(_) => {}
            Err(InterceptError::NotRegistered) => {}
            Err(err @ InterceptError::HandlerUnresolved) => {
                eprintln!("[faultvisor] {err}; terminating");
                process::abort();
            }
            Err(err) => eprintln!("[faultvisor] dispatch failed: {err}"),
        }
    }

    /// Normalizes an exception and routes it through the resolved handler.
    ///
    /// This is the fallible core of [`handle_exception`]: report first
    /// (panic-isolated), then render for the runtime's execution context.
    ///
    /// [`handle_exception`]: Interceptor::handle_exception
    pub fn dispatch(&self, exception: Arc<dyn Exception>) -> Result<Dispatch, InterceptError> {
        let runtime = self.runtime.get().ok_or(InterceptError::NotRegistered)?;
        let record = FaultRecord::from_exception(exception);
        let handler = HandlerResolver::resolve(runtime)?;

        // The mark keeps the panic hook from re-dispatching a collaborator
        // panic that is contained right here.
        hook::while_dispatching(|| {
            // A panicking reporter must not mask the fault.
            let reported = catch_unwind(AssertUnwindSafe(|| handler.report(&record)));
            if reported.is_err() {
                eprintln!(
                    "[faultvisor] handler '{}' panicked while reporting",
                    handler.name()
                );
            }

            match runtime.context() {
                ExecutionContext::Console => {
                    runtime.with_console(|sink| handler.render_for_console(&record, sink));
                    Ok(Dispatch::Console)
                }
                ExecutionContext::Service => {
                    let response = handler.render(&record);
                    runtime
                        .with_outbound(|channel| {
                            response.send(channel)?;
                            channel.flush()
                        })
                        .map_err(|source| InterceptError::ResponseWrite { source })?;
                    Ok(Dispatch::Responded)
                }
            }
        })
    }

    /// Entry point for raw runtime errors.
    ///
    /// The reporting mask decides: outside it the signal drops with zero
    /// side effects, inside it the signal becomes an [`EscalatedError`]
    /// carrying its own kind, message, and origin. The outcome is returned
    /// as a value; whether and where the escalated error unwinds is the
    /// caller's call. Inert before registration (everything drops).
    pub fn handle_runtime_error(&self, fault: RawFault) -> Escalation {
        let Some(runtime) = self.runtime.get() else {
            return Escalation::Dropped;
        };
        if !runtime.reporting().allows_raw(fault.code) {
            return Escalation::Dropped;
        }
        Escalation::Escalated(EscalatedError::from_raw(fault))
    }

    /// Entry point for process teardown. Idempotent.
    ///
    /// Reads the runtime's last-fault slot; a residual *fatal* fault is
    /// normalized and dispatched like any uncaught exception, under panic
    /// isolation. The logger flush then runs unconditionally - a failing
    /// dispatch, a missing handler, or a missing fatal cannot cancel it.
    pub fn handle_shutdown(&self) {
        let Some(runtime) = self.runtime.get() else {
            return;
        };
        if self.shutdown_done.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(raw) = runtime.last_fault() {
            if FaultKind::from_raw(raw.code).is_fatal() {
                let exception: Arc<dyn Exception> = Arc::new(EscalatedError::from_raw(raw));
                let dispatched = catch_unwind(AssertUnwindSafe(|| self.dispatch(exception)));
                match dispatched {
                    Ok(Ok(_)) => {}
                    Ok(Err(err)) => eprintln!("[faultvisor] shutdown dispatch failed: {err}"),
                    Err(_) => eprintln!("[faultvisor] shutdown dispatch panicked"),
                }
            }
        }

        match HandlerResolver::resolve_logger(runtime) {
            Ok(logger) => {
                // Marked so the hook does not re-dispatch a flush panic.
                let flushed =
                    hook::while_dispatching(|| catch_unwind(AssertUnwindSafe(|| logger.flush())));
                if flushed.is_err() {
                    eprintln!("[faultvisor] logger panicked during the shutdown flush");
                }
            }
            Err(err) => eprintln!("[faultvisor] {err}; nothing to flush"),
        }
    }
}

//! # faultvisor
//!
//! **Faultvisor** is a process-wide fault interception library for Rust.
//!
//! It installs itself once at startup and becomes the funnel for every
//! uncaught failure a hosting runtime can surface: raw runtime errors,
//! uncaught exceptions (including panics), and fatal conditions discovered
//! only at process teardown. Each one is normalized into a [`FaultRecord`],
//! classified by severity, reported through a pluggable [`Handle`]
//! collaborator, and rendered to the channel that matches the execution
//! context. The crate is designed as a building block for application
//! runtimes and embedders, not as a framework.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  host runtime inputs                         collaborators (registry-bound)
//!  ───────────────────                         ──────────────────────────────
//!
//!  raw error ──► handle_runtime_error ──► mask gate ──► Escalation::Dropped
//!                                            │              (no side effects)
//!                                            ▼
//!                                Escalation::Escalated(err)
//!                                            │  host propagates; if nothing
//!                                            │  catches it:
//!  panic ──► panic hook ──┐                  ▼
//!  uncaught exception ────┴──► handle_exception ──► FaultRecord
//!                                                       │
//!                                            HandlerResolver (per dispatch)
//!                                                       │
//!                                       ┌───────────────┤
//!                                       ▼               ▼
//!                                Handle::report      context?
//!                                 (isolated)          ├─ Console ─► render_for_console ─► console sink
//!                                                     └─ Service ─► render ─► Response::send ─► outbound
//!  guard drop ──────┐
//!  OS signal ───────┴──► handle_shutdown ──► residual fault fatal? ──► same dispatch (isolated)
//!                                 │
//!                                 └────────► Logger::flush()  (always, exactly once)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Interceptor::new(config) ──► register(runtime)      (first call wins)
//!     │                            ├─► install reporting mask on runtime
//!     │                            ├─► install panic hook (unless opted out)
//!     │                            └─► hand back ShutdownGuard
//!     │
//!     ├─ before register: every entry point is inert
//!     │
//!     └─ after register:
//!          ├─► handle_runtime_error(raw)  - mask gate, returns Escalation
//!          ├─► handle_exception(exc)      - report + render, abort only if
//!          │                                no handler can be resolved
//!          └─► handle_shutdown()          - idempotent sweep + final flush
//!                (runs on guard drop, signal watcher, or explicit call;
//!                 a hard kill reaches none of them)
//! ```
//!
//! ## Features
//! | Area               | Description                                                          | Key types / traits                        |
//! |--------------------|----------------------------------------------------------------------|-------------------------------------------|
//! | **Capture API**    | Three entry points for raw errors, exceptions, and teardown.         | [`Interceptor`], [`ShutdownGuard`]        |
//! | **Classification** | Closed kind set with stable raw codes; severity is pure.             | [`FaultKind`], [`FaultRecord`]            |
//! | **Masking**        | Bit mask gating which raw signals escalate at all.                   | [`ReportingMask`], [`Escalation`]         |
//! | **Handling**       | Pluggable reporting/rendering and the shutdown flush target.         | [`Handle`], [`Response`], [`Logger`]      |
//! | **Runtime facade** | Context, mask, last-fault slot, capability registry, output sinks.   | [`Runtime`], [`Registry`]                 |
//! | **Errors**         | Typed machinery errors and the structured escalation exception.      | [`InterceptError`], [`EscalatedError`]    |
//! | **Configuration**  | Registration-time knobs.                                             | [`Config`]                                |
//!
//! ## Optional features
//! - `signal` *(default)*: OS termination-signal watcher that drives the
//!   shutdown sweep ([`signal::watch`]).
//! - `plain`: bare-text demo collaborators ([`PlainHandler`],
//!   [`MemoryLogger`]) _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use faultvisor::{
//!     Config, Escalation, ExecutionContext, FaultKind, Interceptor, RawFault, Runtime,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let builder = Runtime::builder().with_context(ExecutionContext::Console);
//!
//!     // Bind the built-in demo collaborators when available.
//!     #[cfg(feature = "plain")]
//!     let builder = {
//!         use faultvisor::{MemoryLogger, PlainHandler};
//!         builder
//!             .with_handler(Arc::new(PlainHandler))
//!             .with_logger(Arc::new(MemoryLogger::new()))
//!     };
//!
//!     let runtime = builder.build();
//!     let interceptor = Arc::new(Interceptor::new(Config::default()));
//!     let _guard = interceptor.clone().register(Arc::clone(&runtime));
//!
//!     // A raw signal inside the mask becomes a structured exception; the
//!     // host decides where it surfaces.
//!     let raw = RawFault::new(FaultKind::Warning.raw(), "loose comparison").at("eval.src", 9);
//!     match interceptor.handle_runtime_error(raw) {
//!         Escalation::Escalated(err) => assert_eq!(err.kind(), FaultKind::Warning),
//!         Escalation::Dropped => unreachable!("the default mask admits warnings"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod fault;
mod handlers;
mod runtime;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Dispatch, HandlerResolver, Interceptor, PanicError, ShutdownGuard};
pub use error::{EscalatedError, Escalation, InterceptError};
pub use fault::{Exception, FaultKind, FaultRecord, RawFault, ReportingMask, SourceLocation};
pub use handlers::{Handle, Logger, Response};
pub use runtime::{ExecutionContext, Registry, Runtime, RuntimeBuilder};

// Optional: expose the termination-signal watcher.
// Enable with: `--features signal` (on by default)
#[cfg(feature = "signal")]
pub use core::signal;

// Optional: expose the bare-text demo collaborators (demo/reference).
// Enable with: `--features plain`
#[cfg(feature = "plain")]
pub use handlers::{MemoryLogger, PlainHandler, PlainResponse};

//! Interception core: capture, dispatch, and lifecycle.
//!
//! This module contains the embedded implementation of the faultvisor
//! pipeline. The central public API is [`Interceptor`], which owns the
//! three capture entry points and the shutdown sweep.
//!
//! Internal modules:
//! - [`interceptor`]: register-once core, mask gate, dispatch, shutdown sweep;
//! - [`resolver`]: handler/logger lookup against the runtime registry;
//! - [`hook`]: guarded process-global panic capture;
//! - [`guard`]: drop-driven delivery of the shutdown sweep;
//! - [`signal`]: OS termination-signal watcher (feature `signal`).

mod guard;
mod hook;
mod interceptor;
mod resolver;

#[cfg(feature = "signal")]
pub mod signal;

pub use guard::ShutdownGuard;
pub use hook::PanicError;
pub use interceptor::{Dispatch, Interceptor};
pub use resolver::HandlerResolver;

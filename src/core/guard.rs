//! # Shutdown guard - drop-driven delivery of the teardown sweep.
//!
//! [`ShutdownGuard`] is handed out by
//! [`Interceptor::register`](crate::Interceptor::register) and runs
//! [`handle_shutdown`](crate::Interceptor::handle_shutdown) when dropped -
//! on a normal return from `main` and during an unwind alike. Hold it for
//! the life of the process:
//!
//! ```
//! use std::sync::Arc;
//!
//! use faultvisor::{Config, Interceptor, Runtime};
//!
//! let runtime = Runtime::builder().build();
//! let interceptor = Arc::new(Interceptor::new(Config::default()));
//! let _guard = interceptor.clone().register(runtime);
//! // ... application work; dropping the guard runs the shutdown sweep
//! ```
//!
//! The sweep is idempotent, so an explicit
//! [`handle_shutdown`](crate::Interceptor::handle_shutdown) (for example
//! from a signal watcher) followed by the guard's drop still flushes the
//! logger exactly once.
//!
//! A hard kill (SIGKILL and friends) never reaches a `Drop`; nothing here
//! changes that.

use std::fmt;
use std::sync::Arc;

use crate::core::Interceptor;

/// Runs the shutdown sweep on drop.
#[must_use = "the shutdown sweep only runs while the guard is held"]
pub struct ShutdownGuard {
    interceptor: Arc<Interceptor>,
}

impl ShutdownGuard {
    pub(crate) fn new(interceptor: Arc<Interceptor>) -> Self {
        Self { interceptor }
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.interceptor.handle_shutdown();
    }
}

impl fmt::Debug for ShutdownGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownGuard").finish_non_exhaustive()
    }
}

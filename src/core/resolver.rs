//! # Handler resolution against the runtime registry.
//!
//! [`HandlerResolver`] is the indirection between the interceptor and the
//! concrete collaborators: the handler and logger live in the runtime's
//! registry, and resolution happens per dispatch, so a rebind takes effect
//! on the very next fault.
//!
//! ## Rules
//! - Resolution failure for the handler has no degraded mode. Dispatch
//!   refuses to continue, and outside the shutdown path the interceptor
//!   terminates the process (see [`Interceptor::handle_exception`]).
//! - Resolution failure for the logger is survivable everywhere: the
//!   shutdown path notes it on stderr and moves on.
//!
//! [`Interceptor::handle_exception`]: crate::Interceptor::handle_exception

use std::sync::Arc;

use crate::error::InterceptError;
use crate::handlers::{Handle, Logger};
use crate::runtime::Runtime;

/// Resolves collaborators from the runtime registry.
pub struct HandlerResolver;

impl HandlerResolver {
    /// Resolves the fault handler capability.
    pub fn resolve(runtime: &Runtime) -> Result<Arc<dyn Handle>, InterceptError> {
        runtime
            .registry()
            .resolve::<dyn Handle>()
            .ok_or(InterceptError::HandlerUnresolved)
    }

    /// Resolves the logger capability.
    pub fn resolve_logger(runtime: &Runtime) -> Result<Arc<dyn Logger>, InterceptError> {
        runtime
            .registry()
            .resolve::<dyn Logger>()
            .ok_or(InterceptError::LoggerUnresolved)
    }
}

//! Errors and escalation outcomes of the interception layer.
//!
//! This module defines two main error types:
//!
//! - [`InterceptError`]: failures of the interception machinery itself.
//! - [`EscalatedError`]: the structured exception produced when a raw
//!   runtime error crosses the reporting mask.
//!
//! [`Escalation`] is the tagged outcome of the mask gate: the gate never
//! unwinds on its own, it returns a value and leaves propagation to the
//! caller.

use thiserror::Error;

use crate::fault::{Exception, FaultKind, FaultRecord, RawFault, SourceLocation};

/// # Failures of the interception machinery.
///
/// These are configuration or plumbing problems, distinct from the faults
/// being dispatched.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InterceptError {
    /// No fault handler is bound in the runtime registry.
    ///
    /// Outside the shutdown path this is unrecoverable: dispatch has nowhere
    /// to deliver the record, and the interceptor terminates the process
    /// rather than swallow the fault.
    #[error("no fault handler bound in the runtime registry")]
    HandlerUnresolved,

    /// No logger is bound in the runtime registry.
    #[error("no logger bound in the runtime registry")]
    LoggerUnresolved,

    /// Dispatch was attempted before [`register`](crate::Interceptor::register).
    #[error("interceptor is not registered with a runtime")]
    NotRegistered,

    /// A rendered response could not be written to the outbound channel.
    #[error("response write to the outbound channel failed: {source}")]
    ResponseWrite {
        /// The I/O failure reported by the channel.
        #[source]
        source: std::io::Error,
    },
}

impl InterceptError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use faultvisor::InterceptError;
    ///
    /// assert_eq!(InterceptError::HandlerUnresolved.as_label(), "handler_unresolved");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            InterceptError::HandlerUnresolved => "handler_unresolved",
            InterceptError::LoggerUnresolved => "logger_unresolved",
            InterceptError::NotRegistered => "not_registered",
            InterceptError::ResponseWrite { .. } => "response_write",
        }
    }
}

/// # Structured exception wrapping an escalated runtime error.
///
/// Produced when a raw signal crosses the reporting mask. The wrapped record
/// keeps the signal's own kind, message, and origin, so escalating a warning
/// does not launder it into a generic failure: if the exception later
/// reaches the interceptor uncaught, the dispatched record still says
/// `warning`.
#[derive(Error, Debug, Clone)]
#[error("{record}")]
pub struct EscalatedError {
    record: FaultRecord,
}

impl EscalatedError {
    /// Wraps a raw signal tuple, normalizing it first.
    pub fn from_raw(raw: RawFault) -> Self {
        Self {
            record: FaultRecord::from_raw(raw),
        }
    }

    /// The normalized record carried by this exception.
    pub fn record(&self) -> &FaultRecord {
        &self.record
    }

    pub fn kind(&self) -> FaultKind {
        self.record.kind()
    }
}

impl Exception for EscalatedError {
    fn fault_kind(&self) -> FaultKind {
        self.record.kind()
    }

    fn location(&self) -> Option<SourceLocation> {
        self.record.location().cloned()
    }
}

/// # Outcome of the reporting-mask gate for one raw runtime error.
///
/// Instead of turning an admitted signal into an unwind at the capture site,
/// the gate hands back a tagged outcome and the host decides where the
/// escalated error surfaces: return it, log it, or let it travel up until
/// [`handle_exception`](crate::Interceptor::handle_exception) catches it.
#[derive(Debug)]
pub enum Escalation {
    /// The signal's code is outside the active mask. No record was built and
    /// no side effect happened.
    Dropped,

    /// The signal crossed the mask and is now a structured exception.
    Escalated(EscalatedError),
}

impl Escalation {
    /// Whether the signal was suppressed by the mask.
    pub fn is_dropped(&self) -> bool {
        matches!(self, Escalation::Dropped)
    }

    /// The escalated exception, if the signal crossed the mask.
    pub fn into_error(self) -> Option<EscalatedError> {
        match self {
            Escalation::Dropped => None,
            Escalation::Escalated(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(InterceptError::LoggerUnresolved.as_label(), "logger_unresolved");
        assert_eq!(InterceptError::NotRegistered.as_label(), "not_registered");
        let write = InterceptError::ResponseWrite {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"),
        };
        assert_eq!(write.as_label(), "response_write");
    }

    #[test]
    fn test_escalated_error_keeps_the_signal_identity() {
        let err = EscalatedError::from_raw(RawFault::new(2, "loose comparison").at("eval.src", 9));
        assert_eq!(err.kind(), FaultKind::Warning);
        assert_eq!(err.to_string(), "loose comparison");
        assert_eq!(err.fault_kind(), FaultKind::Warning);
        assert_eq!(err.location().unwrap().to_string(), "eval.src:9");
    }

    #[test]
    fn test_escalation_accessors() {
        assert!(Escalation::Dropped.is_dropped());
        assert!(Escalation::Dropped.into_error().is_none());

        let escalated = Escalation::Escalated(EscalatedError::from_raw(RawFault::new(256, "boom")));
        assert!(!escalated.is_dropped());
        assert_eq!(escalated.into_error().unwrap().kind(), FaultKind::UserError);
    }
}

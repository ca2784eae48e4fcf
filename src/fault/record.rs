//! # Fault records: the normalized shape of every captured failure.
//!
//! Three inputs reach the interceptor (raw signal tuples, uncaught
//! exception objects, and the residual fault found at shutdown) and all of
//! them normalize into the same immutable [`FaultRecord`] before any handler
//! sees them:
//!
//! ```text
//! RawFault (code, message, location)  ──► FaultRecord::from_raw
//! Arc<dyn Exception>                  ──► FaultRecord::from_exception
//!                                               │
//!                                               ▼
//!                                 { kind, message, location, cause }
//! ```
//!
//! ## Rules
//!
//! - A record never changes after construction; handlers receive shared
//!   references only.
//! - Severity is derived from [`FaultKind::is_fatal`] on demand and is not
//!   stored in the record.
//! - `cause` shares the original exception (`Arc`); normalization never
//!   copies or mutates it.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::fault::FaultKind;

/// File and line where a failure originated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    file: Arc<str>,
    line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Raw signal tuple as delivered by the hosting runtime.
///
/// This is the untyped input side of the pipeline: `code` may carry any
/// value, including bits outside the known [`FaultKind`] set. Nothing here
/// is validated; normalization happens in [`FaultRecord::from_raw`].
#[derive(Debug, Clone)]
pub struct RawFault {
    pub code: u32,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl RawFault {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Attaches the origin of the signal.
    pub fn at(mut self, file: impl Into<Arc<str>>, line: u32) -> Self {
        self.location = Some(SourceLocation::new(file, line));
        self
    }
}

/// An application exception, as the interceptor sees it.
///
/// The supertrait keeps standard `source()` chains intact, so any
/// `Error + Send + Sync` type can opt in with an empty impl block. The two
/// provided methods let richer exceptions steer classification:
///
/// - [`fault_kind`](Exception::fault_kind) decides the record's kind (and
///   through it, severity);
/// - [`location`](Exception::location) surfaces an origin when the type
///   carries one.
pub trait Exception: StdError + Send + Sync {
    /// Failure class attributed to this exception when it reaches the
    /// interceptor uncaught.
    fn fault_kind(&self) -> FaultKind {
        FaultKind::Uncaught
    }

    /// Origin of the failure, when the exception knows it.
    fn location(&self) -> Option<SourceLocation> {
        None
    }
}

/// Immutable, normalized representation of one captured failure.
///
/// Everything downstream of capture (reporting, rendering, the shutdown
/// path) consumes this type and nothing rawer.
#[derive(Debug, Clone)]
pub struct FaultRecord {
    kind: FaultKind,
    message: Arc<str>,
    location: Option<SourceLocation>,
    cause: Option<Arc<dyn Exception>>,
}

impl FaultRecord {
    /// Record with the given kind and message, and nothing else attached.
    pub fn new(kind: FaultKind, message: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
            cause: None,
        }
    }

    /// Attaches an origin. Meaningful only before the record is shared.
    pub fn at(mut self, file: impl Into<Arc<str>>, line: u32) -> Self {
        self.location = Some(SourceLocation::new(file, line));
        self
    }

    /// Normalizes a raw signal tuple.
    ///
    /// The code is classified via [`FaultKind::from_raw`]; unknown codes
    /// yield [`FaultKind::Recoverable`], so every tuple produces a valid
    /// record. Message and location carry over untouched.
    pub fn from_raw(raw: RawFault) -> Self {
        Self {
            kind: FaultKind::from_raw(raw.code),
            message: raw.message.into(),
            location: raw.location,
            cause: None,
        }
    }

    /// Normalizes an uncaught exception, keeping it attached as `cause`.
    pub fn from_exception(cause: Arc<dyn Exception>) -> Self {
        Self {
            kind: cause.fault_kind(),
            message: cause.to_string().into(),
            location: cause.location(),
            cause: Some(cause),
        }
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// The original exception, when this record came from one.
    pub fn cause(&self) -> Option<&Arc<dyn Exception>> {
        self.cause.as_ref()
    }

    /// Severity, derived from the kind.
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Message only; kind and location stay out so wrapping a record in an
/// exception does not change the message text.
impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("cache poisoned")]
    struct CachePoisoned;

    impl Exception for CachePoisoned {
        fn fault_kind(&self) -> FaultKind {
            FaultKind::UserError
        }

        fn location(&self) -> Option<SourceLocation> {
            Some(SourceLocation::new("cache.rs", 7))
        }
    }

    #[derive(Error, Debug)]
    #[error("plain failure")]
    struct PlainFailure;

    impl Exception for PlainFailure {}

    #[test]
    fn test_from_raw_keeps_the_tuple_fields() {
        let record = FaultRecord::from_raw(RawFault::new(2, "shadowed binding").at("main.src", 14));
        assert_eq!(record.kind(), FaultKind::Warning);
        assert_eq!(record.message(), "shadowed binding");
        let location = record.location().unwrap();
        assert_eq!(location.file(), "main.src");
        assert_eq!(location.line(), 14);
        assert!(record.cause().is_none());
        assert!(!record.is_fatal());
    }

    #[test]
    fn test_from_raw_normalizes_unknown_codes() {
        let record = FaultRecord::from_raw(RawFault::new(2048, "odd signal"));
        assert_eq!(record.kind(), FaultKind::Recoverable);
        assert!(record.location().is_none());
    }

    #[test]
    fn test_from_exception_keeps_kind_location_and_cause() {
        let cause: Arc<dyn Exception> = Arc::new(CachePoisoned);
        let record = FaultRecord::from_exception(Arc::clone(&cause));
        assert_eq!(record.kind(), FaultKind::UserError);
        assert_eq!(record.message(), "cache poisoned");
        assert_eq!(record.location().unwrap().to_string(), "cache.rs:7");
        assert!(Arc::ptr_eq(record.cause().unwrap(), &cause));
    }

    #[test]
    fn test_exception_defaults_classify_as_uncaught() {
        let record = FaultRecord::from_exception(Arc::new(PlainFailure));
        assert_eq!(record.kind(), FaultKind::Uncaught);
        assert!(record.is_fatal());
        assert!(record.location().is_none());
    }

    #[test]
    fn test_display_is_the_message_alone() {
        let record = FaultRecord::new(FaultKind::Notice, "checked twice").at("loop.src", 3);
        assert_eq!(record.to_string(), "checked twice");
    }

    #[test]
    fn test_clones_share_the_cause() {
        let record = FaultRecord::from_exception(Arc::new(PlainFailure));
        let copy = record.clone();
        assert!(Arc::ptr_eq(record.cause().unwrap(), copy.cause().unwrap()));
    }
}

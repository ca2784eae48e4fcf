//! Fault data model: kinds, masks, and normalized records.
//!
//! - [`kind`]: closed failure classification with stable raw codes;
//! - [`mask`]: the reporting gate over raw codes;
//! - [`record`]: signal tuples, the exception contract, and the immutable
//!   record every handler consumes.

mod kind;
mod mask;
mod record;

pub use kind::FaultKind;
pub use mask::ReportingMask;
pub use record::{Exception, FaultRecord, RawFault, SourceLocation};

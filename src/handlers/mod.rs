//! Collaborator contracts resolved from the runtime registry.
//!
//! - [`handler`]: the reporting/rendering extension point ([`Handle`]);
//! - [`response`]: the sendable product of service-context rendering;
//! - [`logger`]: the shutdown flush target;
//! - [`plain`]: bare-text demo implementations (feature `plain`).

mod handler;
mod logger;
mod response;

#[cfg(feature = "plain")]
mod plain;

pub use handler::Handle;
pub use logger::Logger;
pub use response::Response;

#[cfg(feature = "plain")]
pub use plain::{MemoryLogger, PlainHandler, PlainResponse};

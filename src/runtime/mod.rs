//! Hosting runtime facade and its capability registry.
//!
//! - [`registry`]: type-indexed lookup for collaborator bindings;
//! - [`facade`]: execution context, reporting state, last-fault slot, and
//!   the two output channels, behind one shared handle.

mod facade;
mod registry;

pub use facade::{ExecutionContext, Runtime, RuntimeBuilder};
pub use registry::Registry;

//! # Interceptor configuration.
//!
//! Provides [`Config`], the knobs applied when the interceptor registers
//! with a runtime. Registration is the only moment these are read; after
//! that, the live reporting mask belongs to the runtime.
//!
//! # Example
//! ```
//! use faultvisor::{Config, FaultKind, ReportingMask};
//!
//! let mut cfg = Config::default();
//! cfg.reporting = ReportingMask::ALL.without(FaultKind::Deprecated);
//! cfg.capture_panics = false;
//!
//! assert!(!cfg.reporting.contains(FaultKind::Deprecated));
//! ```

use crate::fault::ReportingMask;

/// Configuration for [`Interceptor::register`](crate::Interceptor::register).
///
/// ## Field semantics
/// - `reporting`: mask installed on the runtime at registration; adjustable
///   afterwards via [`Runtime::set_reporting`](crate::Runtime::set_reporting)
/// - `capture_panics`: whether registration installs the process-global
///   panic hook
///
/// ## Notes
/// All fields are public; the struct is plain data with no hidden coupling
/// to the interceptor that consumes it.
#[derive(Clone, Debug)]
pub struct Config {
    /// Reporting mask applied to the runtime when the interceptor registers.
    ///
    /// Widening it means raw signals escalate more eagerly; narrowing it
    /// means more signals drop silently at the gate. Uncaught exceptions and
    /// shutdown-detected fatals ignore the mask entirely.
    pub reporting: ReportingMask,

    /// Whether registration installs the process-global panic hook.
    ///
    /// Installation happens at most once per process regardless of how many
    /// interceptors register; the first one wins. Embedders that own their
    /// panic strategy (or tests that must not touch the global hook) set
    /// this to `false`.
    pub capture_panics: bool,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `reporting = ReportingMask::ALL` (report everything)
    /// - `capture_panics = true` (install the panic hook)
    fn default() -> Self {
        Self {
            reporting: ReportingMask::ALL,
            capture_panics: true,
        }
    }
}

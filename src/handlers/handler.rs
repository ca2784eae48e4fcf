//! # Fault handler trait.
//!
//! Provides [`Handle`], the extension point for the reporting and rendering
//! collaborator. The handler is resolved from the runtime registry at
//! dispatch time, so embedders swap reporting behavior by rebinding the
//! capability, without touching the interceptor.
//!
//! ## Architecture
//! ```text
//! dispatch ──► Handle::report(record)            (always, isolated)
//!          └─► context?
//!               ├─ Console ─► Handle::render_for_console(record, sink)
//!               └─ Service ─► Handle::render(record) ─► Response::send(channel)
//! ```
//!
//! ## Rules
//! - Exactly one handler serves a dispatch; there is no handler chain.
//! - `report` runs before any rendering, for every dispatched record.
//! - A panic in `report` is caught and noted on stderr; rendering still runs.
//! - Response shape (status, headers, body) belongs to the handler alone.
//!
//! ## Example
//! ```rust
//! use std::io::Write;
//!
//! use faultvisor::{FaultRecord, Handle, Response};
//!
//! struct JsonHandler;
//!
//! struct JsonBody(String);
//!
//! impl Response for JsonBody {
//!     fn send(&self, channel: &mut dyn Write) -> std::io::Result<()> {
//!         channel.write_all(self.0.as_bytes())
//!     }
//! }
//!
//! impl Handle for JsonHandler {
//!     fn report(&self, record: &FaultRecord) {
//!         eprintln!("fault: {} {}", record.kind(), record.message());
//!     }
//!
//!     fn render(&self, record: &FaultRecord) -> Box<dyn Response> {
//!         Box::new(JsonBody(format!("{{\"error\":\"{}\"}}", record.message())))
//!     }
//!
//!     fn render_for_console(&self, record: &FaultRecord, sink: &mut dyn Write) {
//!         let _ = writeln!(sink, "error: {}", record.message());
//!     }
//!
//!     fn name(&self) -> &'static str { "json" }
//! }
//! ```

use std::io::Write;

use crate::fault::FaultRecord;
use crate::handlers::Response;

/// Reporting and rendering collaborator for dispatched fault records.
///
/// Handlers are shared (`Arc`) and may be called from whichever thread the
/// failure occurred on, including the panic hook.
///
/// ### Implementation requirements
/// - Keep implementations `Send + Sync`; dispatch takes no locks for you.
/// - Do not panic for control flow. A reporting panic is survived but noted
///   on stderr; a rendering panic propagates.
/// - Never assume a location or cause is present; records from raw signals
///   often carry neither.
pub trait Handle: Send + Sync + 'static {
    /// Persists or transmits the record for diagnostics.
    ///
    /// Runs before rendering, for every dispatched record, including the
    /// fatal record dispatched during shutdown.
    fn report(&self, record: &FaultRecord);

    /// Builds the response for a service-context fault.
    ///
    /// The interceptor sends the returned response on the runtime's
    /// outbound channel and flushes the channel afterwards.
    fn render(&self, record: &FaultRecord) -> Box<dyn Response>;

    /// Writes a human-readable rendering to the interactive sink.
    fn render_for_console(&self, record: &FaultRecord, sink: &mut dyn Write);

    /// Returns the handler name used in internal diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "json", "html", "plain").
    /// The default uses `type_name::<Self>()`, which can be verbose -
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

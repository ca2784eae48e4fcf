//! # Example: service_session
//!
//! Demonstrates a networked (service) context with a custom handler and the
//! signal-driven shutdown sweep.
//!
//! Shows how to:
//! - Implement [`Handle`] and [`Response`] for a structured wire format.
//! - Register the interceptor and spawn [`signal::watch`].
//! - Render an uncaught request failure to the outbound channel.
//!
//! ## Flow
//! ```text
//! register ──► spawn signal::watch(interceptor)
//!          ├─► request work ─► handle_runtime_error(user_error) ─► Escalated(err)
//!          │        └─► uncaught ─► handle_exception ─► report + render ─► outbound
//!          └─► Ctrl-C (or demo timeout) ─► handle_shutdown ─► flush
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example service_session --features "plain signal"
//! ```

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use faultvisor::{
    signal, Config, ExecutionContext, FaultKind, FaultRecord, Handle, Interceptor, Logger,
    MemoryLogger, RawFault, Response, Runtime,
};

/// Wire-format handler: one JSON line per fault.
/// In real life, this is where a framework's error page or RPC status
/// would be produced.
struct JsonHandler;

struct JsonBody(String);

impl Response for JsonBody {
    fn send(&self, channel: &mut dyn Write) -> std::io::Result<()> {
        writeln!(channel, "{}", self.0)
    }
}

impl Handle for JsonHandler {
    fn report(&self, record: &FaultRecord) {
        eprintln!("[report] kind={} msg={:?}", record.kind(), record.message());
    }

    fn render(&self, record: &FaultRecord) -> Box<dyn Response> {
        let location = record
            .location()
            .map(|site| format!(r#","at":"{site}""#))
            .unwrap_or_default();
        Box::new(JsonBody(format!(
            r#"{{"status":500,"kind":"{}","message":"{}"{location}}}"#,
            record.kind(),
            record.message(),
        )))
    }

    fn render_for_console(&self, record: &FaultRecord, sink: &mut dyn Write) {
        let _ = writeln!(sink, "{}: {}", record.kind(), record.message());
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Simulated request that trips a runtime error and leaves it uncaught.
fn faulty_request(interceptor: &Interceptor) {
    let outcome = interceptor.handle_runtime_error(
        RawFault::new(FaultKind::UserError.raw(), "order total went negative")
            .at("billing.src", 77),
    );
    if let Some(err) = outcome.into_error() {
        // Nothing upstream catches it, so it lands back in the interceptor.
        interceptor.handle_exception(Arc::new(err));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("service_session demo (run with --features \"plain signal\")\n");

    let logger = Arc::new(MemoryLogger::new());
    let runtime = Runtime::builder()
        .with_context(ExecutionContext::Service)
        .with_handler(Arc::new(JsonHandler))
        .with_logger(Arc::clone(&logger) as Arc<dyn Logger>)
        .build();

    let interceptor = Arc::new(Interceptor::new(Config::default()));
    let guard = interceptor
        .clone()
        .register(Arc::clone(&runtime))
        .context("interceptor already registered")?;

    logger.push("service started");
    let watcher = tokio::spawn(signal::watch(Arc::clone(&interceptor)));

    faulty_request(&interceptor);
    logger.push("request dispatched a fault");

    // Wait briefly for Ctrl-C; otherwise let the guard run the sweep.
    tokio::select! {
        joined = watcher => {
            joined.context("signal watcher panicked")??;
        }
        _ = tokio::time::sleep(Duration::from_secs(3)) => {
            println!("(no signal within 3s; shutting down)");
        }
    }

    drop(guard);
    println!("\nfinished");
    Ok(())
}

//! # Example: console_session
//!
//! Demonstrates the interception pipeline in an interactive (console)
//! context, using the bare-text demo collaborators.
//!
//! Shows how to:
//! - Build a [`Runtime`] with [`PlainHandler`] and [`MemoryLogger`] bound.
//! - Register the [`Interceptor`] and hold its shutdown guard.
//! - Drive raw signals through the reporting mask (drop vs. escalate).
//! - Let the shutdown sweep dispatch a residual fatal and flush the logger.
//!
//! ## Flow
//! ```text
//! register ──► narrow mask ──► handle_runtime_error(notice)  ─► Dropped
//!          ├─► handle_runtime_error(warning) ─► Escalated(err)
//!          │        └─► uncaught ─► handle_exception ─► report + console render
//!          ├─► record_fault(core_fatal)
//!          └─► drop(guard) ─► handle_shutdown ─► dispatch fatal + flush
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example console_session --features plain
//! ```

use std::sync::Arc;

use anyhow::Context;
use faultvisor::{
    Config, Escalation, ExecutionContext, FaultKind, Interceptor, Logger, MemoryLogger,
    PlainHandler, RawFault, ReportingMask, Runtime,
};

fn main() -> anyhow::Result<()> {
    println!("console_session demo (run with --features plain)\n");

    let logger = Arc::new(MemoryLogger::new());
    let runtime = Runtime::builder()
        .with_context(ExecutionContext::Console)
        .with_handler(Arc::new(PlainHandler))
        .with_logger(Arc::clone(&logger) as Arc<dyn Logger>)
        .build();

    let interceptor = Arc::new(Interceptor::new(Config::default()));
    let guard = interceptor
        .clone()
        .register(Arc::clone(&runtime))
        .context("interceptor already registered")?;

    logger.push("session started");

    // Notices fall outside the narrowed mask: dropped without a trace.
    runtime.set_reporting(ReportingMask::ALL.without(FaultKind::Notice));
    let quiet = interceptor.handle_runtime_error(
        RawFault::new(FaultKind::Notice.raw(), "uninitialized binding").at("eval.src", 12),
    );
    println!("notice outcome: dropped={}", quiet.is_dropped());

    // Warnings stay inside the mask: escalated, and (left uncaught here)
    // handed straight back to the interceptor.
    let outcome = interceptor.handle_runtime_error(
        RawFault::new(FaultKind::Warning.raw(), "loose comparison").at("eval.src", 31),
    );
    if let Escalation::Escalated(err) = outcome {
        logger.push(format!("escalated: {err}"));
        interceptor.handle_exception(Arc::new(err));
    }

    // A fatal the live path never saw; the shutdown sweep will find it.
    runtime.record_fault(
        RawFault::new(FaultKind::CoreFatal.raw(), "allocation exhausted").at("boot.src", 3),
    );
    logger.push("session ending");

    drop(guard);
    println!("\nfinished");
    Ok(())
}

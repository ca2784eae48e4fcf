//! # Cross-platform termination-signal watcher.
//!
//! Provides [`watch`], an async helper that completes after the process
//! receives a termination signal and the shutdown sweep has run. Enabled
//! via the `signal` feature.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! ## Rules
//! - The watcher does not synthesize a fault for the signal. Fatal
//!   detection at shutdown reads only the runtime's last-fault slot, so a
//!   signal-driven exit with no recorded fault dispatches nothing and
//!   still flushes the logger.
//! - `SIGKILL` cannot be observed by any userspace hook; a hard kill skips
//!   the sweep entirely.

use std::sync::Arc;

use crate::core::Interceptor;

/// Waits for a termination signal, then runs the shutdown sweep.
///
/// The sweep is idempotent, so combining this with a held
/// [`ShutdownGuard`](crate::ShutdownGuard) still flushes exactly once.
pub async fn watch(interceptor: Arc<Interceptor>) -> std::io::Result<()> {
    wait_for_termination_signal().await?;
    interceptor.handle_shutdown();
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal
/// registration fails.
#[cfg(unix)]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal
/// registration fails.
#[cfg(not(unix))]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

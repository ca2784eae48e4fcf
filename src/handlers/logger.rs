//! # Logger contract - the shutdown flush target.

/// Buffered diagnostics sink owned by the host.
///
/// The interceptor touches this capability in exactly one place: the
/// shutdown path calls [`flush`](Logger::flush) unconditionally - whether a
/// fatal record was found, whether dispatching it succeeded - so buffered
/// entries survive every exit the process can still influence.
///
/// ### Implementation requirements
/// - `flush` must be safe to call on a process that is going down; avoid
///   acquiring locks a failing thread may hold.
/// - Error policy is the implementation's own. There is no return channel;
///   a flush that panics is caught and noted on stderr.
pub trait Logger: Send + Sync + 'static {
    /// Persists any buffered entries.
    fn flush(&self);
}

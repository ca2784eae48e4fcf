//! # Process-global panic capture.
//!
//! A Rust process surfaces uncaught failures through the panic hook; this
//! module owns its installation. Registration calls [`install`] (unless
//! `capture_panics` is off), and from then on every panic is normalized
//! into a [`PanicError`] and fed to
//! [`Interceptor::handle_exception`](crate::Interceptor::handle_exception).
//!
//! ## Rules
//! - Installation happens at most once per process; the first interceptor
//!   to install wins and the previous hook is replaced.
//! - The hook fires for every panic, including panics that are later caught.
//!   Embedders that lean on `catch_unwind` for control flow should turn
//!   `capture_panics` off and feed exceptions in themselves.
//! - The hook never runs collaborator code on the panicking thread. A panic
//!   raised while a thread's hook is still executing is a std-level abort,
//!   before any `catch_unwind` gets a say - so dispatch happens on a
//!   short-lived worker thread with a clean panic state.
//! - A panic raised while a dispatch is in flight (reporting, rendering,
//!   the shutdown flush) gets a stderr note from the hook, never a second
//!   dispatch.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, PanicHookInfo};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::core::Interceptor;
use crate::fault::{Exception, SourceLocation};

static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Runs `f` with the current thread marked as executing collaborator code.
///
/// The installed hook checks the mark: a panic raised under it is already
/// contained by the caller, so the hook notes it on stderr instead of
/// starting a new dispatch. The mark is restored even when `f` unwinds.
pub(crate) fn while_dispatching<R>(f: impl FnOnce() -> R) -> R {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            DISPATCHING.with(|mark| mark.set(self.0));
        }
    }

    let _restore = Restore(DISPATCHING.with(|mark| mark.replace(true)));
    f()
}

fn dispatch_in_flight() -> bool {
    DISPATCHING.with(Cell::get)
}

/// Exception produced when a thread panics while the hook is installed.
///
/// Carries the panic payload (when it is a string) and the panic site, so
/// the dispatched record looks like any other uncaught failure.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct PanicError {
    message: String,
    location: Option<SourceLocation>,
}

impl PanicError {
    fn from_info(info: &PanicHookInfo<'_>) -> Self {
        Self {
            message: payload_message(info.payload()),
            location: info
                .location()
                .map(|site| SourceLocation::new(site.file(), site.line())),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Exception for PanicError {
    fn location(&self) -> Option<SourceLocation> {
        self.location.clone()
    }
}

fn payload_message(payload: &dyn Any) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Installs the process-global panic hook. First call wins.
pub(crate) fn install(interceptor: Arc<Interceptor>) {
    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    panic::set_hook(Box::new(move |info| {
        if dispatch_in_flight() {
            eprintln!("[faultvisor] panic in dispatched collaborator code: {info}");
            return;
        }
        let error = PanicError::from_info(info);
        let interceptor = Arc::clone(&interceptor);
        // This thread is inside panic processing; a collaborator panic here
        // would abort before the interceptor's catch_unwind runs. A fresh
        // thread has a clean panic state. Builder::spawn returns the spawn
        // failure as a value, where thread::spawn would panic in the hook.
        let worker = thread::Builder::new()
            .name("faultvisor-dispatch".to_string())
            .spawn(move || interceptor.handle_exception(Arc::new(error)));
        match worker {
            Ok(handle) => {
                if handle.join().is_err() {
                    eprintln!("[faultvisor] dispatch worker panicked");
                }
            }
            Err(err) => eprintln!("[faultvisor] dispatch worker failed to start: {err}"),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;

    #[test]
    fn test_payload_message_covers_both_string_shapes() {
        assert_eq!(payload_message(&"static text"), "static text");
        assert_eq!(
            payload_message(&"owned text".to_string()),
            "owned text"
        );
        assert_eq!(payload_message(&42_u32), "non-string panic payload");
    }

    #[test]
    fn test_panic_error_classifies_as_uncaught() {
        let error = PanicError {
            message: "index out of bounds".to_string(),
            location: Some(SourceLocation::new("grid.rs", 88)),
        };
        assert_eq!(error.fault_kind(), FaultKind::Uncaught);
        assert_eq!(error.message(), "index out of bounds");
        assert_eq!(error.to_string(), "index out of bounds");
        assert_eq!(error.location().unwrap().to_string(), "grid.rs:88");
    }

    #[test]
    fn test_dispatch_mark_nests_and_clears() {
        assert!(!dispatch_in_flight());
        while_dispatching(|| {
            assert!(dispatch_in_flight());
            while_dispatching(|| assert!(dispatch_in_flight()));
            assert!(dispatch_in_flight());
        });
        assert!(!dispatch_in_flight());
    }

    #[test]
    fn test_dispatch_mark_clears_after_unwind() {
        let caught = std::panic::catch_unwind(|| {
            while_dispatching(|| panic!("contained"));
        });
        assert!(caught.is_err());
        assert!(!dispatch_in_flight());
    }
}

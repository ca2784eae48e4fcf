//! # Fault kinds: the closed classification of captured failures.
//!
//! [`FaultKind`] enumerates every failure class the interceptor understands.
//! Each kind owns a distinct raw code bit, so a
//! [`ReportingMask`](crate::ReportingMask) can admit or suppress whole
//! classes with plain bit arithmetic, and hosts can hand over raw codes
//! without going through the enum first.
//!
//! ## Rules
//!
//! - The set is closed: raw codes outside it normalize to
//!   [`FaultKind::Recoverable`] instead of failing.
//! - Severity is a pure function of kind ([`FaultKind::is_fatal`]) and is
//!   never stored anywhere else.

use std::fmt;

/// Classification of a captured failure.
///
/// The raw code (`kind.raw()`) is the stable wire value used by reporting
/// masks and by hosts that deliver untyped signal tuples.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    // === Fatal classes ===
    /// Unrecoverable runtime failure, including faults derived from an
    /// uncaught exception.
    Uncaught = 1,
    /// Source could not be parsed at all.
    Parse = 4,
    /// Fatal failure inside the hosting runtime's startup core.
    CoreFatal = 16,
    /// Fatal failure while compiling or loading a unit.
    CompileFatal = 64,

    // === Engine diagnostics ===
    /// Non-fatal problem the runtime flagged but recovered from.
    Warning = 2,
    /// Advisory about questionable but legal behavior.
    Notice = 8,
    /// Non-fatal startup-core diagnostic.
    CoreWarning = 32,
    /// Non-fatal compile-time diagnostic.
    CompileWarning = 128,
    /// Use of a construct scheduled for removal.
    Deprecated = 8192,
    /// Failure the runtime offered a recovery path for.
    Recoverable = 4096,

    // === Application-raised diagnostics ===
    /// Error raised explicitly by application code.
    UserError = 256,
    /// Warning raised explicitly by application code.
    UserWarning = 512,
    /// Notice raised explicitly by application code.
    UserNotice = 1024,
    /// Deprecation raised explicitly by application code.
    UserDeprecated = 16384,
}

impl FaultKind {
    /// Every kind, for exhaustive iteration in classifiers and tests.
    pub const ALL: [FaultKind; 14] = [
        FaultKind::Uncaught,
        FaultKind::Parse,
        FaultKind::CoreFatal,
        FaultKind::CompileFatal,
        FaultKind::Warning,
        FaultKind::Notice,
        FaultKind::CoreWarning,
        FaultKind::CompileWarning,
        FaultKind::Deprecated,
        FaultKind::Recoverable,
        FaultKind::UserError,
        FaultKind::UserWarning,
        FaultKind::UserNotice,
        FaultKind::UserDeprecated,
    ];

    /// Stable raw code for this kind (a single mask bit).
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Normalizes a raw code into a kind.
    ///
    /// Codes outside the known set map to [`FaultKind::Recoverable`], so a
    /// signal tuple always yields a valid classification.
    pub fn from_raw(code: u32) -> FaultKind {
        match code {
            1 => FaultKind::Uncaught,
            2 => FaultKind::Warning,
            4 => FaultKind::Parse,
            8 => FaultKind::Notice,
            16 => FaultKind::CoreFatal,
            32 => FaultKind::CoreWarning,
            64 => FaultKind::CompileFatal,
            128 => FaultKind::CompileWarning,
            256 => FaultKind::UserError,
            512 => FaultKind::UserWarning,
            1024 => FaultKind::UserNotice,
            4096 => FaultKind::Recoverable,
            8192 => FaultKind::Deprecated,
            16384 => FaultKind::UserDeprecated,
            _ => FaultKind::Recoverable,
        }
    }

    /// Whether this kind ends the process.
    ///
    /// Exactly four kinds are fatal: [`Uncaught`](FaultKind::Uncaught),
    /// [`CoreFatal`](FaultKind::CoreFatal),
    /// [`CompileFatal`](FaultKind::CompileFatal) and
    /// [`Parse`](FaultKind::Parse). Everything else is reportable but
    /// survivable.
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            FaultKind::Uncaught | FaultKind::CoreFatal | FaultKind::CompileFatal | FaultKind::Parse
        )
    }

    /// Short lowercase label for logs and diagnostics.
    pub fn as_label(&self) -> &'static str {
        match self {
            FaultKind::Uncaught => "uncaught",
            FaultKind::Parse => "parse",
            FaultKind::CoreFatal => "core_fatal",
            FaultKind::CompileFatal => "compile_fatal",
            FaultKind::Warning => "warning",
            FaultKind::Notice => "notice",
            FaultKind::CoreWarning => "core_warning",
            FaultKind::CompileWarning => "compile_warning",
            FaultKind::Deprecated => "deprecated",
            FaultKind::Recoverable => "recoverable",
            FaultKind::UserError => "user_error",
            FaultKind::UserWarning => "user_warning",
            FaultKind::UserNotice => "user_notice",
            FaultKind::UserDeprecated => "user_deprecated",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_codes_are_distinct_bits() {
        let mut seen = 0u32;
        for kind in FaultKind::ALL {
            let bit = kind.raw();
            assert_eq!(bit.count_ones(), 1, "{kind} must own a single bit");
            assert_eq!(seen & bit, 0, "{kind} reuses an already-assigned bit");
            seen |= bit;
        }
    }

    #[test]
    fn test_from_raw_round_trips_known_codes() {
        for kind in FaultKind::ALL {
            assert_eq!(FaultKind::from_raw(kind.raw()), kind);
        }
    }

    #[test]
    fn test_unknown_codes_normalize_to_recoverable() {
        assert_eq!(FaultKind::from_raw(0), FaultKind::Recoverable);
        assert_eq!(FaultKind::from_raw(3), FaultKind::Recoverable);
        assert_eq!(FaultKind::from_raw(2048), FaultKind::Recoverable);
        assert_eq!(FaultKind::from_raw(u32::MAX), FaultKind::Recoverable);
    }

    #[test]
    fn test_fatal_set_is_exactly_four_kinds() {
        let fatal: Vec<FaultKind> = FaultKind::ALL.into_iter().filter(|k| k.is_fatal()).collect();
        assert_eq!(
            fatal,
            vec![
                FaultKind::Uncaught,
                FaultKind::Parse,
                FaultKind::CoreFatal,
                FaultKind::CompileFatal,
            ]
        );
    }

    #[test]
    fn test_labels_are_lowercase_and_unique() {
        let mut labels: Vec<&str> = FaultKind::ALL.iter().map(|k| k.as_label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), FaultKind::ALL.len());
        assert_eq!(FaultKind::CompileFatal.to_string(), "compile_fatal");
    }
}

//! # Reporting mask: which failure classes are reported at all.
//!
//! The mask is the first gate a raw runtime error meets: codes outside it are
//! dropped before a record is built, with no side effect of any kind. It
//! lives on the hosting [`Runtime`](crate::Runtime) as an atomic value, so
//! the gate always sees the current setting, not the one active at
//! registration time.
//!
//! ## Rules
//!
//! - The mask operates on raw code bits, not on [`FaultKind`] values, so
//!   codes outside the known kind set can still be admitted or suppressed.
//! - Masking only gates the runtime-error path. Uncaught exceptions and
//!   shutdown-detected fatals are dispatched regardless of the mask.

use std::ops::BitOr;

use crate::fault::FaultKind;

/// Bit mask over raw fault codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportingMask(u32);

impl ReportingMask {
    /// Admits every code, including ones outside the known kind set.
    pub const ALL: ReportingMask = ReportingMask(u32::MAX);

    /// Admits nothing; every raw error is dropped.
    pub const NONE: ReportingMask = ReportingMask(0);

    /// Mask admitting exactly one kind.
    pub const fn only(kind: FaultKind) -> ReportingMask {
        ReportingMask(kind.raw())
    }

    /// Mask from a raw bit pattern.
    pub const fn from_bits(bits: u32) -> ReportingMask {
        ReportingMask(bits)
    }

    /// Raw bit pattern of this mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the given kind is admitted.
    pub fn contains(self, kind: FaultKind) -> bool {
        self.allows_raw(kind.raw())
    }

    /// Whether a raw code is admitted.
    ///
    /// Admission is bit overlap: a code is reported when any of its bits is
    /// present in the mask.
    pub fn allows_raw(self, code: u32) -> bool {
        self.0 & code != 0
    }

    /// Copy of this mask with one more kind admitted.
    pub fn with(self, kind: FaultKind) -> ReportingMask {
        ReportingMask(self.0 | kind.raw())
    }

    /// Copy of this mask with one kind suppressed.
    pub fn without(self, kind: FaultKind) -> ReportingMask {
        ReportingMask(self.0 & !kind.raw())
    }
}

/// Everything is reported until the host narrows the mask.
impl Default for ReportingMask {
    fn default() -> Self {
        ReportingMask::ALL
    }
}

impl BitOr for ReportingMask {
    type Output = ReportingMask;

    fn bitor(self, rhs: ReportingMask) -> ReportingMask {
        ReportingMask(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_admits_every_kind_and_unknown_codes() {
        for kind in FaultKind::ALL {
            assert!(ReportingMask::ALL.contains(kind));
        }
        assert!(ReportingMask::ALL.allows_raw(2048));
        assert!(!ReportingMask::ALL.allows_raw(0));
    }

    #[test]
    fn test_none_drops_everything() {
        for kind in FaultKind::ALL {
            assert!(!ReportingMask::NONE.contains(kind));
        }
        assert!(!ReportingMask::NONE.allows_raw(u32::MAX));
    }

    #[test]
    fn test_with_and_without_toggle_single_kinds() {
        let mask = ReportingMask::NONE
            .with(FaultKind::Warning)
            .with(FaultKind::Notice);
        assert!(mask.contains(FaultKind::Warning));
        assert!(mask.contains(FaultKind::Notice));
        assert!(!mask.contains(FaultKind::Uncaught));

        let narrowed = mask.without(FaultKind::Warning);
        assert!(!narrowed.contains(FaultKind::Warning));
        assert!(narrowed.contains(FaultKind::Notice));
    }

    #[test]
    fn test_union_via_bitor() {
        let mask = ReportingMask::only(FaultKind::UserError) | ReportingMask::only(FaultKind::Parse);
        assert!(mask.contains(FaultKind::UserError));
        assert!(mask.contains(FaultKind::Parse));
        assert!(!mask.contains(FaultKind::Warning));
    }

    #[test]
    fn test_admission_is_bit_overlap() {
        let mask = ReportingMask::only(FaultKind::Warning);
        // Composite code carrying the warning bit plus an unknown bit.
        assert!(mask.allows_raw(FaultKind::Warning.raw() | 2048));
        assert!(!mask.allows_raw(2048));
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(ReportingMask::default(), ReportingMask::ALL);
    }
}

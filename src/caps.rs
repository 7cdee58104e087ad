//! CPU capability record.
//!
//! The record is taken once, when an [`Engine`](crate::Engine) is built, and
//! never changes afterwards. SIMD kernels only run when the matching archmage
//! token was summoned here, so masking a flag off pins every operation to the
//! slower paths without touching the kernels.

use core::fmt;

#[cfg(target_arch = "x86_64")]
use archmage::{SimdToken, X64V1Token, X64V2Token};

/// The three instruction-set flags the copy paths consult.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilityFlags {
    pub sse2: bool,
    pub sse3: bool,
    pub ssse3: bool,
}

impl CapabilityFlags {
    pub const NONE: Self = Self {
        sse2: false,
        sse3: false,
        ssse3: false,
    };

    pub const ALL: Self = Self {
        sse2: true,
        sse3: true,
        ssse3: true,
    };

    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self {
            sse2: self.sse2 && other.sse2,
            sse3: self.sse3 && other.sse3,
            ssse3: self.ssse3 && other.ssse3,
        }
    }
}

/// Probed CPU features plus the tokens that prove them.
#[derive(Clone, Copy)]
pub struct Capabilities {
    flags: CapabilityFlags,
    #[cfg(target_arch = "x86_64")]
    v1: Option<X64V1Token>,
    #[cfg(target_arch = "x86_64")]
    v2: Option<X64V2Token>,
}

impl Capabilities {
    /// Query the CPU.
    ///
    /// SSE2 comes with the x86-64 baseline tier. SSE3 and SSSE3 are reported
    /// together with the next tier, which is also the one the shuffle kernels
    /// are compiled for. Other architectures report no features.
    pub fn probe() -> Self {
        let caps = Self::detect();
        log::debug!("framecopy: probed {:?}", caps.flags);
        caps
    }

    #[cfg(target_arch = "x86_64")]
    fn detect() -> Self {
        let v1 = X64V1Token::summon();
        let v2 = X64V2Token::summon();
        Self {
            flags: CapabilityFlags {
                sse2: v1.is_some(),
                sse3: v2.is_some(),
                ssse3: v2.is_some(),
            },
            v1,
            v2,
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn detect() -> Self {
        Self::scalar()
    }

    /// A record with every feature off.
    pub const fn scalar() -> Self {
        Self {
            flags: CapabilityFlags::NONE,
            #[cfg(target_arch = "x86_64")]
            v1: None,
            #[cfg(target_arch = "x86_64")]
            v2: None,
        }
    }

    /// Keep only the features also set in `allowed`.
    #[must_use]
    pub fn restrict(self, allowed: CapabilityFlags) -> Self {
        let flags = self.flags.intersect(allowed);
        log::debug!("framecopy: capabilities restricted to {flags:?}");
        Self {
            flags,
            #[cfg(target_arch = "x86_64")]
            v1: if flags.sse2 { self.v1 } else { None },
            #[cfg(target_arch = "x86_64")]
            v2: if flags.ssse3 { self.v2 } else { None },
        }
    }

    #[inline]
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    #[cfg(target_arch = "x86_64")]
    #[inline]
    pub(crate) fn sse2_token(&self) -> Option<X64V1Token> {
        self.v1
    }

    #[cfg(target_arch = "x86_64")]
    #[inline]
    pub(crate) fn ssse3_token(&self) -> Option<X64V2Token> {
        self.v2
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::probe()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("flags", &self.flags)
            .finish()
    }
}

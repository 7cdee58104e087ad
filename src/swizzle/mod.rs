//! Red/blue swap between RGBA and BGRA.
//!
//! Swapping bytes 0 and 2 of every pixel is its own inverse, so one set of
//! kernels serves both directions. Three kernels exist and produce identical
//! bytes:
//!
//! - scalar, one `u32` at a time
//! - SSE2, four pixels per step through 16-bit lane shuffles, starting once
//!   the destination is 16-byte aligned
//! - SSSE3, sixteen pixels per step through `pshufb`

// Row functions take a token and are `#[rite]`; the plane loops are
// `#[arcane]` entry points.

mod scalar;
#[cfg(target_arch = "x86_64")]
mod sse2;
#[cfg(target_arch = "x86_64")]
mod ssse3;


use archmage::ScalarToken;
#[cfg(target_arch = "x86_64")]
use archmage::{X64V1Token, X64V2Token};

use crate::layout::Plane;
use crate::{Capabilities, CapabilityFlags, CopyError, Engine, PixelLayout};

/// Red/blue swap kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapKernel {
    Scalar,
    Sse2,
    Ssse3,
}

impl SwapKernel {
    /// The kernel a whole-image swap of `width` pixels uses.
    ///
    /// The shuffle kernel needs rows that are a multiple of 16 pixels and
    /// both SSE2 and SSSE3; otherwise SSE2 alone picks the lane-shuffle
    /// kernel, and without it everything is scalar.
    pub fn select(flags: CapabilityFlags, width: usize) -> Self {
        if width.is_multiple_of(16) && flags.sse2 && flags.ssse3 {
            Self::Ssse3
        } else if flags.sse2 {
            Self::Sse2
        } else {
            Self::Scalar
        }
    }
}

#[inline(always)]
pub(crate) fn swap_br_u32(v: u32) -> u32 {
    (v & 0xFF00_FF00) | (v.rotate_left(16) & 0x00FF_00FF)
}

/// A kernel bound to the token that lets it run.
#[derive(Clone, Copy)]
enum Bound {
    Scalar(ScalarToken),
    #[cfg(target_arch = "x86_64")]
    Sse2(X64V1Token),
    #[cfg(target_arch = "x86_64")]
    Ssse3(X64V2Token),
}

impl Bound {
    /// Bind `kernel`, stepping down to the next slower kernel whose token is
    /// missing from `caps`.
    fn resolve(kernel: SwapKernel, caps: &Capabilities) -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if kernel == SwapKernel::Ssse3 {
                if let Some(t) = caps.ssse3_token() {
                    return Self::Ssse3(t);
                }
                log::debug!("framecopy: SSSE3 swap unavailable, trying SSE2");
            }
            if matches!(kernel, SwapKernel::Ssse3 | SwapKernel::Sse2) {
                if let Some(t) = caps.sse2_token() {
                    return Self::Sse2(t);
                }
                log::debug!("framecopy: SSE2 swap unavailable, using scalar");
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = caps;
            if kernel != SwapKernel::Scalar {
                log::debug!("framecopy: {kernel:?} swap unavailable, using scalar");
            }
        }
        Self::Scalar(ScalarToken)
    }

    fn run(self, src: &[u8], dst: &mut [u8], plane: Plane) {
        match self {
            Self::Scalar(t) => scalar::swap_plane_scalar(t, src, dst, plane),
            #[cfg(target_arch = "x86_64")]
            Self::Sse2(t) => sse2::swap_plane_sse2(t, src, dst, plane),
            #[cfg(target_arch = "x86_64")]
            Self::Ssse3(t) => ssse3::swap_plane_ssse3(t, src, dst, plane),
        }
    }
}

impl Engine {
    /// Swap red and blue of a tightly packed 4-channel frame, reading source
    /// rows bottom-up when `invert` is set.
    pub fn rgba_to_bgra(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let row = PixelLayout::Rgba.row_bytes(width)?;
        self.rgba_to_bgra_strided(src, row, dst, row, width, height, invert)
    }

    /// [`rgba_to_bgra`](Self::rgba_to_bgra) with independent source and
    /// destination pitches. Destination rows always advance forward.
    #[allow(clippy::too_many_arguments)]
    pub fn rgba_to_bgra_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let kernel = SwapKernel::select(self.flags(), width);
        self.rgba_to_bgra_with_kernel(
            kernel, src, src_pitch, dst, dst_pitch, width, height, invert,
        )
    }

    /// The same byte operation as [`rgba_to_bgra`](Self::rgba_to_bgra).
    pub fn bgra_to_rgba(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        self.rgba_to_bgra(src, dst, width, height, invert)
    }

    /// The same byte operation as
    /// [`rgba_to_bgra_strided`](Self::rgba_to_bgra_strided).
    #[allow(clippy::too_many_arguments)]
    pub fn bgra_to_rgba_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        self.rgba_to_bgra_strided(src, src_pitch, dst, dst_pitch, width, height, invert)
    }

    /// Run the swap on a specific kernel.
    ///
    /// A kernel the capability record cannot back falls through to the next
    /// slower one, ending at scalar. The output does not depend on the kernel.
    #[allow(clippy::too_many_arguments)]
    pub fn rgba_to_bgra_with_kernel(
        &self,
        kernel: SwapKernel,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let row = PixelLayout::Rgba.row_bytes(width)?;
        let plane =
            Plane::new(src, (row, src_pitch), dst, (row, dst_pitch), height)?.invert_src(invert);
        Bound::resolve(kernel, self.capabilities()).run(src, dst, plane);
        Ok(())
    }
}

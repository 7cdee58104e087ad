use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

use super::scalar::swap_br_row_scalar;
use crate::layout::Plane;

/// Pixels to handle one at a time before `dst` sits on a 16-byte boundary.
/// A destination that is not even 4-byte aligned never gets there, so it
/// starts with vectors straight away.
#[inline(always)]
fn align_head(dst: &[u8], pixels: usize) -> usize {
    let addr = dst.as_ptr() as usize;
    if addr % 4 != 0 {
        0
    } else {
        ((addr.wrapping_neg() & 15) / 4).min(pixels)
    }
}

// Red and blue sit in the low bytes of the two 16-bit halves of each pixel.
// Masking them out and swapping the halves moves them while green and alpha
// pass through unchanged.
#[rite]
pub(super) fn swap_br_row_sse2(_token: X64V1Token, src: &[u8], dst: &mut [u8]) {
    let pixels = src.len().min(dst.len()) / 4;
    let head = align_head(dst, pixels);
    swap_br_row_scalar(ScalarToken, &src[..head * 4], &mut dst[..head * 4]);

    let rb_mask = _mm_set1_epi32(0x00FF_00FF);
    let end = head * 4 + (pixels - head) / 4 * 16;
    let mut i = head * 4;
    while i < end {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let ga = _mm_andnot_si128(rb_mask, v);
        let rb = _mm_and_si128(v, rb_mask);
        let br = _mm_shufflehi_epi16::<0xB1>(_mm_shufflelo_epi16::<0xB1>(rb));
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, _mm_or_si128(ga, br));
        i += 16;
    }

    swap_br_row_scalar(ScalarToken, &src[i..pixels * 4], &mut dst[i..pixels * 4]);
}

#[arcane]
pub(super) fn swap_plane_sse2(t: X64V1Token, src: &[u8], dst: &mut [u8], plane: Plane) {
    for y in 0..plane.height {
        swap_br_row_sse2(t, plane.src(src, y), plane.dst(dst, y));
    }
}

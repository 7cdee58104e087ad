use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

use super::scalar::swap_br_row_scalar;
use crate::layout::Plane;

// Bytes 0 and 2 trade places in every 4-byte group.
const BR_SHUF_MASK_SSE: [i8; 16] = [2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15];

#[rite]
pub(super) fn swap_br_row_ssse3(_token: X64V2Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm_loadu_si128(&BR_SHUF_MASK_SSE);
    let n = src.len().min(dst.len()) & !3;
    let mut i = 0;
    while i + 64 <= n {
        let s: &[u8; 64] = src[i..i + 64].try_into().unwrap();
        let d: &mut [u8; 64] = (&mut dst[i..i + 64]).try_into().unwrap();
        let (s0, s1, s2, s3) = split4(s);
        let v0 = _mm_shuffle_epi8(_mm_loadu_si128(s0), mask);
        let v1 = _mm_shuffle_epi8(_mm_loadu_si128(s1), mask);
        let v2 = _mm_shuffle_epi8(_mm_loadu_si128(s2), mask);
        let v3 = _mm_shuffle_epi8(_mm_loadu_si128(s3), mask);
        let (d0, d1, d2, d3) = split4_mut(d);
        _mm_storeu_si128(d0, v0);
        _mm_storeu_si128(d1, v1);
        _mm_storeu_si128(d2, v2);
        _mm_storeu_si128(d3, v3);
        i += 64;
    }
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_shuffle_epi8(_mm_loadu_si128(s), mask);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, v);
        i += 16;
    }
    swap_br_row_scalar(ScalarToken, &src[i..n], &mut dst[i..n]);
}

#[inline(always)]
fn split4(s: &[u8; 64]) -> (&[u8; 16], &[u8; 16], &[u8; 16], &[u8; 16]) {
    let (a, rest) = s.split_first_chunk::<16>().unwrap();
    let (b, rest) = rest.split_first_chunk::<16>().unwrap();
    let (c, d) = rest.split_first_chunk::<16>().unwrap();
    (a, b, c, d.try_into().unwrap())
}

#[inline(always)]
fn split4_mut(
    d: &mut [u8; 64],
) -> (&mut [u8; 16], &mut [u8; 16], &mut [u8; 16], &mut [u8; 16]) {
    let (a, rest) = d.split_first_chunk_mut::<16>().unwrap();
    let (b, rest) = rest.split_first_chunk_mut::<16>().unwrap();
    let (c, rest) = rest.split_first_chunk_mut::<16>().unwrap();
    (a, b, c, rest.try_into().unwrap())
}

#[arcane]
pub(super) fn swap_plane_ssse3(t: X64V2Token, src: &[u8], dst: &mut [u8], plane: Plane) {
    for y in 0..plane.height {
        swap_br_row_ssse3(t, plane.src(src, y), plane.dst(dst, y));
    }
}

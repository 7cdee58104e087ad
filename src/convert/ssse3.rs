use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

use super::scalar::{expand_row_scalar, reduce_row_scalar};
use crate::layout::{ChannelOrder, Plane};

// 3→4: four 3-byte pixels spread into four 4-byte slots, alpha slot zeroed
const RGB_TO_RGBA_SHUF_SSE: [i8; 16] = [0, 1, 2, -128, 3, 4, 5, -128, 6, 7, 8, -128, 9, 10, 11, -128];
const RGB_TO_BGRA_SHUF_SSE: [i8; 16] = [2, 1, 0, -128, 5, 4, 3, -128, 8, 7, 6, -128, 11, 10, 9, -128];

const ALPHA_FF_MASK_SSE: [i8; 16] = [0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1];

// 4→3: packs the first 12 bytes, the last four are zero
const RGBA_TO_RGB_SHUF_SSE: [i8; 16] = [0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14, -128, -128, -128, -128];
const RGBA_TO_BGR_SHUF_SSE: [i8; 16] = [2, 1, 0, 6, 5, 4, 10, 9, 8, 14, 13, 12, -128, -128, -128, -128];

#[rite]
pub(super) fn expand_row_ssse3(_token: X64V2Token, order: ChannelOrder, src: &[u8], dst: &mut [u8]) {
    let shuf = match order {
        ChannelOrder::Keep => _mm_loadu_si128(&RGB_TO_RGBA_SHUF_SSE),
        ChannelOrder::Reverse => _mm_loadu_si128(&RGB_TO_BGRA_SHUF_SSE),
    };
    let alpha = _mm_loadu_si128(&ALPHA_FF_MASK_SSE);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    // each load reads 16 bytes but consumes 12
    while is + 16 <= slen && id + 16 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let v = _mm_or_si128(_mm_shuffle_epi8(_mm_loadu_si128(s), shuf), alpha);
        let d: &mut [u8; 16] = (&mut dst[id..id + 16]).try_into().unwrap();
        _mm_storeu_si128(d, v);
        is += 12;
        id += 16;
    }
    expand_row_scalar(ScalarToken, order, &src[is..], &mut dst[id..]);
}

#[rite]
pub(super) fn reduce_row_ssse3(_token: X64V2Token, order: ChannelOrder, src: &[u8], dst: &mut [u8]) {
    let shuf = match order {
        ChannelOrder::Keep => _mm_loadu_si128(&RGBA_TO_RGB_SHUF_SSE),
        ChannelOrder::Reverse => _mm_loadu_si128(&RGBA_TO_BGR_SHUF_SSE),
    };
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 12 <= dlen {
        let s: &[u8; 16] = src[is..is + 16].try_into().unwrap();
        let packed = _mm_shuffle_epi8(_mm_loadu_si128(s), shuf);
        let mut tmp = [0u8; 16];
        _mm_storeu_si128(&mut tmp, packed);
        dst[id..id + 12].copy_from_slice(&tmp[..12]);
        is += 16;
        id += 12;
    }
    reduce_row_scalar(ScalarToken, order, false, &src[is..], &mut dst[id..]);
}

#[arcane]
pub(super) fn expand_plane_ssse3(
    t: X64V2Token,
    order: ChannelOrder,
    src: &[u8],
    dst: &mut [u8],
    plane: Plane,
) {
    for y in 0..plane.height {
        expand_row_ssse3(t, order, plane.src(src, y), plane.dst(dst, y));
    }
}

#[arcane]
pub(super) fn reduce_plane_ssse3(
    t: X64V2Token,
    order: ChannelOrder,
    src: &[u8],
    dst: &mut [u8],
    plane: Plane,
) {
    for y in 0..plane.height {
        reduce_row_ssse3(t, order, plane.src(src, y), plane.dst(dst, y));
    }
}

//! Non-temporal SSE2 copy.
//!
//! Streaming stores need 16-byte aligned destination pointers and a store
//! fence afterwards, neither of which the safe load/store wrappers express.
//! This is the only module in the crate that uses `unsafe`.

#![allow(unsafe_code)]

use core::arch::x86_64::{
    __m128i, _MM_HINT_NTA, _mm_loadu_si128, _mm_prefetch, _mm_sfence, _mm_stream_si128,
};

use archmage::X64V1Token;

const BLOCK: usize = 128;
const PREFETCH_AHEAD: usize = 256;

/// Copy `src` into `dst` (equal lengths) with non-temporal stores.
///
/// The bytes before the first 16-byte aligned destination address and the
/// bytes after the last full vector are copied plainly.
pub(super) fn stream_copy(_token: X64V1Token, dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());
    let len = dst.len();
    let head = ((dst.as_ptr() as usize).wrapping_neg() & 15).min(len);
    dst[..head].copy_from_slice(&src[..head]);

    let body = (len - head) & !15;
    if body > 0 {
        // SAFETY: the token proves SSE2, both ranges hold `body` bytes starting
        // at `head`, `dst + head` is 16-byte aligned, and `&mut` rules out overlap.
        unsafe {
            stream_body(
                dst[head..head + body].as_mut_ptr(),
                src[head..head + body].as_ptr(),
                body,
            );
        }
    }

    let tail = head + body;
    dst[tail..].copy_from_slice(&src[tail..]);
}

/// # Safety
/// `dst` is 16-byte aligned, `len` is a multiple of 16, both pointers are
/// valid for `len` bytes and the ranges do not overlap.
#[target_feature(enable = "sse2")]
unsafe fn stream_body(dst: *mut u8, src: *const u8, len: usize) {
    let mut at = 0;
    while at + BLOCK <= len {
        unsafe {
            if at + PREFETCH_AHEAD + 64 < len {
                _mm_prefetch::<_MM_HINT_NTA>(src.add(at + PREFETCH_AHEAD) as *const i8);
                _mm_prefetch::<_MM_HINT_NTA>(src.add(at + PREFETCH_AHEAD + 64) as *const i8);
            }
            let s = src.add(at) as *const __m128i;
            let d = dst.add(at) as *mut __m128i;
            let v0 = _mm_loadu_si128(s);
            let v1 = _mm_loadu_si128(s.add(1));
            let v2 = _mm_loadu_si128(s.add(2));
            let v3 = _mm_loadu_si128(s.add(3));
            let v4 = _mm_loadu_si128(s.add(4));
            let v5 = _mm_loadu_si128(s.add(5));
            let v6 = _mm_loadu_si128(s.add(6));
            let v7 = _mm_loadu_si128(s.add(7));
            _mm_stream_si128(d, v0);
            _mm_stream_si128(d.add(1), v1);
            _mm_stream_si128(d.add(2), v2);
            _mm_stream_si128(d.add(3), v3);
            _mm_stream_si128(d.add(4), v4);
            _mm_stream_si128(d.add(5), v5);
            _mm_stream_si128(d.add(6), v6);
            _mm_stream_si128(d.add(7), v7);
        }
        at += BLOCK;
    }
    while at < len {
        unsafe {
            let v = _mm_loadu_si128(src.add(at) as *const __m128i);
            _mm_stream_si128(dst.add(at) as *mut __m128i, v);
        }
        at += 16;
    }
    #[allow(unused_unsafe)]
    unsafe {
        _mm_sfence();
    }
}

extern crate std;

use super::*;
use crate::{Capabilities, CapabilityFlags};
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

fn make_3bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 3).map(|i| (i % 251) as u8).collect()
}

fn make_4bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 4).map(|i| (i % 251) as u8).collect()
}

fn ref_expand(src: &[u8], swap: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 3 * 4);
    for px in src.chunks_exact(3) {
        if swap {
            out.extend_from_slice(&[px[2], px[1], px[0], 255]);
        } else {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
    }
    out
}

fn ref_reduce(src: &[u8], swap: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 4 * 3);
    for px in src.chunks_exact(4) {
        if swap {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        } else {
            out.extend_from_slice(&[px[0], px[1], px[2]]);
        }
    }
    out
}

const PIXEL_COUNTS: &[usize] = &[1, 2, 3, 4, 5, 7, 8, 15, 16, 17, 31, 32, 33, 64, 100];

fn engines() -> [Engine; 2] {
    [
        Engine::new(),
        Engine::with_capabilities(Capabilities::probe().restrict(CapabilityFlags::NONE)),
    ]
}

#[test]
fn rgb_to_rgba_4x2_appends_alpha() {
    let src: Vec<u8> = (1..=24).collect();
    for engine in engines() {
        let mut dst = vec![0u8; 32];
        engine.rgb_to_rgba(&src, &mut dst, 4, 2, false).unwrap();
        assert_eq!(&dst[..8], &[1, 2, 3, 255, 4, 5, 6, 255]);
        assert_eq!(&dst[16..20], &[13, 14, 15, 255]);
        assert_eq!(dst, ref_expand(&src, false));
    }
}

#[test]
fn byte_layout_table() {
    let engine = Engine::new();
    let rgb = [1u8, 2, 3];
    let mut out = [0u8; 4];

    engine.rgb_to_rgba(&rgb, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [1, 2, 3, 255]);
    engine.bgr_to_rgba(&rgb, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [3, 2, 1, 255]);
    engine.rgb_to_bgra(&rgb, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [3, 2, 1, 255]);
    engine.bgr_to_bgra(&rgb, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [1, 2, 3, 255]);

    let rgba = [5u8, 6, 7, 8];
    let mut out = [0u8; 3];
    engine.rgba_to_bgr(&rgba, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [7, 6, 5]);
    engine.bgra_to_rgb(&rgba, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [7, 6, 5]);
    engine.bgra_to_bgr(&rgba, &mut out, 1, 1, false).unwrap();
    assert_eq!(out, [5, 6, 7]);
    engine
        .rgba_to_rgb(&rgba, 4, &mut out, 1, 1, false, false, false)
        .unwrap();
    assert_eq!(out, [5, 6, 7]);
    engine
        .rgba_to_rgb(&rgba, 4, &mut out, 1, 1, false, false, true)
        .unwrap();
    assert_eq!(out, [7, 6, 5]);
}

#[test]
fn expand_inverts_source_rows() {
    // 1x2 RGB
    let src = [1, 2, 3, 4, 5, 6];
    let mut dst = [0u8; 8];
    Engine::new().rgb_to_rgba(&src, &mut dst, 1, 2, true).unwrap();
    assert_eq!(dst, [4, 5, 6, 255, 1, 2, 3, 255]);
}

#[test]
fn reduce_inverts_destination_rows() {
    // 1x2 RGBA with pitch 8
    let src = [1, 2, 3, 9, 0, 0, 0, 0, 4, 5, 6, 9];
    let mut dst = [0u8; 6];
    Engine::new()
        .rgba_to_rgb(&src, 8, &mut dst, 1, 2, true, false, false)
        .unwrap();
    assert_eq!(dst, [4, 5, 6, 1, 2, 3]);
}

#[test]
fn mirror_reverses_pixels_within_rows() {
    let src = [1, 2, 3, 0, 4, 5, 6, 0, 7, 8, 9, 0];
    let mut dst = [0u8; 9];
    Engine::new()
        .rgba_to_rgb(&src, 12, &mut dst, 3, 1, false, true, false)
        .unwrap();
    assert_eq!(dst, [7, 8, 9, 4, 5, 6, 1, 2, 3]);
    Engine::new()
        .rgba_to_rgb(&src, 12, &mut dst, 3, 1, false, true, true)
        .unwrap();
    assert_eq!(dst, [9, 8, 7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn expand_strided_leaves_padding() {
    let (w, h, pitch) = (5, 2, 24);
    let src = make_3bpp(w * h);
    for engine in engines() {
        let mut dst = vec![0xABu8; pitch * h];
        engine
            .rgb_to_bgra_strided(&src, &mut dst, pitch, w, h, false)
            .unwrap();
        let expected = ref_expand(&src, true);
        assert_eq!(&dst[..20], &expected[..20]);
        assert_eq!(&dst[20..24], &[0xAB; 4]);
        assert_eq!(&dst[24..44], &expected[20..]);
    }
}

#[test]
fn reduce_strided_skips_source_padding() {
    let (w, h, pitch) = (17, 3, 17 * 4 + 12);
    let mut src = vec![0u8; pitch * h];
    let body = make_4bpp(w * h);
    for y in 0..h {
        src[y * pitch..y * pitch + w * 4].copy_from_slice(&body[y * w * 4..(y + 1) * w * 4]);
    }
    for engine in engines() {
        let mut dst = vec![0u8; w * 3 * h];
        engine
            .bgra_to_bgr_strided(&src, pitch, &mut dst, w, h, false)
            .unwrap();
        assert_eq!(dst, ref_reduce(&body, false));
        engine
            .rgba_to_bgr_strided(&src, pitch, &mut dst, w, h, false)
            .unwrap();
        assert_eq!(dst, ref_reduce(&body, true));
    }
}

#[test]
fn rgba_rgb_rgba_keeps_color_sets_alpha() {
    let src = make_4bpp(33);
    let engine = Engine::new();
    let mut rgb = vec![0u8; 33 * 3];
    let mut back = vec![0u8; 33 * 4];
    engine
        .rgba_to_rgb(&src, 33 * 4, &mut rgb, 33, 1, false, false, false)
        .unwrap();
    engine.rgb_to_rgba(&rgb, &mut back, 33, 1, false).unwrap();
    for (a, b) in src.chunks_exact(4).zip(back.chunks_exact(4)) {
        assert_eq!(&a[..3], &b[..3]);
        assert_eq!(b[3], 255);
    }
}

#[test]
fn short_destination_is_rejected_before_writing() {
    let mut dst = [0u8; 7];
    assert_eq!(
        Engine::new().rgb_to_rgba(&[1u8; 6], &mut dst, 2, 1, false),
        Err(CopyError::BufferTooSmall {
            needed: 8,
            actual: 7
        })
    );
    assert_eq!(dst, [0; 7]);
}

#[test]
fn permutation_expand() {
    let report = for_each_token_permutation(policy(), |perm| {
        let engine = Engine::new();
        for &n in PIXEL_COUNTS {
            let src = make_3bpp(n * 2);
            let mut dst = vec![0u8; n * 8];
            engine.rgb_to_rgba(&src, &mut dst, n, 2, false).unwrap();
            assert_eq!(dst, ref_expand(&src, false), "rgb_to_rgba n={n} tier={perm}");
            engine.bgr_to_rgba(&src, &mut dst, n, 2, false).unwrap();
            assert_eq!(dst, ref_expand(&src, true), "bgr_to_rgba n={n} tier={perm}");
        }
    });
    std::eprintln!("expand: {report}");
}

#[test]
fn permutation_reduce() {
    let report = for_each_token_permutation(policy(), |perm| {
        let engine = Engine::new();
        for &n in PIXEL_COUNTS {
            let src = make_4bpp(n * 2);
            let mut dst = vec![0u8; n * 6];
            engine.bgra_to_bgr(&src, &mut dst, n, 2, false).unwrap();
            assert_eq!(dst, ref_reduce(&src, false), "bgra_to_bgr n={n} tier={perm}");
            engine.bgra_to_rgb(&src, &mut dst, n, 2, false).unwrap();
            assert_eq!(dst, ref_reduce(&src, true), "bgra_to_rgb n={n} tier={perm}");
        }
    });
    std::eprintln!("reduce: {report}");
}

use archmage::ScalarToken;

use crate::layout::{ChannelOrder, Plane};

#[inline(always)]
fn outer(order: ChannelOrder) -> (usize, usize) {
    match order {
        ChannelOrder::Keep => (0, 2),
        ChannelOrder::Reverse => (2, 0),
    }
}

pub(super) fn expand_row_scalar(
    _token: ScalarToken,
    order: ChannelOrder,
    src: &[u8],
    dst: &mut [u8],
) {
    let (r, b) = outer(order);
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[r];
        d[1] = s[1];
        d[2] = s[b];
        d[3] = 0xFF;
    }
}

pub(super) fn reduce_row_scalar(
    _token: ScalarToken,
    order: ChannelOrder,
    mirror: bool,
    src: &[u8],
    dst: &mut [u8],
) {
    let (r, b) = outer(order);
    let src = src.chunks_exact(4);
    if mirror {
        for (s, d) in src.zip(dst.chunks_exact_mut(3).rev()) {
            d.copy_from_slice(&[s[r], s[1], s[b]]);
        }
    } else {
        for (s, d) in src.zip(dst.chunks_exact_mut(3)) {
            d.copy_from_slice(&[s[r], s[1], s[b]]);
        }
    }
}

pub(super) fn expand_plane_scalar(
    t: ScalarToken,
    order: ChannelOrder,
    src: &[u8],
    dst: &mut [u8],
    plane: Plane,
) {
    for y in 0..plane.height {
        expand_row_scalar(t, order, plane.src(src, y), plane.dst(dst, y));
    }
}

pub(super) fn reduce_plane_scalar(
    t: ScalarToken,
    order: ChannelOrder,
    mirror: bool,
    src: &[u8],
    dst: &mut [u8],
    plane: Plane,
) {
    for y in 0..plane.height {
        reduce_row_scalar(t, order, mirror, plane.src(src, y), plane.dst(dst, y));
    }
}

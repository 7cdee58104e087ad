use archmage::ScalarToken;

use super::swap_br_u32;
use crate::layout::Plane;

pub(super) fn swap_br_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let v = u32::from_ne_bytes([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&swap_br_u32(v).to_ne_bytes());
    }
}

pub(super) fn swap_plane_scalar(t: ScalarToken, src: &[u8], dst: &mut [u8], plane: Plane) {
    for y in 0..plane.height {
        swap_br_row_scalar(t, plane.src(src, y), plane.dst(dst, y));
    }
}

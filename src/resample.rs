//! Nearest-neighbor scaling from 4-channel sources.
//!
//! Destination pixel `(i, j)` reads source pixel
//! `(i * src_height / dst_height, j * src_width / dst_width)`, rounded down.
//! `invert` places destination rows bottom-up and `mirror` places columns
//! right to left; the source sample for a destination position does not
//! change.

use crate::layout::{ChannelOrder, check_plane};
use crate::{CopyError, Engine, PixelLayout};

/// Source or destination extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
}

impl Extent {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[inline(always)]
fn nearest(i: usize, src: usize, dst: usize) -> usize {
    (i as u64 * src as u64 / dst as u64) as usize
}

#[derive(Clone, Copy)]
pub(crate) struct Sampling {
    pub out: PixelLayout,
    pub order: ChannelOrder,
    pub invert: bool,
    pub mirror: bool,
}

impl Engine {
    pub(crate) fn resample(
        &self,
        (src, src_pitch, from): (&[u8], usize, Extent),
        (dst, dst_pitch, to): (&mut [u8], usize, Extent),
        s: Sampling,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() || from.is_empty() || to.is_empty() {
            return Ok(());
        }
        let src_row = PixelLayout::Rgba.row_bytes(from.width)?;
        let dst_row = s.out.row_bytes(to.width)?;
        check_plane(src.len(), src_row, from.height, src_pitch)?;
        check_plane(dst.len(), dst_row, to.height, dst_pitch)?;

        let bpp = s.out.bytes_per_pixel();
        let (r, b) = match s.order {
            ChannelOrder::Keep => (0, 2),
            ChannelOrder::Reverse => (2, 0),
        };
        for i in 0..to.height {
            let sy = nearest(i, from.height, to.height);
            let dy = if s.invert { to.height - 1 - i } else { i };
            let src_line = &src[sy * src_pitch..sy * src_pitch + src_row];
            let dst_line = &mut dst[dy * dst_pitch..dy * dst_pitch + dst_row];
            for j in 0..to.width {
                let sx = nearest(j, from.width, to.width) * 4;
                let dx = (if s.mirror { to.width - 1 - j } else { j }) * bpp;
                let px = &src_line[sx..sx + 4];
                let out = &mut dst_line[dx..dx + bpp];
                out[0] = px[r];
                out[1] = px[1];
                out[2] = px[b];
                if bpp == 4 {
                    out[3] = px[3];
                }
            }
        }
        Ok(())
    }

    /// Scale an RGBA frame to a tightly packed RGBA destination.
    pub fn rgba_to_rgba_resample(
        &self,
        src: &[u8],
        src_pitch: usize,
        from: Extent,
        dst: &mut [u8],
        to: Extent,
        invert: bool,
    ) -> Result<(), CopyError> {
        let s = Sampling {
            out: PixelLayout::Rgba,
            order: ChannelOrder::Keep,
            invert,
            mirror: false,
        };
        let dst_pitch = PixelLayout::Rgba.row_bytes(to.width)?;
        self.resample((src, src_pitch, from), (dst, dst_pitch, to), s)
    }

    /// Scale an RGBA frame to tightly packed RGB, or BGR with `swap_rb`.
    #[allow(clippy::too_many_arguments)]
    pub fn rgba_to_rgb_resample(
        &self,
        src: &[u8],
        src_pitch: usize,
        from: Extent,
        dst: &mut [u8],
        to: Extent,
        invert: bool,
        mirror: bool,
        swap_rb: bool,
    ) -> Result<(), CopyError> {
        let s = Sampling {
            out: PixelLayout::Rgb,
            order: ChannelOrder::Keep.toggled(swap_rb),
            invert,
            mirror,
        };
        let dst_pitch = PixelLayout::Rgb.row_bytes(to.width)?;
        self.resample((src, src_pitch, from), (dst, dst_pitch, to), s)
    }

    /// Scale an RGBA frame to tightly packed BGR.
    pub fn rgba_to_bgr_resample(
        &self,
        src: &[u8],
        src_pitch: usize,
        from: Extent,
        dst: &mut [u8],
        to: Extent,
        invert: bool,
    ) -> Result<(), CopyError> {
        let s = Sampling {
            out: PixelLayout::Bgr,
            order: ChannelOrder::Reverse,
            invert,
            mirror: false,
        };
        let dst_pitch = PixelLayout::Bgr.row_bytes(to.width)?;
        self.resample((src, src_pitch, from), (dst, dst_pitch, to), s)
    }
}

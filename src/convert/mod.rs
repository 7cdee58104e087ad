//! Conversions between 3- and 4-channel layouts.
//!
//! Growing to four channels writes alpha 255. Shrinking to three drops
//! alpha. Red and blue trade places whenever exactly one side stores blue
//! first.
//!
//! `invert` always reverses row order on the 3-channel side: the source of
//! an expansion, the destination of a reduction. Pitches apply to the
//! 4-channel side.

mod scalar;
#[cfg(target_arch = "x86_64")]
mod ssse3;

#[cfg(test)]
mod tests;

use archmage::ScalarToken;

use crate::layout::{ChannelOrder, Plane};
use crate::{CopyError, Engine, PixelLayout};

/// Placement and flip options for a 4→3 reduction.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Reduce {
    pub invert: bool,
    pub mirror: bool,
}

impl Engine {
    pub(crate) fn expand(
        &self,
        order: ChannelOrder,
        (src, src_pitch): (&[u8], usize),
        (dst, dst_pitch): (&mut [u8], usize),
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let src_row = PixelLayout::Rgb.row_bytes(width)?;
        let dst_row = PixelLayout::Rgba.row_bytes(width)?;
        let plane = Plane::new(src, (src_row, src_pitch), dst, (dst_row, dst_pitch), height)?
            .invert_src(invert);

        #[cfg(target_arch = "x86_64")]
        if let Some(t) = self.capabilities().ssse3_token() {
            ssse3::expand_plane_ssse3(t, order, src, dst, plane);
            return Ok(());
        }
        scalar::expand_plane_scalar(ScalarToken, order, src, dst, plane);
        Ok(())
    }

    pub(crate) fn reduce(
        &self,
        order: ChannelOrder,
        (src, src_pitch): (&[u8], usize),
        (dst, dst_pitch): (&mut [u8], usize),
        width: usize,
        height: usize,
        opts: Reduce,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let src_row = PixelLayout::Rgba.row_bytes(width)?;
        let dst_row = PixelLayout::Rgb.row_bytes(width)?;
        let plane = Plane::new(src, (src_row, src_pitch), dst, (dst_row, dst_pitch), height)?
            .invert_dst(opts.invert);

        #[cfg(target_arch = "x86_64")]
        if !opts.mirror {
            if let Some(t) = self.capabilities().ssse3_token() {
                ssse3::reduce_plane_ssse3(t, order, src, dst, plane);
                return Ok(());
            }
        }
        scalar::reduce_plane_scalar(ScalarToken, order, opts.mirror, src, dst, plane);
        Ok(())
    }

    /// RGB to RGBA, alpha 255.
    pub fn rgb_to_rgba(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Rgba.row_bytes(width)?;
        self.rgb_to_rgba_strided(src, dst, pitch, width, height, invert)
    }

    /// RGB to RGBA into rows `dst_pitch` bytes apart.
    pub fn rgb_to_rgba_strided(
        &self,
        src: &[u8],
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let src_pitch = PixelLayout::Rgb.row_bytes(width)?;
        self.expand(
            ChannelOrder::Keep,
            (src, src_pitch),
            (dst, dst_pitch),
            width,
            height,
            invert,
        )
    }

    /// BGR to RGBA, alpha 255.
    pub fn bgr_to_rgba(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Rgba.row_bytes(width)?;
        self.bgr_to_rgba_strided(src, dst, pitch, width, height, invert)
    }

    pub fn bgr_to_rgba_strided(
        &self,
        src: &[u8],
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let src_pitch = PixelLayout::Rgb.row_bytes(width)?;
        self.expand(
            ChannelOrder::Reverse,
            (src, src_pitch),
            (dst, dst_pitch),
            width,
            height,
            invert,
        )
    }

    /// RGB to BGRA, alpha 255.
    pub fn rgb_to_bgra(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgra.row_bytes(width)?;
        self.rgb_to_bgra_strided(src, dst, pitch, width, height, invert)
    }

    pub fn rgb_to_bgra_strided(
        &self,
        src: &[u8],
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let src_pitch = PixelLayout::Rgb.row_bytes(width)?;
        self.expand(
            ChannelOrder::Reverse,
            (src, src_pitch),
            (dst, dst_pitch),
            width,
            height,
            invert,
        )
    }

    /// BGR to BGRA, alpha 255.
    pub fn bgr_to_bgra(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgra.row_bytes(width)?;
        self.bgr_to_bgra_strided(src, dst, pitch, width, height, invert)
    }

    pub fn bgr_to_bgra_strided(
        &self,
        src: &[u8],
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let src_pitch = PixelLayout::Rgb.row_bytes(width)?;
        self.expand(
            ChannelOrder::Keep,
            (src, src_pitch),
            (dst, dst_pitch),
            width,
            height,
            invert,
        )
    }

    /// RGBA to BGR, dropping alpha.
    pub fn rgba_to_bgr(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Rgba.row_bytes(width)?;
        self.rgba_to_bgr_strided(src, pitch, dst, width, height, invert)
    }

    /// RGBA rows `src_pitch` bytes apart to tightly packed BGR.
    pub fn rgba_to_bgr_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgr.row_bytes(width)?;
        let opts = Reduce {
            invert,
            mirror: false,
        };
        self.reduce(ChannelOrder::Reverse, (src, src_pitch), (dst, pitch), width, height, opts)
    }

    /// BGRA to RGB, dropping alpha.
    pub fn bgra_to_rgb(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgra.row_bytes(width)?;
        self.bgra_to_rgb_strided(src, pitch, dst, width, height, invert)
    }

    pub fn bgra_to_rgb_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Rgb.row_bytes(width)?;
        let opts = Reduce {
            invert,
            mirror: false,
        };
        self.reduce(ChannelOrder::Reverse, (src, src_pitch), (dst, pitch), width, height, opts)
    }

    /// BGRA to BGR, dropping alpha.
    pub fn bgra_to_bgr(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgra.row_bytes(width)?;
        self.bgra_to_bgr_strided(src, pitch, dst, width, height, invert)
    }

    pub fn bgra_to_bgr_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Bgr.row_bytes(width)?;
        let opts = Reduce {
            invert,
            mirror: false,
        };
        self.reduce(ChannelOrder::Keep, (src, src_pitch), (dst, pitch), width, height, opts)
    }

    /// RGBA rows `src_pitch` bytes apart to tightly packed RGB.
    ///
    /// `mirror` writes pixel `x` to column `width - 1 - x`; `swap_rb` writes
    /// BGR instead.
    #[allow(clippy::too_many_arguments)]
    pub fn rgba_to_rgb(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
        mirror: bool,
        swap_rb: bool,
    ) -> Result<(), CopyError> {
        let pitch = PixelLayout::Rgb.row_bytes(width)?;
        let order = ChannelOrder::Keep.toggled(swap_rb);
        let opts = Reduce { invert, mirror };
        self.reduce(order, (src, src_pitch), (dst, pitch), width, height, opts)
    }
}

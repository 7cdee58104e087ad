//! Whole-frame row operations: vertical flips, padding removal and plain
//! pixel copies.

use crate::copy::{CopyPath, SMALL_COPY_HEIGHT, SMALL_COPY_WIDTH, copy_with};
use crate::layout::{Plane, check_plane};
use crate::{CopyError, Engine, PixelLayout};

impl Engine {
    fn copy_rows(&self, src: &[u8], dst: &mut [u8], plane: Plane, path: CopyPath) {
        for y in 0..plane.height {
            copy_with(self.capabilities(), path, plane.dst(dst, y), plane.src(src, y));
        }
    }

    /// Copy `src` to `dst` upside down: source row `y` lands on destination
    /// row `height - 1 - y`. Both buffers are tightly packed.
    ///
    /// Flipping a buffer onto itself is [`flip_in_place`](Self::flip_in_place).
    pub fn flip_buffer(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let row = layout.row_bytes(width)?;
        let plane = Plane::new(src, (row, row), dst, (row, row), height)?.invert_src(true);
        let small = width < SMALL_COPY_WIDTH || height < SMALL_COPY_HEIGHT;
        let path = CopyPath::select(self.flags(), row, small);
        self.copy_rows(src, dst, plane, path);
        Ok(())
    }

    /// Flip a tightly packed buffer vertically by swapping row pairs.
    pub fn flip_in_place(
        &self,
        buf: &mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<(), CopyError> {
        if buf.is_empty() {
            return Ok(());
        }
        let row = layout.row_bytes(width)?;
        check_plane(buf.len(), row, height, row)?;
        if row == 0 {
            return Ok(());
        }
        let plane = &mut buf[..row * height];
        let (top, bottom) = plane.split_at_mut(row * (height / 2));
        // odd heights leave the middle row where it is
        let bottom = &mut bottom[row * (height % 2)..];
        for (upper, lower) in top.chunks_exact_mut(row).zip(bottom.chunks_exact_mut(row).rev()) {
            upper.swap_with_slice(lower);
        }
        Ok(())
    }

    /// Copy `height` rows of `width` pixels from a source whose rows are
    /// `stride` bytes apart into a tightly packed destination.
    ///
    /// Rows shorter than 320 bytes, or a stride under 320, take plain copies.
    /// The vector and word paths need both the row size and the stride to be
    /// a multiple of their width.
    pub fn remove_padding(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let row = layout.row_bytes(width)?;
        let plane = Plane::new(src, (row, stride), dst, (row, row), height)?;
        let small = row < SMALL_COPY_WIDTH || stride < SMALL_COPY_WIDTH;
        let path = CopyPath::select(self.flags(), row | stride, small);
        self.copy_rows(src, dst, plane, path);
        Ok(())
    }

    /// Copy a tightly packed frame, upside down when `invert` is set.
    pub fn copy_pixels(
        &self,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
        invert: bool,
    ) -> Result<(), CopyError> {
        if invert {
            return self.flip_buffer(src, dst, width, height, layout);
        }
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let row = layout.row_bytes(width)?;
        check_plane(src.len(), row, height, row)?;
        check_plane(dst.len(), row, height, row)?;
        let total = row * height;
        let path = CopyPath::select(self.flags(), total, width < SMALL_COPY_WIDTH);
        copy_with(self.capabilities(), path, &mut dst[..total], &src[..total]);
        Ok(())
    }

    /// Copy an RGBA frame with `src_pitch` bytes per source row into a
    /// tightly packed destination, bottom row first when `invert` is set.
    pub fn rgba_to_rgba(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        let row = PixelLayout::Rgba.row_bytes(width)?;
        self.rgba_to_rgba_strided(src, src_pitch, dst, row, width, height, invert)
    }

    /// [`rgba_to_rgba`](Self::rgba_to_rgba) with an explicit destination pitch.
    /// Destination rows always advance forward.
    #[allow(clippy::too_many_arguments)]
    pub fn rgba_to_rgba_strided(
        &self,
        src: &[u8],
        src_pitch: usize,
        dst: &mut [u8],
        dst_pitch: usize,
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        self.copy_plane(
            PixelLayout::Rgba,
            (src, src_pitch),
            (dst, dst_pitch),
            width,
            height,
            invert,
        )
    }

    /// Row-by-row copy between two pitched planes of the same layout, each
    /// row going through the dispatcher on its own.
    pub(crate) fn copy_plane(
        &self,
        layout: PixelLayout,
        (src, src_pitch): (&[u8], usize),
        (dst, dst_pitch): (&mut [u8], usize),
        width: usize,
        height: usize,
        invert: bool,
    ) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        let row = layout.row_bytes(width)?;
        let plane =
            Plane::new(src, (row, src_pitch), dst, (row, dst_pitch), height)?.invert_src(invert);
        let path = CopyPath::select(self.flags(), row, width < SMALL_COPY_WIDTH);
        self.copy_rows(src, dst, plane, path);
        Ok(())
    }
}

use crate::CopyError;

/// Packed 8-bit pixel layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One byte of luminance.
    Luminance,
    Rgb,
    Bgr,
    Rgba,
    Bgra,
}

impl PixelLayout {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Luminance => 1,
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    #[inline]
    pub const fn channels(self) -> usize {
        self.bytes_per_pixel()
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba | Self::Bgra)
    }

    /// Blue is stored in the first byte.
    #[inline]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Bgr | Self::Bgra)
    }

    /// Tightly packed row size in bytes for `width` pixels.
    pub fn row_bytes(self, width: usize) -> Result<usize, CopyError> {
        width
            .checked_mul(self.bytes_per_pixel())
            .ok_or(CopyError::DimensionsOverflow)
    }
}

/// Whether red and blue trade places between two color layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChannelOrder {
    Keep,
    Reverse,
}

impl ChannelOrder {
    pub(crate) fn between(src: PixelLayout, dst: PixelLayout) -> Self {
        if src.is_reversed() == dst.is_reversed() {
            Self::Keep
        } else {
            Self::Reverse
        }
    }

    pub(crate) fn toggled(self, swap: bool) -> Self {
        match (self, swap) {
            (order, false) => order,
            (Self::Keep, true) => Self::Reverse,
            (Self::Reverse, true) => Self::Keep,
        }
    }
}

/// Check that `height` rows of `row_bytes`, `stride` bytes apart, fit in `len`.
///
/// The last row only needs `row_bytes`, so a buffer may end right after the
/// final pixel.
pub(crate) fn check_plane(
    len: usize,
    row_bytes: usize,
    height: usize,
    stride: usize,
) -> Result<(), CopyError> {
    if stride < row_bytes {
        return Err(CopyError::InvalidStride { stride, row_bytes });
    }
    if height == 0 || row_bytes == 0 {
        return Ok(());
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(CopyError::DimensionsOverflow)?;
    if len < needed {
        return Err(CopyError::BufferTooSmall {
            needed,
            actual: len,
        });
    }
    Ok(())
}

/// Byte offset of row `y` in a plane of `height` rows, counted from the
/// bottom when `invert` is set.
#[inline]
pub(crate) fn row_start(y: usize, height: usize, stride: usize, invert: bool) -> usize {
    let row = if invert { height - 1 - y } else { y };
    row * stride
}

/// Row geometry of a source/destination pair with the same row count.
///
/// Either side may be read bottom-up. Build one with [`Plane::new`] after the
/// buffers are known, then every row slice it hands out is in bounds.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Plane {
    pub height: usize,
    pub src_row: usize,
    pub src_stride: usize,
    pub src_invert: bool,
    pub dst_row: usize,
    pub dst_stride: usize,
    pub dst_invert: bool,
}

impl Plane {
    /// Validate both sides against their buffers.
    pub fn new(
        src: &[u8],
        (src_row, src_stride): (usize, usize),
        dst: &[u8],
        (dst_row, dst_stride): (usize, usize),
        height: usize,
    ) -> Result<Self, CopyError> {
        check_plane(src.len(), src_row, height, src_stride)?;
        check_plane(dst.len(), dst_row, height, dst_stride)?;
        Ok(Self {
            height,
            src_row,
            src_stride,
            src_invert: false,
            dst_row,
            dst_stride,
            dst_invert: false,
        })
    }

    #[must_use]
    pub fn invert_src(self, invert: bool) -> Self {
        Self {
            src_invert: invert,
            ..self
        }
    }

    #[must_use]
    pub fn invert_dst(self, invert: bool) -> Self {
        Self {
            dst_invert: invert,
            ..self
        }
    }

    #[inline(always)]
    pub fn src<'a>(&self, src: &'a [u8], y: usize) -> &'a [u8] {
        let at = row_start(y, self.height, self.src_stride, self.src_invert);
        &src[at..at + self.src_row]
    }

    #[inline(always)]
    pub fn dst<'a>(&self, dst: &'a mut [u8], y: usize) -> &'a mut [u8] {
        let at = row_start(y, self.height, self.dst_stride, self.dst_invert);
        &mut dst[at..at + self.dst_row]
    }
}

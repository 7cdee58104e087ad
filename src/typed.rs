//! Typed pixel slices from the [`rgb`] crate.
//!
//! The byte-level operations take a [`PixelLayout`] next to every buffer.
//! With typed slices the layout comes from the element type instead, and
//! bytemuck does the reinterpretation.
//!
//! ```rust
//! use rgb::{Bgr, Rgba};
//! use framecopy::{Engine, Extent, Transform};
//!
//! let src = vec![Rgba::new(255u8, 0, 128, 255); 4];
//! let mut dst = vec![Bgr::default(); 4];
//! let size = Extent::new(2, 2);
//! Engine::new()
//!     .convert_pixels(&src, size, &mut dst, size, Transform::NONE)
//!     .unwrap();
//! assert_eq!(dst[0], Bgr { b: 128, g: 0, r: 255 });
//! ```

use rgb::{Bgr, Bgra, Gray, Rgb, Rgba};

use crate::{CopyError, Engine, Extent, PixelBuffer, PixelBufferMut, PixelLayout, Transform};

/// An 8-bit pixel type with a fixed [`PixelLayout`].
pub trait Pixel: bytemuck::Pod {
    const LAYOUT: PixelLayout;
}

impl Pixel for Gray<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Luminance;
}

impl Pixel for Rgb<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Rgb;
}

impl Pixel for Bgr<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Bgr;
}

impl Pixel for Rgba<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Rgba;
}

impl Pixel for Bgra<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Bgra;
}

impl<'a> PixelBuffer<'a> {
    /// View tightly packed typed pixels as a frame.
    pub fn from_pixels<P: Pixel>(
        pixels: &'a [P],
        width: usize,
        height: usize,
    ) -> Result<Self, CopyError> {
        Self::new(bytemuck::cast_slice(pixels), width, height, P::LAYOUT)
    }
}

impl<'a> PixelBufferMut<'a> {
    pub fn from_pixels<P: Pixel>(
        pixels: &'a mut [P],
        width: usize,
        height: usize,
    ) -> Result<Self, CopyError> {
        Self::new(bytemuck::cast_slice_mut(pixels), width, height, P::LAYOUT)
    }
}

impl Engine {
    /// [`convert`](Self::convert) between tightly packed typed slices.
    pub fn convert_pixels<S: Pixel, D: Pixel>(
        &self,
        src: &[S],
        from: Extent,
        dst: &mut [D],
        to: Extent,
        t: Transform,
    ) -> Result<(), CopyError> {
        let src = PixelBuffer::from_pixels(src, from.width, from.height)?;
        let dst = PixelBufferMut::from_pixels(dst, to.width, to.height)?;
        self.convert(src, dst, t)
    }
}

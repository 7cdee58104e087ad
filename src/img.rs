//! Strided [`imgref`] images.
//!
//! An image's stride becomes the frame pitch, so padded rows are walked the
//! same way the byte-level operations walk them. No allocation unless a
//! function returns an [`ImgVec`].
//!
//! ```rust
//! use rgb::{Bgra, Rgb};
//! use imgref::{ImgRefMut, ImgVec};
//! use framecopy::{Engine, Transform, img};
//!
//! let src = ImgVec::new(vec![Rgb::new(255u8, 0, 128); 4], 2, 2);
//! let mut buf = vec![Bgra::default(); 4];
//! img::convert_img(&Engine::new(), src.as_ref(), ImgRefMut::new(&mut buf, 2, 2), Transform::NONE)
//!     .unwrap();
//! assert_eq!(buf[0], Bgra { b: 128, g: 0, r: 255, a: 255 });
//! ```

use alloc::vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};

use crate::typed::Pixel;
use crate::{CopyError, Engine, PixelBuffer, PixelBufferMut, Transform};

fn frame<P: Pixel>(img: ImgRef<'_, P>) -> Result<PixelBuffer<'_>, CopyError> {
    let (w, h) = (img.width(), img.height());
    let pitch = img.stride() * size_of::<P>();
    let buf: &[P] = img.into_buf();
    PixelBuffer::with_pitch(bytemuck::cast_slice(buf), w, h, pitch, P::LAYOUT)
}

/// Convert between two images, resampling when their sizes differ.
///
/// Same routing and errors as [`Engine::convert`].
pub fn convert_img<S: Pixel, D: Pixel>(
    engine: &Engine,
    src: ImgRef<'_, S>,
    dst: ImgRefMut<'_, D>,
    t: Transform,
) -> Result<(), CopyError> {
    let (w, h, stride) = (dst.width(), dst.height(), dst.stride());
    let buf: &mut [D] = dst.into_buf();
    let dst = PixelBufferMut::with_pitch(
        bytemuck::cast_slice_mut(buf),
        w,
        h,
        stride * size_of::<D>(),
        D::LAYOUT,
    )?;
    engine.convert(frame(src)?, dst, t)
}

/// Convert into a new, tightly packed image of `width` × `height`.
pub fn to_imgvec<S: Pixel, D: Pixel>(
    engine: &Engine,
    src: ImgRef<'_, S>,
    width: usize,
    height: usize,
    t: Transform,
) -> Result<ImgVec<D>, CopyError> {
    let len = width
        .checked_mul(height)
        .ok_or(CopyError::DimensionsOverflow)?;
    let mut buf = vec![D::zeroed(); len];
    convert_img(engine, src, ImgRefMut::new(&mut buf, width, height), t)?;
    Ok(ImgVec::new(buf, width, height))
}

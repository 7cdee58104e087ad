//! Borrowed frame views and layout routing.

use crate::convert::Reduce;
use crate::layout::{ChannelOrder, check_plane};
use crate::resample::Sampling;
use crate::{CopyError, Engine, Extent, PixelLayout};

/// A readable frame: bytes plus the geometry to walk them.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    pitch: usize,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    /// A tightly packed frame.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self, CopyError> {
        Self::with_pitch(data, width, height, layout.row_bytes(width)?, layout)
    }

    /// A frame whose rows start `pitch` bytes apart.
    pub fn with_pitch(
        data: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<Self, CopyError> {
        check_plane(data.len(), layout.row_bytes(width)?, height, pitch)?;
        Ok(Self {
            data,
            width,
            height,
            pitch,
            layout,
        })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }
}

/// A writable frame.
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    pitch: usize,
    layout: PixelLayout,
}

impl<'a> PixelBufferMut<'a> {
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self, CopyError> {
        let pitch = layout.row_bytes(width)?;
        Self::with_pitch(data, width, height, pitch, layout)
    }

    pub fn with_pitch(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
        layout: PixelLayout,
    ) -> Result<Self, CopyError> {
        check_plane(data.len(), layout.row_bytes(width)?, height, pitch)?;
        Ok(Self {
            data,
            width,
            height,
            pitch,
            layout,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }
}

/// Orientation and channel tweaks applied on top of a layout conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transform {
    /// Reverse row order.
    pub invert: bool,
    /// Reverse pixel order within each row.
    pub mirror: bool,
    /// Swap red and blue on top of whatever the layouts imply.
    pub swap_rb: bool,
}

impl Transform {
    pub const NONE: Self = Self {
        invert: false,
        mirror: false,
        swap_rb: false,
    };

    #[must_use]
    pub const fn inverted(self) -> Self {
        Self {
            invert: true,
            ..self
        }
    }

    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self {
            mirror: true,
            ..self
        }
    }

    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            swap_rb: true,
            ..self
        }
    }
}

impl Engine {
    /// Convert `src` into `dst`, picking the operation from the two layouts
    /// and extents.
    ///
    /// | source | destination | operation |
    /// |---|---|---|
    /// | any | same layout and size | row copy |
    /// | 4 channels | 4 channels, same size | copy or red/blue swap |
    /// | 3 channels | 4 channels, same size | expansion with alpha 255 |
    /// | 4 channels | 3 channels, same size | alpha drop |
    /// | 4 channels | 3 or 4 channels, other size | nearest-neighbor resample |
    ///
    /// Anything else is [`CopyError::Unsupported`]. Mirroring is only
    /// available when the source has four channels, and red/blue swaps only
    /// between color layouts; other requests are
    /// [`CopyError::TransformUnsupported`].
    pub fn convert(
        &self,
        src: PixelBuffer<'_>,
        dst: PixelBufferMut<'_>,
        t: Transform,
    ) -> Result<(), CopyError> {
        let (from, to) = (src.layout, dst.layout);
        let order = ChannelOrder::between(from, to).toggled(t.swap_rb);
        let resample = Sampling {
            out: to,
            order,
            invert: t.invert,
            mirror: t.mirror,
        };
        let (from_extent, to_extent) = (src.extent(), dst.extent());
        let (width, height) = (src.width, src.height);

        if from_extent != to_extent {
            if !from.has_alpha() || to.bytes_per_pixel() < 3 {
                return Err(CopyError::Unsupported { from, to });
            }
            return self.resample(
                (src.data, src.pitch, from_extent),
                (dst.data, dst.pitch, to_extent),
                resample,
            );
        }

        match (from.bytes_per_pixel(), to.bytes_per_pixel()) {
            (4, 4) if t.mirror => self.resample(
                (src.data, src.pitch, from_extent),
                (dst.data, dst.pitch, to_extent),
                resample,
            ),
            (4, 4) => match order {
                ChannelOrder::Keep => self.copy_plane(
                    from,
                    (src.data, src.pitch),
                    (dst.data, dst.pitch),
                    width,
                    height,
                    t.invert,
                ),
                ChannelOrder::Reverse => self.rgba_to_bgra_strided(
                    src.data, src.pitch, dst.data, dst.pitch, width, height, t.invert,
                ),
            },
            (4, 3) => self.reduce(
                order,
                (src.data, src.pitch),
                (dst.data, dst.pitch),
                width,
                height,
                Reduce {
                    invert: t.invert,
                    mirror: t.mirror,
                },
            ),
            (3, 4) if t.mirror => Err(CopyError::TransformUnsupported { from, to }),
            (3, 4) => self.expand(
                order,
                (src.data, src.pitch),
                (dst.data, dst.pitch),
                width,
                height,
                t.invert,
            ),
            _ if from == to => {
                if t.mirror || t.swap_rb {
                    return Err(CopyError::TransformUnsupported { from, to });
                }
                self.copy_plane(
                    from,
                    (src.data, src.pitch),
                    (dst.data, dst.pitch),
                    width,
                    height,
                    t.invert,
                )
            }
            _ => Err(CopyError::Unsupported { from, to }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};

    fn pixels(n: usize, bpp: usize) -> Vec<u8> {
        (0..n * bpp).map(|i| (i * 3 + 1) as u8).collect()
    }

    #[test]
    fn buffer_constructors_validate() {
        let data = [0u8; 15];
        assert!(PixelBuffer::new(&data, 2, 2, PixelLayout::Rgba).is_err());
        assert!(PixelBuffer::new(&data, 5, 1, PixelLayout::Rgb).is_ok());
        assert_eq!(
            PixelBuffer::with_pitch(&data, 2, 2, 4, PixelLayout::Rgb).err(),
            Some(CopyError::InvalidStride {
                stride: 4,
                row_bytes: 6
            })
        );
    }

    #[test]
    fn convert_routes_swap() {
        let src = [10, 20, 30, 40];
        let mut out = [0u8; 4];
        let engine = Engine::new();
        engine
            .convert(
                PixelBuffer::new(&src, 1, 1, PixelLayout::Rgba).unwrap(),
                PixelBufferMut::new(&mut out, 1, 1, PixelLayout::Bgra).unwrap(),
                Transform::NONE,
            )
            .unwrap();
        assert_eq!(out, [30, 20, 10, 40]);

        // swap_rb on an order-preserving pair swaps as well
        engine
            .convert(
                PixelBuffer::new(&src, 1, 1, PixelLayout::Rgba).unwrap(),
                PixelBufferMut::new(&mut out, 1, 1, PixelLayout::Rgba).unwrap(),
                Transform::NONE.swapped(),
            )
            .unwrap();
        assert_eq!(out, [30, 20, 10, 40]);
    }

    #[test]
    fn convert_routes_expand_and_reduce() {
        let engine = Engine::new();
        let rgb = pixels(6, 3);
        let mut bgra = vec![0u8; 6 * 4];
        engine
            .convert(
                PixelBuffer::new(&rgb, 3, 2, PixelLayout::Rgb).unwrap(),
                PixelBufferMut::new(&mut bgra, 3, 2, PixelLayout::Bgra).unwrap(),
                Transform::NONE,
            )
            .unwrap();
        assert_eq!(&bgra[..4], &[rgb[2], rgb[1], rgb[0], 255]);

        let mut back = vec![0u8; 6 * 3];
        engine
            .convert(
                PixelBuffer::new(&bgra, 3, 2, PixelLayout::Bgra).unwrap(),
                PixelBufferMut::new(&mut back, 3, 2, PixelLayout::Rgb).unwrap(),
                Transform::NONE,
            )
            .unwrap();
        assert_eq!(back, rgb);
    }

    #[test]
    fn convert_resamples_on_size_change() {
        let engine = Engine::new();
        let src = pixels(4, 4);
        let mut dst = vec![0u8; 4 * 4 * 4];
        engine
            .convert(
                PixelBuffer::new(&src, 2, 2, PixelLayout::Rgba).unwrap(),
                PixelBufferMut::new(&mut dst, 4, 4, PixelLayout::Rgba).unwrap(),
                Transform::NONE,
            )
            .unwrap();
        assert_eq!(&dst[..8], &[src[0], src[1], src[2], src[3], src[0], src[1], src[2], src[3]]);
    }

    #[test]
    fn convert_copies_same_layout_with_pitch() {
        let engine = Engine::new();
        let src = [1, 2, 3, 0, 0, 4, 5, 6];
        let mut dst = [0u8; 6];
        engine
            .convert(
                PixelBuffer::with_pitch(&src, 1, 2, 5, PixelLayout::Rgb).unwrap(),
                PixelBufferMut::new(&mut dst, 1, 2, PixelLayout::Rgb).unwrap(),
                Transform::NONE.inverted(),
            )
            .unwrap();
        assert_eq!(dst, [4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn convert_mirrors_four_channel_copies() {
        let engine = Engine::new();
        let src = [1, 1, 1, 1, 2, 2, 2, 2];
        let mut dst = [0u8; 8];
        engine
            .convert(
                PixelBuffer::new(&src, 2, 1, PixelLayout::Bgra).unwrap(),
                PixelBufferMut::new(&mut dst, 2, 1, PixelLayout::Bgra).unwrap(),
                Transform::NONE.mirrored(),
            )
            .unwrap();
        assert_eq!(dst, [2, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn convert_rejects_unsupported_pairs() {
        let engine = Engine::new();
        let src = [0u8; 6];
        let mut dst = [0u8; 6];
        assert_eq!(
            engine.convert(
                PixelBuffer::new(&src, 2, 1, PixelLayout::Rgb).unwrap(),
                PixelBufferMut::new(&mut dst, 2, 1, PixelLayout::Bgr).unwrap(),
                Transform::NONE,
            ),
            Err(CopyError::Unsupported {
                from: PixelLayout::Rgb,
                to: PixelLayout::Bgr
            })
        );
        assert_eq!(
            engine.convert(
                PixelBuffer::new(&src, 2, 1, PixelLayout::Rgb).unwrap(),
                PixelBufferMut::new(&mut dst, 2, 1, PixelLayout::Rgb).unwrap(),
                Transform::NONE.mirrored(),
            ),
            Err(CopyError::TransformUnsupported {
                from: PixelLayout::Rgb,
                to: PixelLayout::Rgb
            })
        );
        let mut rgba = [0u8; 8];
        assert_eq!(
            engine.convert(
                PixelBuffer::new(&src, 2, 1, PixelLayout::Rgb).unwrap(),
                PixelBufferMut::new(&mut rgba, 2, 1, PixelLayout::Rgba).unwrap(),
                Transform::NONE.mirrored(),
            ),
            Err(CopyError::TransformUnsupported {
                from: PixelLayout::Rgb,
                to: PixelLayout::Rgba
            })
        );
    }
}

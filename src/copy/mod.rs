//! Bulk byte copies.
//!
//! A copy takes one of three paths. All of them write the same bytes; they
//! differ only in how the memory system sees the writes.

#[cfg(target_arch = "x86_64")]
mod stream;

use crate::{Capabilities, CapabilityFlags, CopyError, Engine};

/// Rows narrower than this many pixels are copied plainly by the row engine.
pub const SMALL_COPY_WIDTH: usize = 320;

/// Images shorter than this many rows are flipped with plain row copies.
pub const SMALL_COPY_HEIGHT: usize = 240;

/// Byte ranges shorter than this are copied plainly by [`Engine::copy_bytes`].
pub const SMALL_COPY_BYTES: usize = 320;

/// How a byte range gets copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyPath {
    /// `copy_from_slice`.
    Plain,
    /// 128 bytes per step with non-temporal stores. Bypasses the cache for
    /// destinations that will not be read back soon.
    Stream,
    /// Four bytes per step.
    Word,
}

impl CopyPath {
    /// Pick a path for a range whose size (or combined sizes) is `granule`.
    ///
    /// `small` forces a plain copy. Otherwise a multiple of 16 with SSE2
    /// streams, a multiple of 4 goes word by word, and anything else is plain.
    pub fn select(flags: CapabilityFlags, granule: usize, small: bool) -> Self {
        if small {
            Self::Plain
        } else if flags.sse2 && granule.is_multiple_of(16) {
            Self::Stream
        } else if granule.is_multiple_of(4) {
            Self::Word
        } else {
            Self::Plain
        }
    }
}

/// Copy `src` into `dst` along `path`. Both slices have the same length.
pub(crate) fn copy_with(caps: &Capabilities, path: CopyPath, dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    match path {
        CopyPath::Plain => dst.copy_from_slice(src),
        CopyPath::Word => copy_words(dst, src),
        CopyPath::Stream => copy_stream(caps, dst, src),
    }
}

#[cfg(target_arch = "x86_64")]
fn copy_stream(caps: &Capabilities, dst: &mut [u8], src: &[u8]) {
    match caps.sse2_token() {
        Some(token) => stream::stream_copy(token, dst, src),
        None => copy_words(dst, src),
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn copy_stream(_caps: &Capabilities, dst: &mut [u8], src: &[u8]) {
    copy_words(dst, src);
}

fn copy_words(dst: &mut [u8], src: &[u8]) {
    let mut d = dst.chunks_exact_mut(4);
    let mut s = src.chunks_exact(4);
    for (d, s) in (&mut d).zip(&mut s) {
        let w = u32::from_ne_bytes(s.try_into().unwrap());
        d.copy_from_slice(&w.to_ne_bytes());
    }
    d.into_remainder().copy_from_slice(s.remainder());
}

impl Engine {
    /// Copy all of `src` to the front of `dst`.
    ///
    /// Ranges under [`SMALL_COPY_BYTES`] are copied plainly; larger ones pick
    /// a [`CopyPath`] from their length and the probed flags.
    pub fn copy_bytes(&self, dst: &mut [u8], src: &[u8]) -> Result<(), CopyError> {
        if src.is_empty() || dst.is_empty() {
            return Ok(());
        }
        if dst.len() < src.len() {
            return Err(CopyError::BufferTooSmall {
                needed: src.len(),
                actual: dst.len(),
            });
        }
        let path = CopyPath::select(self.flags(), src.len(), src.len() < SMALL_COPY_BYTES);
        copy_with(self.capabilities(), path, &mut dst[..src.len()], src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn path_selection() {
        let all = CapabilityFlags::ALL;
        let none = CapabilityFlags::NONE;
        assert_eq!(CopyPath::select(all, 1024, true), CopyPath::Plain);
        assert_eq!(CopyPath::select(all, 1024, false), CopyPath::Stream);
        assert_eq!(CopyPath::select(none, 1024, false), CopyPath::Word);
        assert_eq!(CopyPath::select(all, 1028, false), CopyPath::Word);
        assert_eq!(CopyPath::select(all, 1027, false), CopyPath::Plain);
    }

    #[test]
    fn every_path_matches_plain_copy() {
        let caps = Capabilities::probe();
        for len in [0, 1, 3, 4, 15, 16, 17, 127, 128, 129, 255, 256, 320, 1000, 4096, 4099] {
            let src = pattern(len);
            for path in [CopyPath::Plain, CopyPath::Word, CopyPath::Stream] {
                let mut dst = alloc::vec![0u8; len];
                copy_with(&caps, path, &mut dst, &src);
                assert_eq!(dst, src, "path {path:?}, len {len}");
            }
        }
    }

    #[test]
    fn stream_handles_unaligned_destination() {
        let caps = Capabilities::probe();
        let src = pattern(2048 + 48);
        let mut backing = alloc::vec![0u8; src.len() + 16];
        for offset in 0..16 {
            backing.fill(0);
            copy_with(&caps, CopyPath::Stream, &mut backing[offset..offset + src.len()], &src);
            assert_eq!(&backing[offset..offset + src.len()], &src[..], "offset {offset}");
            assert!(backing[..offset].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn copy_bytes_rejects_short_destination() {
        let engine = Engine::new();
        let mut dst = [0u8; 4];
        assert_eq!(
            engine.copy_bytes(&mut dst, &[1, 2, 3, 4, 5]),
            Err(CopyError::BufferTooSmall {
                needed: 5,
                actual: 4
            })
        );
        assert_eq!(dst, [0; 4]);
    }

    #[test]
    fn copy_bytes_empty_is_noop() {
        let engine = Engine::new();
        let mut dst = [9u8; 4];
        engine.copy_bytes(&mut dst, &[]).unwrap();
        engine.copy_bytes(&mut [], &[1, 2]).unwrap();
        assert_eq!(dst, [9; 4]);
    }

    #[test]
    fn copy_bytes_leaves_destination_tail() {
        let engine = Engine::with_capabilities(Capabilities::scalar());
        let src = pattern(400);
        let mut dst = alloc::vec![0xAAu8; 500];
        engine.copy_bytes(&mut dst, &src).unwrap();
        assert_eq!(&dst[..400], &src[..]);
        assert!(dst[400..].iter().all(|&b| b == 0xAA));
    }
}

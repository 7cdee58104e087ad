//! # framecopy
//!
//! Copy video frames between the pixel layouts capture and texture pipelines
//! hand around: flip them, strip row padding, swap RGBA for BGRA, grow RGB to
//! RGBA or shrink it back, and scale with nearest-neighbor sampling.
//!
//! Every operation is a method on [`Engine`], which probes the CPU once when
//! it is built and picks between plain, word, streaming-SSE2, SSE2 and SSSE3
//! paths from that record. The choice never changes the bytes written.
//!
//! ```rust
//! use framecopy::{Engine, PixelLayout};
//!
//! let engine = Engine::new();
//! let rgba = [10u8, 20, 30, 40];
//! let mut bgra = [0u8; 4];
//! engine.rgba_to_bgra(&rgba, &mut bgra, 1, 1, false).unwrap();
//! assert_eq!(bgra, [30, 20, 10, 40]);
//!
//! let mut flipped = [0u8; 8];
//! engine.flip_buffer(&[1, 2, 3, 4, 5, 6, 7, 8], &mut flipped, 1, 2, PixelLayout::Rgba).unwrap();
//! assert_eq!(flipped, [5, 6, 7, 8, 1, 2, 3, 4]);
//! ```
//!
//! Buffers are caller-owned byte slices. Empty slices and zero dimensions are
//! a no-op; geometry that does not fit the slices is reported as a
//! [`CopyError`] before any byte is written.
//!
//! ## Feature flags
//!
//! - **`std`** (default): runtime CPU detection through archmage.
//! - **`rgb`**: [`typed`] helpers for [`rgb`] crate pixel slices.
//! - **`imgref`**: [`img`] conversions between [`imgref`] images. Implies `rgb`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod caps;
mod convert;
mod copy;
mod engine;
mod error;
mod frame;
mod layout;
mod resample;
mod rows;
mod swizzle;

pub use caps::{Capabilities, CapabilityFlags};
pub use copy::{CopyPath, SMALL_COPY_BYTES, SMALL_COPY_HEIGHT, SMALL_COPY_WIDTH};
pub use engine::Engine;
pub use error::CopyError;
pub use frame::{PixelBuffer, PixelBufferMut, Transform};
pub use layout::PixelLayout;
pub use resample::Extent;
pub use swizzle::SwapKernel;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod img;

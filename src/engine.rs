use crate::{Capabilities, CapabilityFlags};

/// Entry point for every copy and conversion.
///
/// Holds the capability record the kernels are chosen from. It is `Copy`
/// and can be shared freely across threads; each call is independent.
///
/// The operations are grouped by concern:
/// - raw copies: [`copy_bytes`](Self::copy_bytes)
/// - row handling: [`flip_buffer`](Self::flip_buffer),
///   [`remove_padding`](Self::remove_padding), [`copy_pixels`](Self::copy_pixels),
///   [`rgba_to_rgba`](Self::rgba_to_rgba)
/// - red/blue swaps: [`rgba_to_bgra`](Self::rgba_to_bgra) and friends
/// - 3⇄4 channel conversions: [`rgb_to_rgba`](Self::rgb_to_rgba),
///   [`rgba_to_rgb`](Self::rgba_to_rgb) and friends
/// - scaling: [`rgba_to_rgba_resample`](Self::rgba_to_rgba_resample) and friends
/// - layout routing: [`convert`](Self::convert)
#[derive(Clone, Copy, Debug)]
pub struct Engine {
    caps: Capabilities,
}

impl Engine {
    /// Build an engine for the current CPU.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::probe())
    }

    pub const fn with_capabilities(caps: Capabilities) -> Self {
        Self { caps }
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    #[inline]
    pub fn flags(&self) -> CapabilityFlags {
        self.caps.flags()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

use core::time::Duration;

/// Pixel encodings understood by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PixelFormat {
    /// Packed 32-bit `0xAARRGGBB` pixels, stored as `A, R, G, B` bytes.
    Argb32,
    /// Planar YUV 4:2:0: a Y plane followed by separate U and V planes.
    I420,
    /// Semi-planar YUV 4:2:0: a Y plane followed by one interleaved `V, U` plane.
    Nv21,
}

impl PixelFormat {
    /// Exact byte length of a tightly packed frame of this format.
    pub fn frame_len(self, size: Size) -> usize {
        match self {
            Self::Argb32 => size.pixel_count() * 4,
            Self::I420 | Self::Nv21 => size.pixel_count() + 2 * size.chroma().pixel_count(),
        }
    }

    /// Number of planes a frame of this format is split into.
    pub fn plane_count(self) -> usize {
        match self {
            Self::Argb32 => 1,
            Self::I420 => 3,
            Self::Nv21 => 2,
        }
    }
}

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// True if either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Dimensions of a 4:2:0 chroma plane for this luma size.
    ///
    /// Odd dimensions round up, so a trailing odd row or column still owns a
    /// chroma sample.
    pub const fn chroma(&self) -> Size {
        Size {
            width: self.width.div_ceil(2),
            height: self.height.div_ceil(2),
        }
    }
}

/// A rational number (numerator / denominator).
///
/// Used to represent frame rates (e.g. 24000/1000 = 24 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    pub numerator: u32,
    pub denominator: u32,
}

pub type FrameRate = Ratio;

impl Ratio {
    pub const fn from_integer(value: u32) -> Self {
        Ratio {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Time between two frames at this rate. `None` for a zero rate.
    pub fn frame_interval(&self) -> Option<Duration> {
        if self.numerator == 0 {
            return None;
        }
        let nanos = self.denominator as u64 * 1_000_000_000 / self.numerator as u64;
        Some(Duration::from_nanos(nanos))
    }
}

/// Format, size and rate a frame producer emits or a frame consumer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamConfig {
    pub pixel_format: PixelFormat,
    pub size: Size,
    pub frame_rate: FrameRate,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            pixel_format: PixelFormat::I420,
            size: Size::new(640, 480),
            frame_rate: Ratio::from_integer(24),
        }
    }
}

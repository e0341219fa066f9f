use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::error::Error;
use crate::types::{PixelFormat, Size};

/// Maximum number of planes any supported format splits into.
pub const MAX_PLANES: usize = 3;

/// Presentation timestamp in nanoseconds on a monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }
}

/// A single plane of image data.
///
/// `bytes_per_row` may exceed `size.width * bytes_per_pixel` when rows are
/// padded. `bytes_per_pixel` is the distance between two horizontally adjacent
/// samples, so an interleaved chroma plane has a pixel stride of 2.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    pub bytes_per_row: usize,
    pub bytes_per_pixel: usize,
    pub size: Size,
}

impl<'a> Plane<'a> {
    /// Smallest buffer length that can hold every sample of this plane.
    ///
    /// The last row does not need to carry its padding.
    pub fn required_len(&self) -> usize {
        if self.size.is_empty() {
            return 0;
        }
        (self.size.height as usize - 1) * self.bytes_per_row
            + (self.size.width as usize - 1) * self.bytes_per_pixel
            + 1
    }

    /// Sample at column `x` of row `y`, if it lies inside the buffer.
    pub fn sample(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data
            .get(y as usize * self.bytes_per_row + x as usize * self.bytes_per_pixel)
            .copied()
    }
}

/// An owned, immutable video frame.
///
/// The data length always matches [`PixelFormat::frame_len`] for the frame's
/// format and size; this is checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixel_format: PixelFormat,
    size: Size,
    timestamp: Timestamp,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(
        pixel_format: PixelFormat,
        size: Size,
        timestamp: Timestamp,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        if size.is_empty() {
            return Err(Error::InvalidDimensions(size));
        }
        let expected = pixel_format.frame_len(size);
        if data.len() != expected {
            return Err(Error::InvalidFrameSize {
                format: pixel_format,
                size,
                expected,
                actual: data.len(),
            });
        }
        Ok(Frame {
            pixel_format,
            size,
            timestamp,
            data,
        })
    }

    /// Build an [`PixelFormat::Argb32`] frame from packed `0xAARRGGBB` values,
    /// the layout bitmap pixel getters hand out.
    pub fn from_argb_pixels(
        size: Size,
        pixels: &[u32],
        timestamp: Timestamp,
    ) -> Result<Self, Error> {
        if pixels.len() != size.pixel_count() {
            return Err(Error::InvalidFrameSize {
                format: PixelFormat::Argb32,
                size,
                expected: PixelFormat::Argb32.frame_len(size),
                actual: pixels.len() * 4,
            });
        }
        let data = pixels.iter().flat_map(|p| p.to_be_bytes()).collect();
        Frame::new(PixelFormat::Argb32, size, timestamp, data)
    }

    /// Callers guarantee `data.len() == pixel_format.frame_len(size)`.
    pub(crate) fn from_parts(
        pixel_format: PixelFormat,
        size: Size,
        timestamp: Timestamp,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), pixel_format.frame_len(size));
        Frame {
            pixel_format,
            size,
            timestamp,
            data,
        }
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the frame and returns its buffer, e.g. to hand it to an encoder.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Plane descriptors over this frame's buffer.
    ///
    /// `Argb32` yields one packed plane, `I420` yields Y, U and V, and `Nv21`
    /// yields Y and the interleaved VU plane (whose samples are the V values;
    /// the U values sit one byte later).
    pub fn planes(&self) -> ArrayVec<Plane<'_>, MAX_PLANES> {
        let size = self.size;
        let chroma = size.chroma();
        let luma_len = size.pixel_count();
        let chroma_len = chroma.pixel_count();
        let mut planes = ArrayVec::new();

        match self.pixel_format {
            PixelFormat::Argb32 => planes.push(Plane {
                data: &self.data,
                bytes_per_row: size.width as usize * 4,
                bytes_per_pixel: 4,
                size,
            }),
            PixelFormat::I420 => {
                let (y, uv) = self.data.split_at(luma_len);
                let (u, v) = uv.split_at(chroma_len);
                planes.push(luma_plane(y, size));
                planes.push(luma_plane(u, chroma));
                planes.push(luma_plane(v, chroma));
            }
            PixelFormat::Nv21 => {
                let (y, vu) = self.data.split_at(luma_len);
                planes.push(luma_plane(y, size));
                planes.push(Plane {
                    data: vu,
                    bytes_per_row: chroma.width as usize * 2,
                    bytes_per_pixel: 2,
                    size: chroma,
                });
            }
        }
        planes
    }
}

fn luma_plane(data: &[u8], size: Size) -> Plane<'_> {
    Plane {
        data,
        bytes_per_row: size.width as usize,
        bytes_per_pixel: 1,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_rejects_wrong_length() {
        let err = Frame::new(
            PixelFormat::I420,
            Size::new(640, 480),
            Timestamp(0),
            vec![0; 640 * 480],
        )
        .unwrap_err();
        match err {
            Error::InvalidFrameSize {
                expected, actual, ..
            } => {
                assert_eq!(expected, 640 * 480 + 2 * 320 * 240);
                assert_eq!(actual, 640 * 480);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn new_rejects_empty_size() {
        let err =
            Frame::new(PixelFormat::Argb32, Size::new(0, 4), Timestamp(0), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(_)));
    }

    #[test]
    fn argb_pixels_are_stored_big_endian() {
        let frame =
            Frame::from_argb_pixels(Size::new(2, 1), &[0xFF10_2030, 0x8040_5060], Timestamp(7))
                .unwrap();
        assert_eq!(frame.data(), &[0xFF, 0x10, 0x20, 0x30, 0x80, 0x40, 0x50, 0x60]);
        assert_eq!(frame.timestamp(), Timestamp(7));
    }

    #[test]
    fn argb_pixels_count_must_match() {
        let err = Frame::from_argb_pixels(Size::new(2, 2), &[0; 3], Timestamp(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFrameSize {
                expected: 16,
                actual: 12,
                ..
            }
        ));
    }

    #[test]
    fn i420_planes_odd_size() {
        let size = Size::new(3, 3);
        let data: Vec<u8> = (0..17).collect();
        let frame = Frame::new(PixelFormat::I420, size, Timestamp(0), data).unwrap();
        let planes = frame.planes();

        assert_eq!(planes.len(), PixelFormat::I420.plane_count());
        assert_eq!(planes[0].data.len(), 9);
        assert_eq!(planes[1].size, Size::new(2, 2));
        assert_eq!(planes[1].data, &[9, 10, 11, 12]);
        assert_eq!(planes[2].data, &[13, 14, 15, 16]);
        assert_eq!(planes[2].sample(1, 1), Some(16));
    }

    #[test]
    fn nv21_chroma_plane_is_interleaved() {
        let size = Size::new(2, 2);
        let frame = Frame::new(
            PixelFormat::Nv21,
            size,
            Timestamp(0),
            vec![1, 2, 3, 4, 200, 100],
        )
        .unwrap();
        let planes = frame.planes();

        assert_eq!(planes.len(), PixelFormat::Nv21.plane_count());
        assert_eq!(planes[1].bytes_per_pixel, 2);
        assert_eq!(planes[1].sample(0, 0), Some(200));
        assert_eq!(planes[1].required_len(), 1);
    }

    #[test]
    fn plane_required_len_ignores_last_row_padding() {
        let plane = Plane {
            data: &[],
            bytes_per_row: 8,
            bytes_per_pixel: 2,
            size: Size::new(3, 2),
        };
        assert_eq!(plane.required_len(), 8 + 4 + 1);
        assert_eq!(plane.sample(0, 0), None);
    }

    #[test]
    fn timestamp_seconds() {
        assert_eq!(Timestamp(1_500_000_000).as_secs_f64(), 1.5);
    }
}

//! Ingestion of YUV 4:2:0 images as capture APIs deliver them.
//!
//! Camera stacks hand out "flexible" 4:2:0 images: three planes, each with its
//! own row stride and pixel stride. A pixel stride of 1 is fully planar; a
//! pixel stride of 2 means U and V are views into one interleaved buffer
//! (NV12 or NV21 memory). [`pack_yuv_420_888`] copies any such layout into a
//! tight [`PixelFormat::I420`] frame the converter can work with.

use alloc::vec::Vec;

use tracing::trace;

use crate::error::Error;
use crate::frame::{Frame, Plane, Timestamp};
use crate::types::PixelFormat;

/// Copy strided Y, U and V planes into a tightly packed I420 frame.
///
/// The frame size is taken from the Y plane; U and V must cover the matching
/// rounded-up chroma grid.
pub fn pack_yuv_420_888(
    y: &Plane<'_>,
    u: &Plane<'_>,
    v: &Plane<'_>,
    timestamp: Timestamp,
) -> Result<Frame, Error> {
    let size = y.size;
    if size.is_empty() {
        return Err(Error::InvalidDimensions(size));
    }

    let chroma = size.chroma();
    for (index, plane) in [y, u, v].into_iter().enumerate() {
        if index > 0 && plane.size != chroma {
            return Err(Error::InvalidPlane {
                index,
                reason: "chroma plane does not match the luma size",
            });
        }
        check_strides(index, plane)?;
    }

    trace!(
        width = size.width,
        height = size.height,
        y_stride = y.bytes_per_row,
        uv_stride = u.bytes_per_row,
        uv_pixel_stride = u.bytes_per_pixel,
        "packing yuv 420 planes"
    );

    let mut data = Vec::with_capacity(PixelFormat::I420.frame_len(size));
    for plane in [y, u, v] {
        copy_plane(plane, &mut data);
    }
    Frame::new(PixelFormat::I420, size, timestamp, data)
}

fn check_strides(index: usize, plane: &Plane<'_>) -> Result<(), Error> {
    if plane.bytes_per_pixel == 0 {
        return Err(Error::InvalidPlane {
            index,
            reason: "pixel stride is zero",
        });
    }
    let row_span = (plane.size.width as usize - 1) * plane.bytes_per_pixel + 1;
    if plane.size.height > 1 && plane.bytes_per_row < row_span {
        return Err(Error::InvalidPlane {
            index,
            reason: "row stride is shorter than a row",
        });
    }
    if plane.data.len() < plane.required_len() {
        return Err(Error::InvalidPlane {
            index,
            reason: "buffer is shorter than its strides require",
        });
    }
    Ok(())
}

fn copy_plane(plane: &Plane<'_>, out: &mut Vec<u8>) {
    let width = plane.size.width as usize;
    for row in 0..plane.size.height as usize {
        let start = row * plane.bytes_per_row;
        if plane.bytes_per_pixel == 1 {
            out.extend_from_slice(&plane.data[start..start + width]);
        } else {
            out.extend(
                plane.data[start..]
                    .iter()
                    .step_by(plane.bytes_per_pixel)
                    .take(width),
            );
        }
    }
}

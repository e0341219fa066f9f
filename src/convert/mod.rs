//! Pixel-format conversion between frames.
//!
//! Every function here is pure: it borrows the input frame, allocates a new
//! output frame and keeps no state between calls, so frames can be converted
//! concurrently from any number of threads.
//!
//! Supported conversions:
//!
//! | from     | to     | algorithm                                    |
//! |----------|--------|----------------------------------------------|
//! | `Argb32` | `I420` | BT.601 studio swing, 2x2 point-sampled chroma |
//! | `I420`   | `Nv21` | Y copy, chroma interleaved as `V, U`          |
//!
//! Any other pair, including a format to itself, is rejected. Use [`resize`]
//! to rescale a frame without changing its format.

pub mod bt601;
mod nv21;
mod resize;

use alloc::borrow::Cow;

use tracing::trace;

use crate::error::Error;
use crate::frame::Frame;
use crate::types::{PixelFormat, Size};

/// Whether [`convert`] can turn `from` into `to`.
pub fn is_supported(from: PixelFormat, to: PixelFormat) -> bool {
    matches!(
        (from, to),
        (PixelFormat::Argb32, PixelFormat::I420) | (PixelFormat::I420, PixelFormat::Nv21)
    )
}

/// Convert `frame` to `target`, optionally resizing it to `target_size` first.
///
/// The resize runs in the source format (bilinear, edge clamped) before the
/// format conversion. The output keeps the input's timestamp.
///
/// # Errors
///
/// * [`Error::UnsupportedConversion`] if the pair is not in the table above.
/// * [`Error::InvalidDimensions`] if `target_size` has a zero dimension.
pub fn convert(
    frame: &Frame,
    target: PixelFormat,
    target_size: Option<Size>,
) -> Result<Frame, Error> {
    let from = frame.pixel_format();
    if !is_supported(from, target) {
        return Err(Error::UnsupportedConversion { from, to: target });
    }

    let source = match target_size {
        Some(size) if size.is_empty() => return Err(Error::InvalidDimensions(size)),
        Some(size) if size != frame.size() => Cow::Owned(resize(frame, size)?),
        _ => Cow::Borrowed(frame),
    };

    let size = source.size();
    trace!(
        ?from,
        to = ?target,
        src_width = frame.size().width,
        src_height = frame.size().height,
        width = size.width,
        height = size.height,
        "converting frame"
    );

    let data = match (from, target) {
        (PixelFormat::Argb32, PixelFormat::I420) => bt601::argb_to_i420(source.data(), size),
        (PixelFormat::I420, PixelFormat::Nv21) => nv21::i420_to_nv21(source.data(), size),
        _ => return Err(Error::UnsupportedConversion { from, to: target }),
    };

    Ok(Frame::from_parts(target, size, frame.timestamp(), data))
}

/// Resample `frame` to `size` without changing its format.
pub fn resize(frame: &Frame, size: Size) -> Result<Frame, Error> {
    if size.is_empty() {
        return Err(Error::InvalidDimensions(size));
    }
    let format = frame.pixel_format();
    let data = resize::resize_frame(format, frame.data(), frame.size(), size);
    Ok(Frame::from_parts(format, size, frame.timestamp(), data))
}

/// Split an NV21 frame back into planar I420.
///
/// This is the exact inverse of the `I420 -> Nv21` conversion. It is kept out
/// of [`convert`]'s table because sinks never ask for it; it serves hosts that
/// receive NV21 from a platform camera and need separate planes.
pub fn nv21_to_i420(frame: &Frame) -> Result<Frame, Error> {
    if frame.pixel_format() != PixelFormat::Nv21 {
        return Err(Error::UnsupportedConversion {
            from: frame.pixel_format(),
            to: PixelFormat::I420,
        });
    }
    let size = frame.size();
    let data = nv21::nv21_to_i420(frame.data(), size);
    Ok(Frame::from_parts(PixelFormat::I420, size, frame.timestamp(), data))
}

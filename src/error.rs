use alloc::boxed::Box;
use core::fmt;

use crate::types::{PixelFormat, Size};

/// Error returned by a [`FrameSink`](crate::sink::FrameSink) that refused a frame.
pub type SinkError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Top-level crate error.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested (source, target) encoding pair has no conversion.
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },
    /// Frame data length does not match its declared format and size.
    InvalidFrameSize {
        format: PixelFormat,
        size: Size,
        expected: usize,
        actual: usize,
    },
    /// A width or height of zero.
    InvalidDimensions(Size),
    /// A capture plane is too short for the strides it declares.
    InvalidPlane { index: usize, reason: &'static str },
    AlreadyStarted,
    NotStarted,
    Sink(SinkError),
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedConversion { from, to } => {
                write!(f, "unsupported conversion from {from:?} to {to:?}")
            }
            Self::InvalidFrameSize {
                format,
                size,
                expected,
                actual,
            } => write!(
                f,
                "invalid {format:?} frame size for {}x{}: expected {expected} bytes, got {actual}",
                size.width, size.height
            ),
            Self::InvalidDimensions(size) => {
                write!(f, "invalid dimensions {}x{}", size.width, size.height)
            }
            Self::InvalidPlane { index, reason } => write!(f, "invalid plane {index}: {reason}"),
            Self::AlreadyStarted => f.write_str("stream already started"),
            Self::NotStarted => f.write_str("stream not started"),
            Self::Sink(e) => write!(f, "sink error: {e}"),
            #[cfg(feature = "std")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Sink(e) => Some(e.as_ref()),
            #[cfg(feature = "std")]
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod capture;
pub mod convert;
pub mod error;
pub mod frame;
pub mod types;

#[cfg(feature = "std")]
pub mod sink;
#[cfg(feature = "std")]
pub mod source;

// Re-exports
pub use capture::pack_yuv_420_888;
pub use convert::{convert, is_supported, nv21_to_i420, resize};
pub use error::*;
pub use frame::*;
pub use types::*;

#[cfg(feature = "std")]
pub use sink::*;
#[cfg(feature = "std")]
pub use source::*;

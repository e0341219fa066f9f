//! RGB to studio-swing YUV using the BT.601 integer coefficients.
//!
//! The rounding (add 128, arithmetic shift right by 8, add the offset, clamp)
//! is part of the output contract: encoders downstream expect these exact
//! values, so it must not be replaced by a floating point formula.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{PixelFormat, Size};

#[inline]
fn clamp0_255(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    clamp0_255(((66 * r + 129 * g + 25 * b + 128) >> 8) + 16)
}

#[inline]
pub fn chroma_u(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    clamp0_255(((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128)
}

#[inline]
pub fn chroma_v(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    clamp0_255(((112 * r - 94 * g - 18 * b + 128) >> 8) + 128)
}

/// Packed `A, R, G, B` bytes to I420.
///
/// Chroma is point-sampled from the top-left pixel of each 2x2 block, so for
/// odd sizes the last column/row takes its chroma from the even coordinate
/// that opens its block.
pub(crate) fn argb_to_i420(argb: &[u8], size: Size) -> Vec<u8> {
    let width = size.width as usize;
    let chroma = size.chroma();
    let chroma_width = chroma.width as usize;

    let mut out = vec![0u8; PixelFormat::I420.frame_len(size)];
    let (y_plane, uv_planes) = out.split_at_mut(size.pixel_count());
    let (u_plane, v_plane) = uv_planes.split_at_mut(chroma.pixel_count());

    for (row, (pixels, y_row)) in argb
        .chunks_exact(width * 4)
        .zip(y_plane.chunks_exact_mut(width))
        .enumerate()
    {
        for (col, (px, y)) in pixels.chunks_exact(4).zip(y_row.iter_mut()).enumerate() {
            let (r, g, b) = (px[1], px[2], px[3]);
            *y = luma(r, g, b);

            if row % 2 == 0 && col % 2 == 0 {
                let idx = (row / 2) * chroma_width + col / 2;
                u_plane[idx] = chroma_u(r, g, b);
                v_plane[idx] = chroma_v(r, g, b);
            }
        }
    }

    out
}

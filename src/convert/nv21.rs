//! Byte shuffles between planar I420 and semi-planar NV21.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::Size;

/// Interleave U and V into one `V, U, V, U...` plane after an untouched Y plane.
pub(crate) fn i420_to_nv21(i420: &[u8], size: Size) -> Vec<u8> {
    let luma_len = size.pixel_count();
    let chroma_len = size.chroma().pixel_count();

    let (y, uv) = i420.split_at(luma_len);
    let (u, v) = uv.split_at(chroma_len);

    let mut out = Vec::with_capacity(luma_len + 2 * chroma_len);
    out.extend_from_slice(y);
    for (&v, &u) in v.iter().zip(u) {
        out.push(v);
        out.push(u);
    }
    out
}

/// Inverse of [`i420_to_nv21`].
pub(crate) fn nv21_to_i420(nv21: &[u8], size: Size) -> Vec<u8> {
    let luma_len = size.pixel_count();
    let chroma_len = size.chroma().pixel_count();

    let mut out = vec![0u8; luma_len + 2 * chroma_len];
    let (y, uv) = out.split_at_mut(luma_len);
    let (u, v) = uv.split_at_mut(chroma_len);

    y.copy_from_slice(&nv21[..luma_len]);
    for ((vu, u), v) in nv21[luma_len..].chunks_exact(2).zip(u).zip(v) {
        *v = vu[0];
        *u = vu[1];
    }
    out
}

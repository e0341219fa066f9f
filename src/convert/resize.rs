//! Bilinear resampling with edge clamping, in 16.16 fixed point.
//!
//! Sample centers are aligned (`src = (dst + 0.5) * scale - 0.5`) and clamped
//! to the first and last source sample, so scaling to the same size is an
//! exact copy and a uniform plane stays uniform.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{PixelFormat, Size};

const FRAC_BITS: u32 = 16;
const ONE: u64 = 1 << FRAC_BITS;
const HALF_ROUND: u64 = 1 << (2 * FRAC_BITS - 1);

/// The two source indices a destination index reads and the weight of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    near: usize,
    far: usize,
    frac: u64,
}

fn taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    (0..dst_len).map(|d| tap(d, src_len, dst_len)).collect()
}

/// Tap for destination index `d`.
///
/// The position is computed in `i128`: `(2d + 1) * src` needs up to 65 bits
/// before the fractional shift.
fn tap(d: u32, src_len: u32, dst_len: u32) -> Tap {
    let src = i128::from(src_len);
    let dst = i128::from(dst_len);
    let last = (src - 1) << FRAC_BITS;

    let pos = (((2 * i128::from(d) + 1) * src) << FRAC_BITS) / (2 * dst) - i128::from(ONE / 2);
    let pos = pos.clamp(0, last) as u64;
    let near = (pos >> FRAC_BITS) as usize;
    Tap {
        near,
        far: (near + 1).min(src_len as usize - 1),
        frac: pos & (ONE - 1),
    }
}

/// Resample one tightly packed plane of `channels` interleaved samples per pixel.
pub(crate) fn resize_plane(
    src: &[u8],
    src_size: Size,
    channels: usize,
    dst_size: Size,
    dst: &mut [u8],
) {
    let src_stride = src_size.width as usize * channels;
    let dst_stride = dst_size.width as usize * channels;
    let xs = taps(src_size.width, dst_size.width);
    let ys = taps(src_size.height, dst_size.height);

    for (ty, out_row) in ys.iter().zip(dst.chunks_exact_mut(dst_stride)) {
        let top = &src[ty.near * src_stride..][..src_stride];
        let bottom = &src[ty.far * src_stride..][..src_stride];

        for (tx, out_px) in xs.iter().zip(out_row.chunks_exact_mut(channels)) {
            for (c, out) in out_px.iter_mut().enumerate() {
                let sample = |row: &[u8], x: usize| row[x * channels + c] as u64;
                let upper =
                    sample(top, tx.near) * (ONE - tx.frac) + sample(top, tx.far) * tx.frac;
                let lower =
                    sample(bottom, tx.near) * (ONE - tx.frac) + sample(bottom, tx.far) * tx.frac;
                let value =
                    (upper * (ONE - ty.frac) + lower * ty.frac + HALF_ROUND) >> (2 * FRAC_BITS);
                *out = value as u8;
            }
        }
    }
}

/// Resample every plane of a tightly packed frame buffer.
///
/// Chroma planes of the YUV formats go from `src_size.chroma()` to
/// `dst_size.chroma()`; NV21's interleaved chroma is treated as two channels.
pub(crate) fn resize_frame(
    format: PixelFormat,
    data: &[u8],
    src_size: Size,
    dst_size: Size,
) -> Vec<u8> {
    let mut out = vec![0u8; format.frame_len(dst_size)];

    match format {
        PixelFormat::Argb32 => resize_plane(data, src_size, 4, dst_size, &mut out),
        PixelFormat::I420 | PixelFormat::Nv21 => {
            let (src_y, src_uv) = data.split_at(src_size.pixel_count());
            let (dst_y, dst_uv) = out.split_at_mut(dst_size.pixel_count());
            resize_plane(src_y, src_size, 1, dst_size, dst_y);

            let src_chroma = src_size.chroma();
            let dst_chroma = dst_size.chroma();
            if format == PixelFormat::Nv21 {
                resize_plane(src_uv, src_chroma, 2, dst_chroma, dst_uv);
            } else {
                let (src_u, src_v) = src_uv.split_at(src_chroma.pixel_count());
                let (dst_u, dst_v) = dst_uv.split_at_mut(dst_chroma.pixel_count());
                resize_plane(src_u, src_chroma, 1, dst_chroma, dst_u);
                resize_plane(src_v, src_chroma, 1, dst_chroma, dst_v);
            }
        }
    }

    out
}

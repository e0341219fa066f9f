use frame_convert::{
    Error, Frame, Plane, PixelFormat, Size, Timestamp, convert, nv21_to_i420, pack_yuv_420_888,
    resize,
};

const FORMATS: [PixelFormat; 3] = [PixelFormat::Argb32, PixelFormat::I420, PixelFormat::Nv21];

/// Deterministic, non-uniform bytes so shuffles and copies are observable.
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn noise_frame(format: PixelFormat, size: Size, seed: u32) -> Frame {
    Frame::new(format, size, Timestamp(seed as u64), noise(format.frame_len(size), seed)).unwrap()
}

fn solid_argb(size: Size, pixel: u32) -> Frame {
    Frame::from_argb_pixels(size, &vec![pixel; size.pixel_count()], Timestamp(0)).unwrap()
}

#[test]
fn nv21_round_trip_is_lossless_for_even_sizes() {
    for (i, (w, h)) in [(2, 2), (4, 4), (6, 2), (16, 10), (640, 480)].into_iter().enumerate() {
        let i420 = noise_frame(PixelFormat::I420, Size::new(w, h), i as u32);
        let nv21 = convert(&i420, PixelFormat::Nv21, None).unwrap();
        let back = nv21_to_i420(&nv21).unwrap();

        let luma = (w * h) as usize;
        assert_eq!(&back.data()[..luma], &i420.data()[..luma], "{w}x{h} luma");
        assert_eq!(back, i420, "{w}x{h}");
    }
}

#[test]
fn output_length_matches_target_format() {
    let sizes = [Size::new(1, 1), Size::new(2, 2), Size::new(3, 5), Size::new(7, 4)];
    let targets = [None, Some(Size::new(5, 3)), Some(Size::new(1, 9))];

    for (seed, &size) in sizes.iter().enumerate() {
        for from in FORMATS {
            let frame = noise_frame(from, size, seed as u32);
            for to in FORMATS {
                for target in targets {
                    let Ok(out) = convert(&frame, to, target) else {
                        continue;
                    };
                    let out_size = target.unwrap_or(size);
                    assert_eq!(out.size(), out_size);
                    assert_eq!(out.pixel_format(), to);
                    assert_eq!(out.data().len(), to.frame_len(out_size));
                }
            }
        }
    }
}

#[test]
fn black_and_white_levels() {
    let size = Size::new(6, 4);
    let black = convert(&solid_argb(size, 0xFF00_0000), PixelFormat::I420, None).unwrap();
    let white = convert(&solid_argb(size, 0xFFFF_FFFF), PixelFormat::I420, None).unwrap();

    for (frame, y) in [(black, 16u8), (white, 235u8)] {
        let planes = frame.planes();
        assert!(planes[0].data.iter().all(|&v| v == y));
        assert!(planes[1].data.iter().all(|&u| u == 128));
        assert!(planes[2].data.iter().all(|&v| v == 128));
    }
}

#[test]
fn alpha_does_not_affect_output() {
    let size = Size::new(4, 4);
    let opaque = convert(&solid_argb(size, 0xFF40_8020), PixelFormat::I420, None).unwrap();
    let clear = convert(&solid_argb(size, 0x0040_8020), PixelFormat::I420, None).unwrap();
    assert_eq!(opaque.data(), clear.data());
}

#[test]
fn nv21_interleave_of_4x4() {
    let mut data: Vec<u8> = (0..16).collect();
    data.extend_from_slice(&[100, 101, 102, 103, 200, 201, 202, 203]);
    let i420 = Frame::new(PixelFormat::I420, Size::new(4, 4), Timestamp(0), data).unwrap();

    let nv21 = convert(&i420, PixelFormat::Nv21, None).unwrap();
    assert_eq!(&nv21.data()[..16], &i420.data()[..16]);
    assert_eq!(&nv21.data()[16..], &[200, 100, 201, 101, 202, 102, 203, 103]);
}

#[test]
fn unsupported_pairs() {
    let size = Size::new(2, 2);
    let supported = [
        (PixelFormat::Argb32, PixelFormat::I420),
        (PixelFormat::I420, PixelFormat::Nv21),
    ];
    for from in FORMATS {
        let frame = noise_frame(from, size, 1);
        for to in FORMATS {
            let result = convert(&frame, to, None);
            if supported.contains(&(from, to)) {
                assert!(result.is_ok(), "{from:?} -> {to:?}");
            } else {
                let Err(Error::UnsupportedConversion { from: f, to: t }) = result else {
                    panic!("{from:?} -> {to:?} should be unsupported");
                };
                assert_eq!((f, t), (from, to));
            }
        }
    }
}

#[test]
fn short_640x480_i420_is_rejected() {
    let size = Size::new(640, 480);
    let expected = 640 * 480 + 2 * 320 * 240;
    let err =
        Frame::new(PixelFormat::I420, size, Timestamp(0), vec![0; expected - 1]).unwrap_err();
    match err {
        Error::InvalidFrameSize {
            format: PixelFormat::I420,
            expected: e,
            actual: a,
            ..
        } => {
            assert_eq!(e, expected);
            assert_eq!(a, expected - 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn resize_properties() {
    for format in FORMATS {
        let size = Size::new(9, 7);
        let frame = noise_frame(format, size, 3);
        assert_eq!(resize(&frame, size).unwrap(), frame, "{format:?} identity");
    }

    let gray = Frame::new(PixelFormat::I420, Size::new(8, 8), Timestamp(0), vec![90; 96]).unwrap();
    let scaled = resize(&gray, Size::new(5, 3)).unwrap();
    let planes = scaled.planes();
    assert_eq!(planes[1].size, Size::new(3, 2));
    assert_eq!(planes[2].size, Size::new(3, 2));
    assert!(scaled.data().iter().all(|&v| v == 90));
}

#[test]
fn strided_capture_matches_tight_frame() {
    let size = Size::new(6, 4);
    let tight = noise_frame(PixelFormat::I420, size, 8);
    let planes = tight.planes();

    // Re-lay the frame out as NV12 memory with 10-byte padded rows.
    let stride = 10;
    let mut y = vec![0xAA; stride * 4];
    for row in 0..4 {
        y[row * stride..row * stride + 6].copy_from_slice(&planes[0].data[row * 6..row * 6 + 6]);
    }
    let mut uv = vec![0xAA; stride * 2];
    for row in 0..2 {
        for col in 0..3 {
            uv[row * stride + col * 2] = planes[1].data[row * 3 + col];
            uv[row * stride + col * 2 + 1] = planes[2].data[row * 3 + col];
        }
    }

    let y_plane = Plane {
        data: &y,
        bytes_per_row: stride,
        bytes_per_pixel: 1,
        size,
    };
    let u_plane = Plane {
        data: &uv,
        bytes_per_row: stride,
        bytes_per_pixel: 2,
        size: size.chroma(),
    };
    let v_plane = Plane {
        data: &uv[1..],
        ..u_plane
    };

    let packed = pack_yuv_420_888(&y_plane, &u_plane, &v_plane, tight.timestamp()).unwrap();
    assert_eq!(packed, tight);
}

#[test]
fn conversions_run_concurrently() {
    let frames: Vec<Frame> = (0..8)
        .map(|seed| noise_frame(PixelFormat::Argb32, Size::new(32, 18), seed))
        .collect();
    let expected: Vec<Frame> = frames
        .iter()
        .map(|f| convert(f, PixelFormat::I420, None).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = frames
            .iter()
            .map(|f| scope.spawn(move || convert(f, PixelFormat::I420, None).unwrap()))
            .collect();
        for (handle, want) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), want);
        }
    });
}

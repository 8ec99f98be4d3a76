//! Test corpus: byte-level BMP properties over many sizes and patterns.

use zenconvert::*;

fn checkerboard(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let px = if (x + y) % 2 == 0 {
                RGBA8::new(200, 220, 240, 255)
            } else {
                RGBA8::new(10, 40, 70, 255)
            };
            img.set_pixel(x, y, px);
        }
    }
    img
}

fn noise_pattern(w: u32, h: u32, seed: u32) -> Image {
    let mut img = Image::new(w, h);
    let mut state: u32 = 0xDEAD_BEEF ^ seed;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    for px in img.pixels_mut() {
        let v = next();
        *px = RGBA8::new(v as u8, (v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8);
    }
    img
}

fn rgb_eq(a: &Image, b: &Image) -> bool {
    a.width() == b.width()
        && a.height() == b.height()
        && a
            .pixels()
            .iter()
            .zip(b.pixels())
            .all(|(p, q)| (p.r, p.g, p.b) == (q.r, q.g, q.b))
}

// ── Stride ───────────────────────────────────────────────────────────

#[test]
fn stride_law() {
    for w in (0..=4096u32).chain([65_535, 1 << 20]) {
        let stride = row_stride(w).unwrap();
        let raw = w as usize * 3;
        assert_eq!(stride % 4, 0, "width {w}");
        assert!(stride >= raw, "width {w}");
        assert!(stride < raw + 4, "width {w}");
    }
}

// ── Size and layout ─────────────────────────────────────────────────

#[test]
fn file_size_law() {
    for (w, h) in [(1, 1), (2, 2), (3, 7), (4, 4), (5, 1), (31, 17), (500, 3)] {
        let encoded = encode_bmp(&checkerboard(w, h), Unstoppable).unwrap();
        let expected = 54 + h as usize * row_stride(w).unwrap();
        assert_eq!(encoded.len(), expected, "{w}x{h}");

        let (file, info) = bmp::read_headers(&encoded).unwrap();
        assert_eq!(file.file_size as usize, expected);
        assert_eq!(file.data_offset, 54);
        assert_eq!(info.image_size as usize, expected - 54);
        assert_eq!((info.width, info.height), (w as i32, h as i32));
    }
}

#[test]
fn row_order_is_bottom_up() {
    let (w, h) = (3u32, 4u32);
    let mut img = Image::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.set_pixel(x, y, RGBA8::new(y as u8 * 10, x as u8, 100 + y as u8, 255));
        }
    }
    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    let stride = row_stride(w).unwrap();
    let rows: Vec<&[u8]> = encoded[54..].chunks_exact(stride).collect();
    assert_eq!(rows.len(), h as usize);

    for (i, stored) in rows.iter().enumerate() {
        let y = h - 1 - i as u32;
        for x in 0..w {
            let px = img.pixel(x, y).unwrap();
            let off = x as usize * 3;
            assert_eq!(&stored[off..off + 3], &[px.b, px.g, px.r], "row {i} col {x}");
        }
        assert!(stored[w as usize * 3..].iter().all(|&b| b == 0), "padding row {i}");
    }
}

#[test]
fn two_by_two_scenario() {
    let mut img = Image::new(2, 2);
    img.set_pixel(0, 0, RGBA8::new(255, 0, 0, 255));
    img.set_pixel(1, 0, RGBA8::new(0, 255, 0, 255));
    img.set_pixel(0, 1, RGBA8::new(0, 0, 255, 255));
    img.set_pixel(1, 1, RGBA8::new(255, 255, 0, 255));

    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    assert_eq!(row_stride(2), Some(8));
    assert_eq!(encoded.len(), 70);
    assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), img);
}

// ── Round trips ─────────────────────────────────────────────────────

#[test]
fn noise_roundtrip_many_sizes() {
    let sizes = [1u32, 2, 3, 4, 5, 7, 8, 13, 64, 127, 255, 500];
    for (i, &w) in sizes.iter().enumerate() {
        for &h in &[1u32, 2, 9, 500] {
            if w * h > 64_000 {
                continue;
            }
            let img = noise_pattern(w, h, i as u32 ^ h);
            let encoded = encode_bmp(&img, Unstoppable).unwrap();
            let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
            assert!(rgb_eq(&img, &decoded), "{w}x{h}");
            assert!(decoded.pixels().iter().all(|p| p.a == 255), "{w}x{h}");
        }
    }
}

#[test]
fn large_square_roundtrip() {
    let img = noise_pattern(500, 500, 7);
    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    assert_eq!(encoded.len(), 54 + 500 * 1500);
    assert!(rgb_eq(&img, &decode_bmp(&encoded, Unstoppable).unwrap()));
}

#[test]
fn strict_accepts_all_own_output() {
    let codec = BmpCodec::new().with_permissiveness(Permissiveness::Strict);
    for w in 1..=9 {
        let img = checkerboard(w, 3);
        let encoded = codec.encode(&img, Unstoppable).unwrap();
        assert_eq!(codec.decode(&encoded, Unstoppable).unwrap(), img);
    }
}

#[test]
fn ppm_noise_roundtrip() {
    let img = noise_pattern(13, 11, 3);
    let encoded = encode_ppm(&img, Unstoppable).unwrap();
    let decoded = decode_ppm(&encoded, Unstoppable).unwrap();
    assert!(rgb_eq(&img, &decoded));
}

// ── Malformed input ─────────────────────────────────────────────────

#[test]
fn garbage_never_panics() {
    let base = encode_bmp(&noise_pattern(5, 4, 1), Unstoppable).unwrap();
    let levels = [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ];
    for len in 0..base.len() {
        for p in levels {
            let _ = BmpCodec::new()
                .with_permissiveness(p)
                .decode(&base[..len], Unstoppable);
        }
    }
    for i in 0..54 {
        for byte in [0x7F, 0xFF] {
            let mut data = base.clone();
            data[i] = byte;
            for p in levels {
                let _ = BmpCodec::new()
                    .with_permissiveness(p)
                    .decode(&data, Unstoppable);
            }
        }
    }
}

#[test]
fn read_headers_does_not_validate() {
    let mut data = encode_bmp(&Image::new(2, 2), Unstoppable).unwrap();
    data[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    let (_, info) = bmp::read_headers(&data[..54]).unwrap();
    assert_eq!(info.height, i32::MAX);
    assert!(matches!(
        bmp::read_headers(&data[..53]),
        Err(CodecError::UnexpectedEof)
    ));
}

#[test]
fn permissive_rejects_forged_dimensions() {
    let mut data = encode_bmp(&Image::new(2, 2), Unstoppable).unwrap();
    assert_eq!(data.len(), 70);
    data[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
    data[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
    let codec = BmpCodec::new().with_permissiveness(Permissiveness::Permissive);
    assert!(codec.decode(&data, Unstoppable).is_err());

    data[18..22].copy_from_slice(&100_000i32.to_le_bytes());
    data[22..26].copy_from_slice(&100_000i32.to_le_bytes());
    match codec.decode(&data, Unstoppable) {
        Err(CodecError::UnexpectedEof) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn limits_reject_large() {
    let encoded = encode_bmp(&checkerboard(4, 4), Unstoppable).unwrap();
    let codec = BmpCodec::new().with_limits(Limits {
        max_pixels: Some(15),
        ..Default::default()
    });
    match codec.decode(&encoded, Unstoppable) {
        Err(CodecError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let bmp = BmpCodec::new().with_limits(limits.clone());
    if let Ok(decoded) = bmp.decode(data, enough::Unstoppable) {
        let reencoded = bmp
            .encode(&decoded, enough::Unstoppable)
            .expect("decoded BMP must re-encode");
        let decoded2 = bmp
            .decode(&reencoded, enough::Unstoppable)
            .expect("re-encoded BMP failed to decode");
        assert_eq!(decoded, decoded2, "BMP roundtrip pixel mismatch");
    }

    let ppm = PpmCodec::new().with_limits(limits);
    if let Ok(decoded) = ppm.decode(data, enough::Unstoppable) {
        let reencoded = ppm
            .encode(&decoded, enough::Unstoppable)
            .expect("decoded PPM must re-encode");
        let decoded2 = ppm
            .decode(&reencoded, enough::Unstoppable)
            .expect("re-encoded PPM failed to decode");
        assert_eq!(decoded, decoded2, "PPM roundtrip pixel mismatch");
    }
});

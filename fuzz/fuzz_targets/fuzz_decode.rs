#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::{BmpCodec, Limits, Permissiveness, PpmCodec};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Every BMP level and the PPM decoder must never panic, with or without
    // limits. Without them, allocation is bounded by the input itself.
    for p in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = BmpCodec::new()
            .with_permissiveness(p)
            .with_limits(limits.clone())
            .decode(data, enough::Unstoppable);
        let _ = BmpCodec::new()
            .with_permissiveness(p)
            .decode(data, enough::Unstoppable);
    }
    let _ = PpmCodec::new()
        .with_limits(limits)
        .decode(data, enough::Unstoppable);
    let _ = PpmCodec::new().decode(data, enough::Unstoppable);
});

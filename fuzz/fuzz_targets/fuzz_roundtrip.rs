#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // If we can decode it, encode -> decode in both forms must give identical samples
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Plain files may carry samples above their max value; those are
    // truncated on encode, so only in-range rasters must roundtrip.
    let max = (1u64 << decoded.bit_depths()[0]) - 1;
    if decoded.samples().to_u64_vec().iter().any(|&s| s > max) {
        return;
    }

    for raw in [true, false] {
        let options = EncodeOptions {
            raw,
            ..Default::default()
        };
        let Ok(reencoded) = encode_to_vec(&decoded, &options) else {
            panic!("decoded image failed to encode");
        };
        let Ok(decoded2) = decode(&reencoded[..]) else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.width(), decoded2.width());
        assert_eq!(decoded.height(), decoded2.height());
        assert_eq!(
            decoded.samples().to_u64_vec(),
            decoded2.samples().to_u64_vec(),
            "roundtrip sample mismatch"
        );
    }
});

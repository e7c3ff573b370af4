#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bound the raster so a tiny header cannot request gigabytes.
    let limits = zenpnm::Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Eager and lazy decode must never panic
    let _ = zenpnm::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    if let Ok(decoder) = zenpnm::DecodeRequest::new(data).with_limits(&limits).open() {
        let _ = decoder.raster();
        let _ = decoder.tile(0, 1);
    }

    let _ = zenpnm::probe(data);
    let _ = zenpnm::sniff(data);
});

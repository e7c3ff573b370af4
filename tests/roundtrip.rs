use enough::Unstoppable;
use zenpnm::*;

fn no_comment(raw: bool) -> EncodeOptions {
    EncodeOptions {
        raw,
        comment: None,
    }
}

/// Deterministic samples masked to `depth` bits, in the narrowest container.
fn noise_image(w: u32, h: u32, bands: usize, depth: u8, seed: u32) -> Image {
    let len = w as usize * h as usize * bands;
    let mask = if depth == 32 {
        u32::MAX
    } else {
        (1u32 << depth) - 1
    };
    let mut state = seed | 1;
    let values: Vec<u32> = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state & mask
        })
        .collect();
    let samples = if depth <= 8 {
        Samples::U8(values.iter().map(|&v| v as u8).collect())
    } else if depth <= 16 {
        Samples::U16(values.iter().map(|&v| v as u16).collect())
    } else {
        Samples::U32(values)
    };
    Image::new(w, h, bands, samples)
        .unwrap()
        .with_bit_depth(depth)
        .unwrap()
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn plain_pbm_decodes_rows() {
    let image = decode(&b"P1\n2 2\n1 0\n0 1\n"[..]).unwrap();
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.bands(), 1);
    assert_eq!(image.bit_depths(), &[1]);
    assert_eq!(image.samples(), &Samples::U8(vec![1, 0, 0, 1]));
    assert_eq!(image.sample(0, 0, 0), Some(1));
    assert_eq!(image.sample(1, 0, 0), Some(0));
    assert_eq!(image.sample(0, 1, 0), Some(0));
    assert_eq!(image.sample(1, 1, 0), Some(1));
}

#[test]
fn raw_pbm_unpacks_msb_first() {
    let mut data = b"P4\n8 1\n".to_vec();
    data.push(0b1011_0010);
    let image = decode(&data[..]).unwrap();
    assert_eq!(image.samples(), &Samples::U8(vec![1, 0, 1, 1, 0, 0, 1, 0]));
}

#[test]
fn raw_pgm_reencodes_byte_for_byte() {
    let mut data = b"P5\n1 1\n255\n".to_vec();
    data.push(0x80);
    assert_eq!(data.len(), 12);

    let image = decode(&data[..]).unwrap();
    assert_eq!(image.samples(), &Samples::U8(vec![128]));
    assert_eq!(image.bit_depths(), &[8]);

    let encoded = encode_to_vec(&image, &no_comment(true)).unwrap();
    assert_eq!(encoded, data);

    // The default comment line only changes the header.
    let commented = encode_to_vec(&image, &EncodeOptions::default()).unwrap();
    assert_eq!(commented, b"P5\n# written by zenpnm\n1 1\n255\n\x80");
}

#[test]
fn plain_ppm_stores_triplets_reversed() {
    let image = decode(&b"P3\n1 1\n255\n10 20 30"[..]).unwrap();
    assert_eq!(image.bands(), 3);
    // File order R=10, G=20, B=30; raster index 0 holds B.
    assert_eq!(image.samples(), &Samples::U8(vec![30, 20, 10]));
    assert_eq!(image.sample(0, 0, 0), Some(30));
    assert_eq!(image.sample(0, 0, 1), Some(20));
    assert_eq!(image.sample(0, 0, 2), Some(10));
}

#[test]
fn raw_ppm_matches_plain_channel_order() {
    let mut data = b"P6\n1 1\n255\n".to_vec();
    data.extend_from_slice(&[10, 20, 30]);
    let raw = decode(&data[..]).unwrap();
    let plain = decode(&b"P3\n1 1\n255\n10 20 30\n"[..]).unwrap();
    assert_eq!(raw.samples(), plain.samples());

    let encoded = encode_to_vec(&raw, &no_comment(true)).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn wide_gray_refuses_raw_upgrade() {
    let image = Image::new(3, 2, 1, Samples::U16(vec![0, 1, 4095, 2048, 7, 100]))
        .unwrap()
        .with_bit_depth(12)
        .unwrap();

    let request = EncodeRequest::new().raw(true);
    assert_eq!(request.variant_for(&image).unwrap(), Variant::PgmAscii);

    let encoded = request.comment(None).encode_to_vec(&image, Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P2\n3 2\n4095\n"), "{encoded:?}");

    let decoded = decode(&encoded[..]).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn float_source_is_rejected_before_writing() {
    let image = Image::new(2, 1, 1, Samples::F32(vec![0.25, 0.5])).unwrap();
    let mut sink = Vec::new();
    let err = encode(&image, &EncodeOptions::default(), &mut sink).unwrap_err();
    assert!(matches!(err, PnmError::UnsupportedSampleType(SampleKind::F32)));
    assert!(sink.is_empty());

    let doubles = Image::new(1, 1, 3, Samples::F64(vec![0.0; 3])).unwrap();
    assert!(matches!(
        encode(&doubles, &EncodeOptions::default(), &mut sink),
        Err(PnmError::UnsupportedSampleType(SampleKind::F64))
    ));
    assert!(sink.is_empty());
}

#[test]
fn unsupported_band_count_writes_nothing() {
    let image = Image::new(2, 2, 4, Samples::U8(vec![0; 16])).unwrap();
    let mut sink = Vec::new();
    let err = encode(&image, &EncodeOptions::default(), &mut sink).unwrap_err();
    assert!(matches!(err, PnmError::UnsupportedBandCount(4)));
    assert!(sink.is_empty());
}

// ── Round trips ──────────────────────────────────────────────────────

#[test]
fn noise_roundtrip_all_depths_and_forms() {
    let sizes = [(1, 1), (3, 5), (7, 9), (13, 17), (16, 8), (11, 25)];
    let depths = [1u8, 4, 8, 12, 16, 24, 32];
    let mut seed: u32 = 0xDEAD_BEEF;
    for &(w, h) in &sizes {
        for bands in [1usize, 3] {
            for &depth in &depths {
                for raw in [true, false] {
                    seed = seed.wrapping_add(0x9E37_79B9);
                    let image = noise_image(w, h, bands, depth, seed);
                    let encoded = encode_to_vec(&image, &EncodeOptions {
                        raw,
                        ..Default::default()
                    })
                    .unwrap();
                    let decoded = decode(&encoded[..]).unwrap();
                    assert_eq!(
                        decoded, image,
                        "{w}x{h} bands={bands} depth={depth} raw={raw}"
                    );
                }
            }
        }
    }
}

#[test]
fn raw_roundtrip_spans_ragged_chunks() {
    // 11x25: three full 8-row chunks, then a single row.
    let bitmap = noise_image(11, 25, 1, 1, 7);
    let color = noise_image(11, 25, 3, 8, 11);
    // PBM packs 88 bits per full chunk and 11 in the last one.
    let cases = [
        (&bitmap, &b"P4\n11 25\n"[..], 3 * 11 + 2),
        (&color, &b"P6\n11 25\n255\n"[..], 11 * 25 * 3),
    ];
    for (image, header, payload) in cases {
        let encoded = encode_to_vec(image, &no_comment(true)).unwrap();
        assert!(encoded.starts_with(header));
        assert_eq!(encoded.len(), header.len() + payload);
        assert_eq!(&decode(&encoded[..]).unwrap(), image);
    }
}

#[test]
fn roundtrip_preserves_samples_across_containers() {
    // 8-bit depth in a 16-bit container comes back in an 8-bit container.
    let image = Image::new(2, 2, 1, Samples::U16(vec![0, 17, 200, 255]))
        .unwrap()
        .with_bit_depth(8)
        .unwrap();
    let encoded = encode_to_vec(&image, &EncodeOptions::default()).unwrap();
    let decoded = decode(&encoded[..]).unwrap();
    assert_eq!(decoded.sample_kind(), SampleKind::U8);
    assert_eq!(
        decoded.samples().to_u64_vec(),
        image.samples().to_u64_vec()
    );
}

#[test]
fn selected_variants() {
    let cases = [
        (1usize, 1u8, true, Variant::PbmRaw),
        (1, 1, false, Variant::PbmAscii),
        (1, 8, true, Variant::PgmRaw),
        (1, 5, false, Variant::PgmAscii),
        (1, 9, true, Variant::PgmAscii),
        (1, 16, false, Variant::PgmAscii),
        (3, 8, true, Variant::PpmRaw),
        (3, 2, false, Variant::PpmAscii),
        (3, 10, true, Variant::PpmAscii),
    ];
    for (bands, depth, raw, expected) in cases {
        let depths = vec![depth; bands];
        assert_eq!(
            pnm::select_variant(bands, &depths, raw).unwrap(),
            expected,
            "bands={bands} depth={depth} raw={raw}"
        );
    }
    assert!(matches!(
        pnm::select_variant(2, &[8, 8], true),
        Err(PnmError::UnsupportedBandCount(2))
    ));
}

#[test]
fn max_value_follows_band_zero_only() {
    // Band 0 is 8 bits, so the raw PPM path is taken even though band 2 is
    // 16 bits wide; wider samples are truncated to their low byte.
    let image = Image::new(1, 1, 3, Samples::U16(vec![200, 100, 0x1234]))
        .unwrap()
        .with_bit_depths(vec![8, 8, 16])
        .unwrap();
    let encoded = encode_to_vec(&image, &no_comment(true)).unwrap();
    assert_eq!(encoded, b"P6\n1 1\n255\n\x34\x64\xc8");
}

#[test]
fn probe_reads_header_only() {
    let header = probe(b"P6\n# cam\n640 480\n255\n").unwrap();
    assert_eq!(header.variant, Variant::PpmRaw);
    assert_eq!((header.width, header.height), (640, 480));
    assert_eq!(header.max_value, 255);
    assert_eq!(header.bands(), 3);
}

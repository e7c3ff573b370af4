#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Plain variants
    fs::write(format!("{dir}/pbm_plain_2x2.pbm"), b"P1\n2 2\n1 0\n0 1\n").unwrap();
    fs::write(format!("{dir}/pgm_plain_wide.pgm"), b"P2\n# c\n3 1\n65535\n0 1000 65535\n").unwrap();
    fs::write(format!("{dir}/ppm_plain_1x1.ppm"), b"P3\n1 1\n255\n10 20 30\n").unwrap();

    // Raw variants
    fs::write(format!("{dir}/pbm_raw_9x2.pbm"), b"P4\n9 2\n\xb5\x6a\xc0").unwrap();
    fs::write(format!("{dir}/pgm_raw_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_raw_2x2.ppm"), ppm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/comment_to_eof.bin"), b"P2 # no newline").unwrap();
    fs::write(format!("{dir}/bad_digit.bin"), b"P7\n1 1\n255\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}

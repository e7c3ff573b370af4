//! 1-bit sample packing for PBM.
//!
//! Bits are stored most significant first; only the low bit of each sample
//! is packed.

/// Expand `packed` bytes into one 0/1 sample per bit, filling `out`.
///
/// `packed` must hold at least `out.len().div_ceil(8)` bytes; trailing bits
/// of the final byte beyond `out.len()` are ignored.
pub(crate) fn unpack_msb_first(packed: &[u8], out: &mut [u8]) {
    let mut in_iter = packed.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, &in_val)| {
            for (pos, out_val) in out_vals.iter_mut().enumerate() {
                *out_val = (in_val >> (7 - pos)) & 0x01;
            }
        });

    if let Some(&in_val) = in_iter.next() {
        for (pos, out_val) in out_iter.into_remainder().iter_mut().enumerate() {
            *out_val = (in_val >> (7 - pos)) & 0x01;
        }
    }
}

/// Pack the low bit of each sample into `out`, 8 per byte.
///
/// `out` must hold `samples.len().div_ceil(8)` bytes. Unused low-order bits of
/// a final partial byte are zero.
pub(crate) fn pack_msb_first<I>(samples: I, out: &mut [u8])
where
    I: IntoIterator<Item = u8>,
{
    out.fill(0);
    for (i, sample) in samples.into_iter().enumerate() {
        out[i / 8] |= (sample & 0x01) << (7 - (i % 8));
    }
}

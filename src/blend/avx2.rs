#![allow(clippy::undocumented_unsafe_blocks)]

use std::arch::x86_64::*;

use super::{CHANNEL_MAX, rust};

const LANES: usize = 8;

/// Blends one span of a channel plane, eight samples at a time.
///
/// Performs the same IEEE operations in the same order as the scalar
/// kernel (subtract, multiply, divide, truncate, subtract, clamp), so the
/// output is bit-identical for samples in the 8-bit range. The tail that
/// doesn't fill a full vector falls back to the scalar kernel.
#[target_feature(enable = "avx2")]
pub fn blacken_row(dest: &mut [f32], source: &[f32], help: &[f32]) {
    // Check the array bounds once at the start of the loop.
    let len = dest.len();
    assert!(source.len() >= len);
    assert!(help.len() >= len);

    let vector_len = len - len % LANES;
    unsafe {
        blacken_row_ptr(
            dest.as_mut_ptr(),
            source.as_ptr(),
            help.as_ptr(),
            vector_len,
        );
    }

    rust::blacken_row(
        &mut dest[vector_len..],
        &source[vector_len..len],
        &help[vector_len..len],
    );
}

#[target_feature(enable = "avx2")]
unsafe fn blacken_row_ptr(dest: *mut f32, source: *const f32, help: *const f32, len: usize) {
    let channel_max = _mm256_set1_ps(CHANNEL_MAX);
    let scale = _mm256_set1_ps(256.0);
    let one = _mm256_set1_ps(1.0);
    let zero = _mm256_setzero_ps();

    for offset in (0..len).step_by(LANES) {
        let s = _mm256_loadu_ps(source.add(offset));
        let h = _mm256_loadu_ps(help.add(offset));

        let numerator = _mm256_mul_ps(scale, _mm256_sub_ps(channel_max, h));
        let quotient = _mm256_div_ps(numerator, _mm256_add_ps(s, one));
        let quotient = _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(quotient);

        let value = _mm256_sub_ps(channel_max, quotient);
        let clamped = _mm256_min_ps(_mm256_max_ps(value, zero), channel_max);

        _mm256_storeu_ps(dest.add(offset), clamped);
    }
}

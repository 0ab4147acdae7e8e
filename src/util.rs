
use std::num::NonZeroUsize;

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
        cpufeatures::new!(cpuid_avx2, "avx2");

        pub use cpuid_avx2::get as has_avx2;
    } else {
        /// AVX2 is never used on this target, or the `no_simd` feature is set.
        #[must_use]
        pub fn has_avx2() -> bool {
            false
        }
    }
}

/// Number of samples in a planar buffer of `channels` planes of
/// `width * height` samples each, or `None` if that overflows `usize`.
#[must_use]
pub fn planar_len(width: NonZeroUsize, height: NonZeroUsize, channels: usize) -> Option<usize> {
    width
        .get()
        .checked_mul(height.get())
        .and_then(|plane| plane.checked_mul(channels))
}

/// Converts a stored floating point sample to an 8-bit channel value.
#[must_use]
pub fn sample_to_u8(sample: f32) -> u8 {
    // `as` saturates, and NaN maps to 0
    sample.round().clamp(0.0, 255.0) as u8
}

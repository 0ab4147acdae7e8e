#[cfg(all(target_arch = "x86_64", feature = "bench"))]
pub mod avx2;
#[cfg(all(target_arch = "x86_64", not(feature = "bench")))]
mod avx2;
#[cfg(feature = "bench")]
pub mod rust;
#[cfg(not(feature = "bench"))]
mod rust;


#[cfg(target_arch = "x86_64")]
use crate::util::has_avx2;

/// Largest value an 8-bit channel can hold.
pub const CHANNEL_MAX: f32 = 255.0;

/// Applies the "blacken" blend to a single channel sample.
///
/// ```text
/// output = clamp(255 - trunc(256 * (255 - help) / (source + 1)), 0, 255)
/// ```
///
/// The `+ 1` keeps the divisor non-zero when `source` is black. For
/// integer-valued samples in `[0, 255]` the truncated quotient equals integer
/// division of `256 * (255 - help)` by `source + 1`, and the result is
/// always an integer in `[0, 255]`.
///
/// A white help sample always produces white, and a bright source pushes
/// the result toward white.
#[must_use]
#[inline]
pub fn blacken(source: f32, help: f32) -> f32 {
    rust::blacken(source, help)
}

/// Blends one span of a channel plane: `dest[i] = blacken(source[i], help[i])`.
///
/// The three slices must have the same length. Any contiguous span works,
/// from a single row up to a whole band of rows or a whole plane, since the
/// kernel only ever looks at one offset at a time.
///
/// Uses the AVX2 kernel when the CPU supports it. Both kernels give
/// bit-identical results for samples in the 8-bit range.
///
/// # Panics
/// Panics if the slice lengths differ.
pub fn blacken_row(dest: &mut [f32], source: &[f32], help: &[f32]) {
    assert_eq!(dest.len(), source.len());
    assert_eq!(dest.len(), help.len());

    #[cfg(target_arch = "x86_64")]
    if has_avx2() {
        // SAFETY: We check for AVX2 first
        unsafe {
            avx2::blacken_row(dest, source, help);
        }
        return;
    }

    rust::blacken_row(dest, source, help);
}

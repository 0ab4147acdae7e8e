use super::CHANNEL_MAX;

#[must_use]
#[inline]
pub fn blacken(source: f32, help: f32) -> f32 {
    let quotient = (256.0 * (CHANNEL_MAX - help) / (source + 1.0)).trunc();
    (CHANNEL_MAX - quotient).clamp(0.0, CHANNEL_MAX)
}

pub fn blacken_row(dest: &mut [f32], source: &[f32], help: &[f32]) {
    for ((out, &s), &h) in dest.iter_mut().zip(source).zip(help) {
        *out = blacken(s, h);
    }
}

use std::hint::black_box;

use blacken::blend::{blacken_row, rust};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

const PLANE_LEN: usize = 1024 * 768;

fn random_plane(rng: &mut Xoshiro128StarStar) -> Vec<f32> {
    (0..PLANE_LEN).map(|_| f32::from(rng.random::<u8>())).collect()
}

pub fn bench_blacken_row(c: &mut Criterion) {
    let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
    let source = random_plane(&mut rng);
    let help = random_plane(&mut rng);
    let mut dest = vec![0.0f32; PLANE_LEN];

    c.bench_function("blacken_row rust", |b| {
        b.iter(|| rust::blacken_row(black_box(&mut dest), black_box(&source), black_box(&help)))
    });

    c.bench_function("blacken_row dispatch", |b| {
        b.iter(|| blacken_row(black_box(&mut dest), black_box(&source), black_box(&help)))
    });

    #[cfg(target_arch = "x86_64")]
    if blacken::util::has_avx2() {
        c.bench_function("blacken_row avx2", |b| {
            b.iter(|| {
                // SAFETY: We check for AVX2 first
                unsafe {
                    blacken::blend::avx2::blacken_row(
                        black_box(&mut dest),
                        black_box(&source),
                        black_box(&help),
                    );
                }
            })
        });
    }
}

criterion_group!(bench_blend, bench_blacken_row);
criterion_main!(bench_blend);

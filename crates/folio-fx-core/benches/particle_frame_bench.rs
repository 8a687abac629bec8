//! Benchmarks for one particle-field frame (step + render).
//!
//! The link pass is quadratic in the particle count, so this tracks how a
//! frame scales from the default 50 particles upward.
//!
//! Run with: cargo bench -p folio-fx-core --bench particle_frame_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_fx_core::config::ParticlesConfig;
use folio_fx_core::geometry::{Point, Size};
use folio_fx_core::surface::RenderSurface;
use folio_fx_core::ParticleField;
use std::hint::black_box;

/// Surface that discards everything, so only field work is measured.
struct NullSurface(Size);

impl RenderSurface for NullSurface {
    fn size(&self) -> Size {
        self.0
    }

    fn set_size(&mut self, size: Size) {
        self.0 = size;
    }

    fn clear(&mut self) {}

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64) {
        black_box((center, radius, color, alpha));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, alpha: f64, width: f64) {
        black_box((from, to, color, alpha, width));
    }
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles/frame");
    let bounds = Size::new(1920.0, 1080.0);

    for count in [50usize, 100, 200] {
        group.throughput(Throughput::Elements(count as u64));
        let config = ParticlesConfig {
            count,
            ..ParticlesConfig::default()
        };
        let mut field = ParticleField::new(config, bounds, 42);
        let mut surface = NullSurface(bounds);
        group.bench_with_input(BenchmarkId::new("step_render", count), &(), |b, _| {
            b.iter(|| black_box(field.frame(&mut surface)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);

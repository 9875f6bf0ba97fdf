//! Benchmarks for spark-spyglass
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spark_spyglass::{
    patch, Camera, CameraSynchronizer, LngLat, MapView, MemoryMap, OptionsPatch, Spyglass,
    SpyglassOptions,
};
use std::rc::Rc;

fn camera(step: u32) -> Camera {
    let t = step as f64;
    Camera::new(LngLat::new(t % 180.0, (t * 0.5) % 85.0), t % 20.0)
        .with_bearing(t % 360.0)
        .with_pitch(t % 60.0)
}

// =============================================================================
// SYNCHRONIZER BENCHMARKS
// =============================================================================

fn bench_synchronize_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("synchronize_fan_out");

    for n in [2usize, 8, 32] {
        let views: Vec<Rc<dyn MapView>> = (0..n)
            .map(|_| Rc::new(MemoryMap::new(Camera::default())) as Rc<dyn MapView>)
            .collect();
        let sync = CameraSynchronizer::new(views).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sync.synchronize_from(black_box(0)).unwrap())
        });
    }

    group.finish();
}

// =============================================================================
// WIDGET BENCHMARKS
// =============================================================================

fn bench_user_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("user_move");

    for echo in [false, true] {
        let primary = Rc::new(MemoryMap::new(Camera::default()));
        let spy = Rc::new(MemoryMap::new(Camera::default()));
        primary.emit_move_on_set_camera(echo);
        spy.emit_move_on_set_camera(echo);
        let _glass = Spyglass::new(primary.clone(), spy.clone(), None).unwrap();

        let label = if echo { "echoing_engine" } else { "silent_engine" };
        let mut step = 0u32;
        group.bench_function(label, |b| {
            b.iter(|| {
                step = step.wrapping_add(1);
                primary.move_to(black_box(camera(step))).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_set_options(c: &mut Criterion) {
    let primary = Rc::new(MemoryMap::new(Camera::default()));
    let spy = Rc::new(MemoryMap::new(Camera::default()));
    let mut glass = Spyglass::new(primary, spy, None).unwrap();
    let update = patch!(size: 400.0, border_width: 10.0, opacity: 0.8);

    c.bench_function("set_options", |b| {
        b.iter(|| glass.set_options(black_box(&update)).unwrap())
    });
}

// =============================================================================
// OPTIONS BENCHMARKS
// =============================================================================

fn bench_merge(c: &mut Criterion) {
    let opts = SpyglassOptions::default();
    let update = patch!(shape: spark_spyglass::Shape::Square, size: 200.0);

    c.bench_function("options_merge", |b| {
        b.iter(|| black_box(opts.merge(black_box(&update))))
    });
}

fn bench_lenient_patch(c: &mut Criterion) {
    let config = serde_json::json!({
        "borderColor": "#123456",
        "borderWidth": 3,
        "opacity": "bad",
        "shape": "circle",
        "size": 280
    });

    c.bench_function("options_patch_from_json", |b| {
        b.iter(|| black_box(OptionsPatch::from_json(black_box(&config))))
    });
}

criterion_group!(synchronizer_benches, bench_synchronize_fan_out);

criterion_group!(widget_benches, bench_user_move, bench_set_options);

criterion_group!(options_benches, bench_merge, bench_lenient_patch);

criterion_main!(synchronizer_benches, widget_benches, options_benches);

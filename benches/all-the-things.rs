use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use steerable_pyramid as sp;

fn test_image(dim: u32) -> sp::Plane<f64> {
    sp::Plane::from_fn(sp::Dims::square(dim), |x, y| {
        ((x as f64 * 0.3).sin() + (y as f64 * 0.17).cos()) * 0.25 + 0.5
    })
}

fn decompose(c: &mut Criterion) {
    static DIM: u32 = 32;

    let mut group = c.benchmark_group("decompose");
    group.sample_size(10);

    for dim in [DIM, 2 * DIM, 4 * DIM, 8 * DIM, 16 * DIM].iter() {
        let image = test_image(*dim);
        let session = sp::Session::builder()
            .depth(3)
            .scales(2)
            .orientations(4)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(dim), &image, |b, image| {
            b.iter(|| black_box(session.decompose(image).unwrap()));
        });
    }
    group.finish();
}

fn reconstruct(c: &mut Criterion) {
    static DIM: u32 = 32;

    let mut group = c.benchmark_group("reconstruct");
    group.sample_size(10);

    for dim in [DIM, 2 * DIM, 4 * DIM, 8 * DIM, 16 * DIM].iter() {
        let session = sp::Session::builder()
            .depth(3)
            .scales(2)
            .orientations(4)
            .build()
            .unwrap();
        let pyramid = session.decompose(&test_image(*dim)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(dim), &pyramid, |b, pyramid| {
            b.iter(|| black_box(session.reconstruct(pyramid).unwrap()));
        });
    }
    group.finish();
}

fn orientations(c: &mut Criterion) {
    let image = test_image(128);

    let mut group = c.benchmark_group("orientations");
    group.sample_size(10);

    for count in [1u32, 2, 4, 8, 16].iter() {
        let session = sp::Session::builder()
            .depth(2)
            .orientations(*count)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(session.decompose(&image).unwrap()));
        });
    }
    group.finish();
}

fn engines(c: &mut Criterion) {
    use std::sync::Arc;

    let image = test_image(128);

    let mut group = c.benchmark_group("engines");
    group.sample_size(10);

    let engines: [(&str, Arc<dyn sp::TransformEngine>); 2] = [
        ("cached", Arc::new(sp::CachedPlanner::new())),
        ("fresh", Arc::new(sp::FreshPlanner)),
    ];

    for (name, engine) in engines.iter() {
        let session = sp::Session::builder()
            .depth(3)
            .transform_engine(Arc::clone(engine))
            .build()
            .unwrap();

        group.bench_function(*name, |b| {
            b.iter(|| black_box(session.decompose(&image).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, decompose, reconstruct, orientations, engines);
criterion_main!(benches);

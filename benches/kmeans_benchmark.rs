use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use medkmeans::{
    points_from_array, run, DaviesBouldinIndex, DunnIndex, KMeansConfig, QualityIndex, Vector,
};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

fn random_points(n_samples: usize, n_features: usize) -> Vec<Vector> {
    let data = Array2::random((n_samples, n_features), Uniform::new(-1.0f64, 1.0));
    points_from_array(&data.view())
}

fn bench_config(k: usize) -> KMeansConfig {
    KMeansConfig::new(k).with_seed(42).with_max_iters(5)
}

fn benchmark_kmeans_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 16;
    let k = 5;
    let sample_sizes = [1_000, 10_000, 100_000];

    for n_samples in sample_sizes.iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let points = random_points(n_samples, n_features);
                let config = bench_config(k);

                b.iter(|| run(black_box(&points), &config).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_kmeans_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 5_000;
    let n_features = 16;
    let cluster_counts = [5, 20, 50];

    for k in cluster_counts.iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let points = random_points(n_samples, n_features);
            let config = bench_config(k);

            b.iter(|| run(black_box(&points), &config).unwrap());
        });
    }
    group.finish();
}

fn benchmark_kmeans_varying_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_dimensions");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 2_000;
    let k = 10;
    let dimensions = [2, 32, 128];

    for n_features in dimensions.iter() {
        group.throughput(Throughput::Elements(*n_features as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_features),
            n_features,
            |b, &n_features| {
                let points = random_points(n_samples, n_features);
                let config = bench_config(k);

                b.iter(|| run(black_box(&points), &config).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_quality_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("quality_indices");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let points = random_points(10_000, 16);
    let result = run(&points, &bench_config(20)).unwrap();

    let indices: [&dyn QualityIndex; 2] = [&DunnIndex, &DaviesBouldinIndex];
    for index in indices {
        group.bench_function(index.name(), |b| {
            b.iter(|| index.score(black_box(&result.clusters)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_kmeans_varying_samples,
    benchmark_kmeans_varying_clusters,
    benchmark_kmeans_varying_dimensions,
    benchmark_quality_indices,
);

criterion_main!(benches);

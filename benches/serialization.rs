use chartjs_schema::{
    from_str, from_value, serialize_with_options, to_string, Chart, ChartType, Data, Dataset,
    Legend, Options, Plugins, SerializeOptions, Title, Value,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_chart(points: usize, series: usize) -> Chart {
    let datasets: Vec<Dataset> = (0..series)
        .map(|s| {
            let values: Vec<f64> = (0..points).map(|i| ((i * (s + 3)) % 17) as f64 * 0.5).collect();
            Dataset::line(values).with_label(format!("Series {}", s))
        })
        .collect();

    let mut data = Data::new(datasets);
    for i in 0..points {
        data.push_label(format!("Day {}", i));
    }

    let mut plugins = Plugins::new();
    plugins.insert("legend", Legend::new().with_reverse(true));
    plugins.insert("title", Title::new().with_text("Benchmark"));

    Chart::new(data)
        .with_chart_type(ChartType::Line)
        .with_options(Options::new(plugins))
}

fn benchmark_serialize_small(c: &mut Criterion) {
    let chart = build_chart(7, 2);

    c.bench_function("serialize_small_chart", |b| {
        b.iter(|| to_string(black_box(&chart)))
    });
}

fn benchmark_deserialize_small(c: &mut Criterion) {
    let json = to_string(&build_chart(7, 2)).unwrap_or_default();

    c.bench_function("deserialize_small_chart", |b| {
        b.iter(|| from_str::<Chart>(black_box(&json)))
    });
}

fn benchmark_serialize_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_points");

    for size in [10, 100, 1000, 10000].iter() {
        let chart = build_chart(*size, 3);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&chart)))
        });
    }

    group.finish();
}

fn benchmark_shape_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_matching");
    let options = SerializeOptions::all_fields();

    for size in [10, 100, 1000].iter() {
        let full = serialize_with_options(&build_chart(*size, 2), &options).unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &full, |b, full| {
            b.iter(|| from_value::<Chart>(black_box(full)))
        });
    }

    group.finish();
}

fn benchmark_exclusion_policies(c: &mut Criterion) {
    let chart = build_chart(100, 3);
    let mut group = c.benchmark_group("exclusion_policy");

    group.bench_function("defaults", |b| {
        b.iter(|| serialize_with_options(black_box(&chart), &SerializeOptions::new()))
    });
    group.bench_function("nothing", |b| {
        b.iter(|| serialize_with_options(black_box(&chart), &SerializeOptions::all_fields()))
    });

    group.finish();
}

fn benchmark_value_round_trip(c: &mut Criterion) {
    let json = to_string(&build_chart(100, 3)).unwrap_or_default();

    c.bench_function("parse_value_only", |b| {
        b.iter(|| serde_json::from_str::<Value>(black_box(&json)))
    });
}

criterion_group!(
    benches,
    benchmark_serialize_small,
    benchmark_deserialize_small,
    benchmark_serialize_points,
    benchmark_shape_matching,
    benchmark_exclusion_policies,
    benchmark_value_round_trip
);
criterion_main!(benches);

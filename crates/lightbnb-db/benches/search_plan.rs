use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lightbnb_db::{FilterSpec, search};

/// Filters with the first `n` predicates set, in builder order.
fn filter_with(n: usize) -> FilterSpec {
    let mut filter = FilterSpec::new();
    if n > 0 {
        filter = filter.city_containing("vancouver");
    }
    if n > 1 {
        filter = filter.owner_id(7);
    }
    if n > 2 {
        filter = filter.min_price_per_night(5_000);
    }
    if n > 3 {
        filter = filter.max_price_per_night(30_000);
    }
    if n > 4 {
        filter = filter.min_rating(4);
    }
    filter
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("search/build");

    for n in 0..=5 {
        let filter = filter_with(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &filter, |b, filter| {
            b.iter(|| black_box(search::build(filter, 10)));
        });
    }

    group.finish();
}

fn bench_build_and_validate(c: &mut Criterion) {
    let filter = filter_with(5);
    c.bench_function("search/build_and_validate", |b| {
        b.iter(|| {
            let plan = search::build(&filter, 10);
            black_box(plan.validate().is_ok());
        });
    });
}

fn bench_deserialize(c: &mut Criterion) {
    let json = r#"{"city":"%vancouver%","ownerId":7,"minimum_price_per_night":5000,"maxPricePerNight":30000,"minRating":4}"#;
    c.bench_function("search/deserialize_filter", |b| {
        b.iter(|| black_box(serde_json::from_str::<FilterSpec>(black_box(json)).is_ok()));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_build_and_validate,
    bench_deserialize
);
criterion_main!(benches);

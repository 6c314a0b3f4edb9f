use criterion::{Criterion, black_box, criterion_group, criterion_main};
use teletest::{TestCase, export_csv, sample_test_cases};

fn large_collection() -> Vec<TestCase> {
    let template = sample_test_cases();
    (0..1000)
        .map(|i| {
            let mut tc = template[i % template.len()].clone();
            tc.id = format!("TC-{:04}", i + 1);
            tc
        })
        .collect()
}

fn benchmark_export(c: &mut Criterion) {
    let cases = large_collection();

    c.bench_function("export_csv_1000", |b| {
        b.iter(|| export_csv(black_box(&cases)).unwrap())
    });
}

criterion_group!(benches, benchmark_export);
criterion_main!(benches);

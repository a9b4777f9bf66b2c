use std::{hint::black_box, time::Instant};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lumbung::{
    executor::scan::Scanner,
    storage::table::Table,
    types::row::Row,
    utils::mock::TempDatabase,
};

const DATASET_SIZES: &[usize] = &[100, 1_000, 10_000];
const BENCH_MAX_PAGES: usize = 1_000;

fn populate_table(table: &mut Table, row_count: usize) {
    for i in 0..row_count {
        let row = Row::new(
            i as u32,
            &format!("user{}", i),
            &format!("user{}@example.com", i),
        )
        .unwrap();
        table.append(&row).unwrap();
    }
}

fn benchmark_sequential_scan_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_scan_throughput");
    for &dataset_size in DATASET_SIZES {
        let benchmark_id = BenchmarkId::from_parameter(dataset_size);
        group.throughput(Throughput::Elements(dataset_size as u64));
        group.bench_with_input(benchmark_id, &dataset_size, |b, &size| {
            b.iter_custom(|iters| {
                let mut total_duration = std::time::Duration::new(0, 0);
                for _ in 0..iters {
                    let mut temp_db = TempDatabase::with_prefix("bench_scan");
                    let table = temp_db.open_table_with_max_pages(BENCH_MAX_PAGES).unwrap();
                    populate_table(table, size);
                    let mut scanner = table.create_scanner();
                    let start = Instant::now();
                    let mut count = 0;
                    while let Some(_row) = black_box(scanner.scan().unwrap()) {
                        count += 1;
                    }
                    let duration = start.elapsed();
                    assert_eq!(count, size);
                    total_duration += duration;
                }
                total_duration
            });
        });
    }
    group.finish();
}

fn benchmark_append_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_throughput");
    for &dataset_size in DATASET_SIZES {
        let benchmark_id = BenchmarkId::from_parameter(dataset_size);
        group.throughput(Throughput::Elements(dataset_size as u64));
        group.bench_with_input(benchmark_id, &dataset_size, |b, &size| {
            b.iter_custom(|iters| {
                let mut total_duration = std::time::Duration::new(0, 0);
                for _ in 0..iters {
                    let mut temp_db = TempDatabase::with_prefix("bench_append");
                    let table = temp_db.open_table_with_max_pages(BENCH_MAX_PAGES).unwrap();
                    let start = Instant::now();
                    populate_table(table, size);
                    let duration = start.elapsed();
                    assert_eq!(table.num_rows(), size);
                    total_duration += duration;
                }
                total_duration
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_sequential_scan_throughput,
    benchmark_append_throughput
);
criterion_main!(benches);

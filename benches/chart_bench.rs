//! Chart computation throughput over a generated 24-type matrix.
//!
//! Run with: `cargo bench --bench chart`

use amo::engine::{compute_chart, RoleAssignment};
use amo::matrix::MatrixSnapshot;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const TYPE_COUNT: usize = 24;

fn generated_matrix() -> String {
    let names: Vec<String> = (0..TYPE_COUNT).map(|i| format!("Type{i:02}")).collect();
    let mut text = format!("Attacker,{}", names.join(","));
    for (row, name) in names.iter().enumerate() {
        text.push('\n');
        text.push_str(name);
        for col in 0..TYPE_COUNT {
            let symbol = ["W", "R", "N", "N", "X"][(row * 7 + col * 3) % 5];
            text.push(',');
            text.push_str(symbol);
        }
    }
    text
}

fn bench_chart(c: &mut Criterion) {
    let text = generated_matrix();
    let snapshot = MatrixSnapshot::from_text(&text).expect("generated matrix should load");
    let roles = RoleAssignment::new("Type03", "Type11", "Type17");

    let mut group = c.benchmark_group("chart");
    group.throughput(Throughput::Elements(1));

    group.bench_function("load_24_types", |b| {
        b.iter(|| black_box(MatrixSnapshot::from_text(black_box(&text))))
    });
    group.bench_function("compute_24_types", |b| {
        b.iter(|| black_box(compute_chart(&snapshot, black_box(&roles), "Bench")))
    });

    group.finish();
}

criterion_group!(benches, bench_chart);
criterion_main!(benches);

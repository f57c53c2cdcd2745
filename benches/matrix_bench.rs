//! Matrix construction throughput for roster sizes typical of a faction war.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spyglass::matcher::{build_matrix, filter_matrix, MatchClass};
use spyglass::roster::Combatant;

fn roster(prefix: &str, size: usize, scale: u64) -> Vec<Combatant> {
    (0..size as u64)
        .map(|i| {
            let base = scale + i * 7_919;
            Combatant::new(
                format!("{prefix}{i}"),
                base.to_string(),
                (base * 3 / 2).to_string(),
                (base / 2 + 1).to_string(),
                (base + 12_345).to_string(),
            )
        })
        .collect()
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");

    for size in [10_usize, 100, 500] {
        let attackers = roster("attacker", size, 1_000_000);
        let targets = roster("target", size, 900_000);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, _| {
            b.iter(|| build_matrix(black_box(&attackers), black_box(&targets)))
        });

        let matrix = build_matrix(&attackers, &targets);
        group.bench_with_input(BenchmarkId::new("filter", size), &size, |b, _| {
            b.iter(|| filter_matrix(black_box(&matrix), MatchClass::Favored, false))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matrix);
criterion_main!(benches);

//! Performance benchmarks for AMG enumeration.
//!
//! Run with: `cargo bench --bench enumeration`
//!
//! | Operation | Notes |
//! |-----------|-------|
//! | `generate_amgs` | Builds every completion, keeps connected ones |
//! | `count_amgs` | Same walk, union-find connectivity, no AMGs built |
//! | `complete_amgs` | Partial matching, no connectivity filter |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use aberration_multigraph::{AmgGenerator, Edge, IncompleteAmg};

const LAYOUTS: &[(usize, &[usize])] = &[(1, &[4]), (2, &[2, 2]), (4, &[1, 1, 1, 1]), (3, &[2, 2, 1])];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_amgs");
    for &(nc, dsbs) in LAYOUTS {
        let generator = AmgGenerator::new(nc, dsbs.to_vec()).unwrap();
        group.throughput(Throughput::Elements(generator.count_amgs()));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", dsbs)), &generator, |b, g| {
            b.iter(|| black_box(g.generate_amgs().count()))
        });
    }
    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_amgs");
    for &(nc, dsbs) in LAYOUTS {
        let generator = AmgGenerator::new(nc, dsbs.to_vec()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", dsbs)), &generator, |b, g| {
            b.iter(|| black_box(g.count_amgs()))
        });
    }
    group.finish();
}

fn bench_complete(c: &mut Criterion) {
    let inc = IncompleteAmg::new(
        vec![(1, 2), (3, 4), (5, 6), (7, 8), (9, 10), (11, 12), (13, 14), (15, 16), (17, 18), (19, 20), (21, 22), (23, 24), (25, 26)],
        vec![(2, 3), (4, 5), (8, 9), (10, 11), (12, 13), (14, 15), (18, 19), (20, 21), (22, 23), (24, 25)],
        vec![(3, 5), (9, 10), (13, 14), (19, 20), (23, 24)],
    )
    .unwrap();

    c.bench_function("complete_amgs/945", |b| b.iter(|| black_box(inc.complete_amgs().count())));

    let generator = AmgGenerator::new(2, vec![2, 2]).unwrap();
    let backbone = IncompleteAmg::new(
        generator.chromatins().iter().cloned().map(Edge::into_pair),
        generator.dsbs().iter().cloned().map(Edge::into_pair),
        Vec::new(),
    )
    .unwrap();
    c.bench_function("complete_amgs/backbone_2x2", |b| b.iter(|| black_box(backbone.complete_amgs().count())));
}

fn bench_transforms(c: &mut Criterion) {
    let generator = AmgGenerator::new(2, vec![2, 2]).unwrap();
    let amgs: Vec<_> = generator.generate_amgs().collect();

    c.bench_function("total_twist/56", |b| {
        b.iter(|| {
            for amg in &amgs {
                black_box(amg.total_twist(1));
            }
        })
    });
    c.bench_function("total_swap/56", |b| {
        b.iter(|| {
            for amg in &amgs {
                black_box(amg.total_swap(0, 1));
            }
        })
    });
}

criterion_group!(benches, bench_generate, bench_count, bench_complete, bench_transforms);
criterion_main!(benches);

//! Benchmarks for UCR synthesis
//!
//! Run with: cargo bench -p ucr-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ucr_synth::bfs::find_target;
use ucr_synth::cost::{closed_form_costs, exhaustive_costs};
use ucr_synth::{RotationKind, Topology, compile_ucr};

/// Heavy-hex style chain: a line with a spur on every third spine qubit.
fn heavy_chain(num_qubits: usize) -> Vec<(usize, usize)> {
    let spine = num_qubits - num_qubits / 4;
    let mut edges: Vec<_> = (1..spine).map(|i| (i - 1, i)).collect();
    for (k, spur) in (spine..num_qubits).enumerate() {
        edges.push((3 * k, spur));
    }
    edges
}

/// Benchmark all-pairs distances and path materialization
fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");

    for num_qubits in &[5, 16, 32, 64] {
        let edges = heavy_chain(*num_qubits);
        group.bench_with_input(
            BenchmarkId::new("new", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| Topology::new(black_box(n), black_box(&edges)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark the target selectors
fn bench_target_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("target_selection");

    for num_qubits in &[5, 12, 16, 20] {
        let topology = Topology::new(*num_qubits, &heavy_chain(*num_qubits)).unwrap();

        group.bench_with_input(
            BenchmarkId::new("closed_form", num_qubits),
            &topology,
            |b, t| b.iter(|| closed_form_costs(black_box(t.distances())).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("exhaustive", num_qubits),
            &topology,
            |b, t| b.iter(|| exhaustive_costs(black_box(t.distances())).unwrap()),
        );

        let graph = topology.adjacency_list();
        group.bench_with_input(BenchmarkId::new("bfs", num_qubits), &graph, |b, g| {
            b.iter(|| find_target(black_box(g)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark full UCR compilation
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for num_qubits in &[5, 8, 12] {
        let topology = Topology::new(*num_qubits, &heavy_chain(*num_qubits)).unwrap();
        let target = closed_form_costs(topology.distances())
            .unwrap()
            .best_target()
            .unwrap();
        let params = vec![0.1; 1 << (num_qubits - 1)];

        group.bench_with_input(
            BenchmarkId::new("ucr", num_qubits),
            &topology,
            |b, t| {
                b.iter(|| {
                    compile_ucr(t, black_box(target), black_box(&params), RotationKind::Ry)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_topology, bench_target_selection, bench_compile);
criterion_main!(benches);

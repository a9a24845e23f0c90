//! Benchmarks for circuit construction and analysis
//!
//! Run with: cargo bench -p qbridge-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qbridge_ir::{Circuit, CircuitBuilder, GateSpec};
use std::f64::consts::PI;

/// Benchmark building circuits through the fluent API
fn bench_circuit_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_build");

    for num_qubits in &[2u32, 5, 10, 20] {
        group.bench_with_input(
            BenchmarkId::new("ghz", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let mut builder = CircuitBuilder::new(black_box(n)).unwrap();
                    builder.h(0).unwrap();
                    for i in 1..n {
                        builder.cx(0, i).unwrap();
                    }
                    builder.measure_all().unwrap();
                    black_box(builder.build())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark resolving wire-format gate specs
fn bench_from_specs(c: &mut Criterion) {
    let specs: Vec<GateSpec> = (0..100)
        .map(|i| match i % 3 {
            0 => GateSpec::new("h", [i % 10]),
            1 => GateSpec::with_params("rx", [i % 10], [PI / 4.0]),
            _ => GateSpec::new("cx", [i % 10, (i + 1) % 10]),
        })
        .collect();

    c.bench_function("from_specs_100", |b| {
        b.iter(|| black_box(Circuit::from_specs(10, black_box(&specs)).unwrap()));
    });
}

/// Benchmark circuit depth calculation
fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for num_qubits in &[5u32, 10, 20, 50] {
        let mut builder = CircuitBuilder::new(*num_qubits).unwrap();
        for _layer in 0..5 {
            for i in 0..*num_qubits {
                builder.h(i).unwrap();
            }
            for i in (0..*num_qubits - 1).step_by(2) {
                builder.cx(i, i + 1).unwrap();
            }
        }
        let circuit = builder.build();

        group.bench_with_input(
            BenchmarkId::new("depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_circuit_build,
    bench_from_specs,
    bench_circuit_depth,
);

criterion_main!(benches);

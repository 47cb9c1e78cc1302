//! Benchmarks for the knitting engine.
//!
//! These measure a bounded knit of the infinite Kronecker component, the
//! self-terminating knit of the four-subspace star, and the cost of
//! resuming growth across widening horizons.

use arknit::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn kronecker_radical() -> Radical {
    let a = ProjIndex::from("a");
    let mut radical = Radical::new();
    radical.insert(a.clone(), vec![]);
    radical.insert(
        ProjIndex::from("b"),
        vec![Summand::new(2, DimVector::unit(&a))],
    );
    radical
}

fn star_radical() -> Radical {
    let mut radical = Radical::new();
    let mut summands = Vec::new();
    for arm in ["a", "b", "c"] {
        let index = ProjIndex::from(arm);
        radical.insert(index.clone(), vec![]);
        summands.push(Summand::new(1, DimVector::unit(&index)));
    }
    radical.insert(ProjIndex::from("d"), summands);
    radical
}

/// Measures one bounded knit of the Kronecker component out to roughly a
/// hundred layers, construction included.
fn bench_kronecker_100_layers(c: &mut Criterion) {
    c.bench_function("kronecker_knit_100_layers", |b| {
        b.iter(|| {
            let mut component = PreprojectiveComponent::new(
                black_box(kronecker_radical()),
                Positions::new(),
                Geometry::default(),
            )
            .unwrap();
            component.populate(black_box(5_000));
            assert!(!component.stuck());
            component
        });
    });
}

/// Measures knitting the twelve-module star component to completion.
fn bench_star_component(c: &mut Criterion) {
    c.bench_function("star_component_full_knit", |b| {
        b.iter(|| {
            let mut component = PreprojectiveComponent::new(
                black_box(star_radical()),
                Positions::new(),
                Geometry::default(),
            )
            .unwrap();
            component.populate(black_box(100_000));
            assert_eq!(component.quiver().vertex_count(), 12);
            component
        });
    });
}

/// Measures resumed growth: ten widening populate calls on one component,
/// each picking up where the previous horizon stopped.
fn bench_resumed_growth(c: &mut Criterion) {
    c.bench_function("kronecker_resume_10_steps", |b| {
        b.iter(|| {
            let mut component = PreprojectiveComponent::new(
                kronecker_radical(),
                Positions::new(),
                Geometry::default(),
            )
            .unwrap();
            for step in 1..=10 {
                component.populate(black_box(step * 500));
            }
            component
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_kronecker_100_layers, bench_star_component, bench_resumed_growth
);
criterion_main!(benches);

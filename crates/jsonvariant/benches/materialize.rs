//! Cost of `get::<String>()`: O(1) copy for string cells, full serialization for
//! everything else.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jsonvariant::{Arena, Variant};

fn build_array(arena: &Arena, len: usize) -> Variant<'_> {
    let root = arena.variant();
    let array = root.to_array();
    for i in 0..len {
        let item = array.add_object();
        item.insert("id", i);
        item.insert("label", "sample");
    }
    root
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");

    let arena = Arena::new();
    let text = arena.variant();
    text.set("already a string");
    group.bench_function("string_cell", |b| {
        b.iter(|| black_box(text).get::<String>());
    });

    for len in [1usize, 16, 256] {
        let arena = Arena::new();
        let root = build_array(&arena, len);
        group.bench_with_input(BenchmarkId::new("array_of_objects", len), &root, |b, root| {
            b.iter(|| black_box(*root).get::<String>());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);

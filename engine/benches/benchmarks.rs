//! Performance benchmarks for trellis-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis_engine::{filter, group, resolve_scope, Category, CategoryIndex, Product, TreeBuilder};

/// A balanced catalog: `width` roots, each with `width` children, each of
/// those with `width` grandchildren, until `total` is reached.
fn synthetic_categories(total: usize, width: usize) -> Vec<Category> {
    let mut categories = Vec::with_capacity(total);
    for i in 0..total {
        let parent = if i < width {
            None
        } else {
            Some(format!("cat{}", (i / width) - 1))
        };
        categories.push(
            Category::new(format!("cat{i}"), format!("Category {i}"), parent.as_deref())
                .with_order((i % 7) as i32),
        );
    }
    categories
}

fn synthetic_products(total: usize, categories: usize) -> Vec<Product> {
    (0..total)
        .map(|i| {
            Product::new(
                format!("p{i}"),
                format!("Product {i}"),
                format!("SKU-{i:06}"),
                Some(&format!("cat{}", i % categories)),
            )
        })
        .collect()
}

fn bench_index_and_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");

    for &size in &[1_000usize, 10_000] {
        let categories = synthetic_categories(size, 8);

        group.bench_with_input(BenchmarkId::new("index_build", size), &categories, |b, cats| {
            b.iter(|| CategoryIndex::build(black_box(cats)))
        });

        group.bench_with_input(BenchmarkId::new("tree_build", size), &categories, |b, cats| {
            b.iter(|| TreeBuilder::build(black_box(cats)))
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for &size in &[1_000usize, 10_000] {
        let categories = synthetic_categories(size, 8);
        let forest = TreeBuilder::build(&categories);

        group.bench_with_input(BenchmarkId::new("narrow_match", size), &forest, |b, f| {
            b.iter(|| filter(black_box(&f.roots), black_box("Category 42")))
        });

        group.bench_with_input(BenchmarkId::new("no_match", size), &forest, |b, f| {
            b.iter(|| filter(black_box(&f.roots), black_box("does-not-exist")))
        });
    }

    group.finish();
}

fn bench_scope_and_group(c: &mut Criterion) {
    let mut bench = c.benchmark_group("scope");

    for &size in &[1_000usize, 10_000] {
        let categories = synthetic_categories(size, 8);
        let index = CategoryIndex::build(&categories);

        bench.bench_with_input(BenchmarkId::new("resolve_root", size), &index, |b, idx| {
            b.iter(|| resolve_scope(black_box("cat0"), true, black_box(idx)))
        });

        let products = synthetic_products(size * 4, size);
        let scope: Vec<String> = resolve_scope("cat0", true, &index).into_iter().collect();
        bench.bench_with_input(
            BenchmarkId::new("group_products", size),
            &(products, scope),
            |b, (products, scope)| b.iter(|| group(black_box(products), black_box(scope))),
        );
    }

    bench.finish();
}

criterion_group!(benches, bench_index_and_tree, bench_filter, bench_scope_and_group);
criterion_main!(benches);

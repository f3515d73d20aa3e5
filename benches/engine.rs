use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifegrid::{LifeGrid, Pos2};

fn make_grid(width: usize, height: usize) -> LifeGrid {
    let alive = (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| Pos2::new(x, y)))
        .filter(|p| (p.x + p.y) % 3 == 0);
    LifeGrid::from_alive(width, height, alive)
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    for size in [64, 128, 256] {
        let grid = make_grid(size, size);

        group.bench_with_input(BenchmarkId::new("serial", size), &grid, |b, grid| {
            b.iter_batched(
                || grid.clone(),
                |grid| grid.next_generation(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &grid, |b, grid| {
            b.iter_batched(
                || grid.clone(),
                |grid| grid.next_generation_parallel(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_stamp_glider(c: &mut Criterion) {
    use lifegrid::{Configuration, Orientation};

    c.bench_function("stamp_glider", |b| {
        let mut grid = LifeGrid::blank(256, 256);
        b.iter(|| {
            grid.stamp_glider(Pos2::new(100, 100), Orientation::North, Some(Configuration::First))
        });
    });
}

criterion_group!(benches, bench_next_generation, bench_stamp_glider);
criterion_main!(benches);

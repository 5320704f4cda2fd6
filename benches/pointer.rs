//! Criterion benchmarks for the pointer hot path.
//!
//! Run with:
//!     cargo bench --bench pointer

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use chess_client::board::{BoardGeometry, BoardState, Cell, Pixel};
use chess_client::interaction::{DragController, PieceLayer};

fn sweep(geometry: &BoardGeometry, steps: usize) -> Vec<Pixel> {
    let extent = geometry.board_extent();
    (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Pixel::new(
                geometry.origin.x - 50.0 + t * (extent + 100.0),
                geometry.origin.y + extent * (1.0 - t),
            )
        })
        .collect()
}

fn bench_pixel_to_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel_to_cell");

    for cell_size in [48.0, 100.0] {
        let geometry = BoardGeometry::new(16.0, 120.0, cell_size);
        let points = sweep(&geometry, 256);
        group.bench_with_input(
            BenchmarkId::new("sweep_256", cell_size),
            &points,
            |b, points| {
                b.iter(|| {
                    points
                        .iter()
                        .filter(|p| geometry.pixel_to_cell(**p).is_on_board())
                        .count()
                });
            },
        );
    }

    group.finish();
}

fn bench_drag_gesture(c: &mut Criterion) {
    let geometry = BoardGeometry::default();
    let board = BoardState::standard();
    let points = sweep(&geometry, 64);
    let start = geometry.cell_center(Cell::new(1, 0));

    let mut group = c.benchmark_group("drag_gesture");

    group.bench_function("grab_move_64_release", |b| {
        let mut layer = PieceLayer::from_board(&board, &geometry);
        b.iter(|| {
            let mut drag = DragController::new();
            drag.on_grab(start, &geometry, &board, &mut layer).unwrap();
            for p in &points {
                drag.on_drag_move(*p, &geometry, &mut layer).unwrap();
            }
            drag.on_release(start).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pixel_to_cell, bench_drag_gesture);
criterion_main!(benches);

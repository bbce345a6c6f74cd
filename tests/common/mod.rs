#![allow(dead_code)]

use astar_grid::{distance, layout, Grid, PathfindingEngine, Position, RecordingSink, Result, SearchOutcome, TileKind};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Parse a layout, panicking on malformed test input
pub fn build(text: &str) -> (Grid, RecordingSink) {
    let mut sink = RecordingSink::new();
    let grid = layout::parse(text, &mut sink).expect("test layout should parse");
    (grid, sink)
}

/// Parse a layout and run one search on it
pub fn search(text: &str) -> (Grid, RecordingSink, Result<SearchOutcome>) {
    let (mut grid, mut sink) = build(text);
    let mut engine = PathfindingEngine::new();
    let outcome = engine.run(&mut grid, &mut sink);
    (grid, sink, outcome)
}

pub fn count_kind(grid: &Grid, kind: TileKind) -> usize {
    grid.tiles().filter(|(_, tile)| tile.kind() == kind).count()
}

pub fn kind_at(grid: &Grid, x: i32, y: i32) -> TileKind {
    grid.get(x, y).expect("in bounds").kind()
}

/// At most one start and one end tile, and the registry points at them
pub fn assert_nav_consistent(grid: &Grid) {
    let starts: Vec<_> = grid
        .tiles()
        .filter(|(_, t)| t.kind() == TileKind::NavStart)
        .map(|(id, _)| id)
        .collect();
    let ends: Vec<_> = grid
        .tiles()
        .filter(|(_, t)| t.kind() == TileKind::NavEnd)
        .map(|(id, _)| id)
        .collect();
    assert!(starts.len() <= 1, "more than one start: {:?}", starts);
    assert!(ends.len() <= 1, "more than one end: {:?}", ends);
    assert_eq!(grid.nav().start(), starts.first().copied());
    assert_eq!(grid.nav().end(), ends.first().copied());
}

/// Every step moves to a walkable Moore neighbor; returns the summed step cost
pub fn path_cost(grid: &Grid, path: &[Position]) -> i32 {
    let mut total = 0;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1 && a != b,
            "{} -> {} is not a single step",
            a,
            b
        );
        assert!(grid.get(b.x, b.y).unwrap().is_walkable(), "{} is a wall", b);
        total += distance(a, b);
    }
    total
}

/// Plain Dijkstra over the walkable tiles, for comparing costs
pub fn reference_cost(text: &str) -> Option<i32> {
    let (grid, _) = build(text);
    let (start, end) = grid.nav().endpoints()?;
    let mut best = vec![i32::MAX; grid.len()];
    let mut queue = BinaryHeap::new();
    best[start.0] = 0;
    queue.push(Reverse((0, start)));

    while let Some(Reverse((cost, id))) = queue.pop() {
        if id == end {
            return Some(cost);
        }
        if cost > best[id.0] {
            continue;
        }
        let pos = grid.tile(id).position();
        for next in grid.neighbors(id) {
            let tile = grid.tile(next);
            if !tile.is_walkable() {
                continue;
            }
            let next_cost = cost + distance(pos, tile.position());
            if next_cost < best[next.0] {
                best[next.0] = next_cost;
                queue.push(Reverse((next_cost, next)));
            }
        }
    }
    None
}

mod common;

use astar_grid::annotation::AnnotationEvent;
use astar_grid::{Grid, Position, RecordingSink, TileKind, TileStateMachine, VisualKind};
use common::{assert_nav_consistent, count_kind, kind_at};

#[test]
fn second_start_demotes_the_first() {
    let mut grid = Grid::new(6, 6);
    let mut sink = RecordingSink::new();
    let mut tiles = TileStateMachine::new(&mut grid, &mut sink);

    let a = tiles.set_type_at(1, 1, TileKind::NavStart).unwrap();
    let b = tiles.set_type_at(4, 2, TileKind::NavStart).unwrap();

    assert_eq!(tiles.grid().tile(a).kind(), TileKind::Floor);
    assert!(tiles.grid().tile(a).is_walkable());
    assert_eq!(tiles.grid().nav().start(), Some(b));
    assert_eq!(count_kind(tiles.grid(), TileKind::NavStart), 1);
    assert_nav_consistent(tiles.grid());

    let events = sink.take();
    assert_eq!(
        events,
        vec![
            AnnotationEvent::Annotate(Position::new(1, 1), VisualKind::NavStart),
            AnnotationEvent::Clear(Position::new(1, 1)),
            AnnotationEvent::Annotate(Position::new(4, 2), VisualKind::NavStart),
        ]
    );
}

#[test]
fn second_end_demotes_the_first() {
    let mut grid = Grid::new(6, 6);
    let mut sink = RecordingSink::new();
    let mut tiles = TileStateMachine::new(&mut grid, &mut sink);

    let start = tiles.set_type_at(0, 0, TileKind::NavStart).unwrap();
    let a = tiles.set_type_at(5, 5, TileKind::NavEnd).unwrap();
    let b = tiles.set_type_at(2, 3, TileKind::NavEnd).unwrap();

    assert_eq!(tiles.grid().tile(a).kind(), TileKind::Floor);
    assert_eq!(tiles.grid().nav().end(), Some(b));
    assert_eq!(tiles.grid().nav().start(), Some(start));
    assert_nav_consistent(tiles.grid());
}

#[test]
fn same_kind_is_a_no_op() {
    let mut grid = Grid::new(4, 4);
    let mut sink = RecordingSink::new();
    {
        let mut tiles = TileStateMachine::new(&mut grid, &mut sink);
        tiles.set_type_at(1, 1, TileKind::NavStart).unwrap();
        tiles.set_type_at(2, 2, TileKind::Wall).unwrap();
    }
    let before = sink.take();
    assert_eq!(before.len(), 2);
    let nav_before = grid.nav().clone();

    {
        let mut tiles = TileStateMachine::new(&mut grid, &mut sink);
        tiles.set_type_at(1, 1, TileKind::NavStart).unwrap();
        tiles.set_type_at(2, 2, TileKind::Wall).unwrap();
        tiles.set_type_at(3, 3, TileKind::Floor).unwrap();
    }

    assert!(sink.events().is_empty());
    assert_eq!(grid.nav(), &nav_before);
}

#[test]
fn wall_over_start_releases_the_slot() {
    let mut grid = Grid::new(4, 4);
    let mut sink = RecordingSink::new();
    let mut tiles = TileStateMachine::new(&mut grid, &mut sink);

    let id = tiles.set_type_at(2, 1, TileKind::NavStart).unwrap();
    tiles.set_type(id, TileKind::Wall);

    assert!(!tiles.grid().nav().has_start());
    assert!(!tiles.grid().tile(id).is_walkable());
    assert_nav_consistent(tiles.grid());
}

#[test]
fn start_over_wall_is_walkable() {
    let mut grid = Grid::new(4, 4);
    let mut sink = RecordingSink::new();
    let mut tiles = TileStateMachine::new(&mut grid, &mut sink);

    let id = tiles.set_type_at(3, 0, TileKind::Wall).unwrap();
    tiles.set_end(id);

    assert!(tiles.grid().tile(id).is_walkable());
    assert_eq!(tiles.grid().nav().end(), Some(id));
}

#[test]
fn out_of_bounds_paint_is_reported() {
    let mut grid = Grid::new(4, 4);
    let mut sink = RecordingSink::new();
    let mut tiles = TileStateMachine::new(&mut grid, &mut sink);

    assert!(tiles.set_type_at(4, 0, TileKind::Wall).is_err());
    assert!(tiles.set_type_at(-1, 2, TileKind::NavStart).is_err());
    assert!(!tiles.grid().nav().has_start());
    assert!(sink.events().is_empty());
}

#[test]
fn registry_stays_consistent_through_a_painting_session() {
    let mut grid = Grid::new(5, 5);
    let mut sink = RecordingSink::new();
    let strokes = [
        (0, 0, TileKind::NavStart),
        (4, 4, TileKind::NavEnd),
        (0, 0, TileKind::NavEnd),
        (2, 2, TileKind::NavStart),
        (2, 2, TileKind::Wall),
        (4, 4, TileKind::NavStart),
        (1, 3, TileKind::NavEnd),
        (1, 3, TileKind::Floor),
        (3, 1, TileKind::NavEnd),
        (3, 1, TileKind::NavStart),
    ];

    for (x, y, kind) in strokes {
        let mut tiles = TileStateMachine::new(&mut grid, &mut sink);
        tiles.set_type_at(x, y, kind).unwrap();
        assert_nav_consistent(&grid);
    }

    assert_eq!(kind_at(&grid, 3, 1), TileKind::NavStart);
    assert_eq!(kind_at(&grid, 4, 4), TileKind::Floor);
    assert_eq!(kind_at(&grid, 2, 2), TileKind::Wall);
    assert!(!grid.nav().has_end());

    // The annotation layer agrees with the tile kinds
    let layer = sink.to_layer();
    for (_, tile) in grid.tiles() {
        assert_eq!(layer.get(tile.position()), VisualKind::for_kind(tile.kind()));
    }
}

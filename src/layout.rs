//! Text form of a grid
//!
//! Symbols:
//! - `.` floor
//! - `#` wall
//! - `S` start, `E` end
//! - `*` path, `o` open set, `x` closed set

use thiserror::Error;

use crate::annotation::AnnotationSink;
use crate::grid::{Grid, TileKind};
use crate::tile_state::TileStateMachine;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },
}

pub fn symbol(kind: TileKind) -> char {
    match kind {
        TileKind::Floor => '.',
        TileKind::Wall => '#',
        TileKind::NavStart => 'S',
        TileKind::NavEnd => 'E',
        TileKind::NavPath => '*',
        TileKind::OpenSet => 'o',
        TileKind::ClosedSet => 'x',
    }
}

/// One line per row, top row first
pub fn render(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.len() + grid.rows() as usize);
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            if let Ok(tile) = grid.get(x, y) {
                result.push(symbol(tile.kind()));
            }
        }
        result.push('\n');
    }
    result
}

/// Build a grid from `.`, `#`, `S` and `E`. Blank lines are ignored.
pub fn parse(text: &str, sink: &mut dyn AnnotationSink) -> Result<Grid, LayoutError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let cols = match lines.first() {
        Some(first) => first.chars().count(),
        None => return Err(LayoutError::Empty),
    };

    let mut grid = Grid::new(cols as i32, lines.len() as i32);
    let mut tiles = TileStateMachine::new(&mut grid, sink);

    for (y, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(LayoutError::RaggedRow { row: y, expected: cols, found });
        }

        for (x, ch) in line.chars().enumerate() {
            let kind = match ch {
                '.' => continue,
                '#' => TileKind::Wall,
                'S' => TileKind::NavStart,
                'E' => TileKind::NavEnd,
                _ => return Err(LayoutError::UnknownSymbol { symbol: ch, x, y }),
            };
            // In bounds by construction
            if let Ok(id) = tiles.grid().id_of(x as i32, y as i32) {
                tiles.set_type(id, kind);
            }
        }
    }

    Ok(grid)
}

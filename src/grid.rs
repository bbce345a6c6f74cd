use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::navigation::NavigationRegistry;

/// Cost value of a tile that is not part of an active search
pub const UNSET_COST: i32 = -1;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Index of a tile in its grid's storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// What a tile currently is. Exactly one kind at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    NavStart,
    NavEnd,
    NavPath,
    OpenSet,
    ClosedSet,
}

impl TileKind {
    pub fn name(&self) -> &'static str {
        match self {
            TileKind::Floor => "FLOOR",
            TileKind::Wall => "WALL",
            TileKind::NavStart => "NAV_START",
            TileKind::NavEnd => "NAV_END",
            TileKind::NavPath => "NAV_PATH",
            TileKind::OpenSet => "OPEN_SET",
            TileKind::ClosedSet => "CLOSED_SET",
        }
    }
}

/// One grid cell with its search bookkeeping
#[derive(Debug, Clone)]
pub struct Tile {
    position: Position,
    pub(crate) kind: TileKind,
    pub(crate) walkable: bool,
    pub(crate) g_cost: i32,
    pub(crate) h_cost: i32,
    pub(crate) parent: Option<TileId>,
}

impl Tile {
    fn floor(position: Position) -> Self {
        Tile {
            position,
            kind: TileKind::Floor,
            walkable: true,
            g_cost: UNSET_COST,
            h_cost: UNSET_COST,
            parent: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Distance from the start tile along the best known path
    pub fn g_cost(&self) -> i32 {
        self.g_cost
    }

    /// Estimated distance to the destination tile
    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }

    /// Tile preceding this one on the best known path
    pub fn parent(&self) -> Option<TileId> {
        self.parent
    }

    pub(crate) fn clear_search_state(&mut self) {
        self.g_cost = UNSET_COST;
        self.h_cost = UNSET_COST;
        self.parent = None;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at: {}", self.kind.name(), self.position)?;
        if self.g_cost != UNSET_COST {
            write!(f, " g={} h={} f={}", self.g_cost, self.h_cost, self.f_cost())?;
        }
        Ok(())
    }
}

/// Fixed-size grid of tiles, stored row-major (id = x + y * cols)
#[derive(Debug, Clone)]
pub struct Grid {
    cols: i32,
    rows: i32,
    tiles: Vec<Tile>,
    nav: NavigationRegistry,
}

impl Grid {
    /// Create a new grid with all tiles set to walkable floor
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let mut tiles = Vec::with_capacity(cols as usize * rows as usize);
        for y in 0..rows {
            for x in 0..cols {
                tiles.push(Tile::floor(Position::new(x, y)));
            }
        }

        Grid {
            cols,
            rows,
            tiles,
            nav: NavigationRegistry::default(),
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// Convert (x, y) coordinates to a tile id
    pub fn id_of(&self, x: i32, y: i32) -> Result<TileId> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(self.index(x, y))
    }

    fn index(&self, x: i32, y: i32) -> TileId {
        TileId(x as usize + y as usize * self.cols as usize)
    }

    /// Bounds-checked lookup
    pub fn get(&self, x: i32, y: i32) -> Result<&Tile> {
        let id = self.id_of(x, y)?;
        Ok(&self.tiles[id.0])
    }

    /// Panics if `id` did not come from this grid.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.0]
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    /// Moore neighborhood of a tile, clipped to the grid.
    /// Iterates dx in -1..=1, then dy in -1..=1.
    pub fn neighbors(&self, id: TileId) -> Vec<TileId> {
        let pos = self.tile(id).position;
        let mut neighbors = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (x, y) = (pos.x + dx, pos.y + dy);
                if self.contains(x, y) {
                    neighbors.push(self.index(x, y));
                }
            }
        }
        neighbors
    }

    pub fn nav(&self) -> &NavigationRegistry {
        &self.nav
    }

    pub(crate) fn nav_mut(&mut self) -> &mut NavigationRegistry {
        &mut self.nav
    }

    /// Drop every tile's costs and parent link
    pub(crate) fn clear_search_state(&mut self) {
        for tile in &mut self.tiles {
            tile.clear_search_state();
        }
    }
}

/// Return the grid to all walkable floor with no navigation points and no
/// search state. The tile storage is reused.
pub fn reset(mut grid: Grid) -> Grid {
    for tile in &mut grid.tiles {
        tile.kind = TileKind::Floor;
        tile.walkable = true;
        tile.clear_search_state();
    }
    grid.nav.clear();
    grid
}

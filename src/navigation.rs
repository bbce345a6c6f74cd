use crate::grid::TileId;

/// Holds the at-most-one start tile and at-most-one end tile of a grid.
///
/// The registry is owned by its [`Grid`](crate::grid::Grid) and only handed out
/// mutably to [`TileStateMachine`](crate::tile_state::TileStateMachine) and
/// [`grid::reset`](crate::grid::reset). `set_start`/`set_end` here only move a
/// slot; demoting the previous holder to floor is done by
/// [`TileStateMachine::set_start`](crate::tile_state::TileStateMachine::set_start).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationRegistry {
    start: Option<TileId>,
    end: Option<TileId>,
}

impl NavigationRegistry {
    pub fn start(&self) -> Option<TileId> {
        self.start
    }

    pub fn end(&self) -> Option<TileId> {
        self.end
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    /// Both navigation points, if both are set
    pub fn endpoints(&self) -> Option<(TileId, TileId)> {
        Some((self.start?, self.end?))
    }

    /// Point the start slot at `tile`. Returns the tile that held it before, if
    /// it was a different one.
    pub fn set_start(&mut self, tile: TileId) -> Option<TileId> {
        self.start.replace(tile).filter(|&previous| previous != tile)
    }

    pub fn set_end(&mut self, tile: TileId) -> Option<TileId> {
        self.end.replace(tile).filter(|&previous| previous != tile)
    }

    pub(crate) fn release_start(&mut self) {
        self.start = None;
    }

    pub(crate) fn release_end(&mut self) {
        self.end = None;
    }

    /// Drop both slots. Tile kinds are left alone.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}

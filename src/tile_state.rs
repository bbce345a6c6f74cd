use crate::annotation::{AnnotationSink, VisualKind};
use crate::error::Result;
use crate::grid::{Grid, TileId, TileKind};

/// Applies tile kind transitions and their side effects: walkability, the
/// navigation registry, and annotation requests.
pub struct TileStateMachine<'a> {
    grid: &'a mut Grid,
    sink: &'a mut dyn AnnotationSink,
}

impl<'a> TileStateMachine<'a> {
    pub fn new(grid: &'a mut Grid, sink: &'a mut dyn AnnotationSink) -> Self {
        TileStateMachine { grid, sink }
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Change a tile's kind. Setting a tile to the kind it already has does nothing.
    pub fn set_type(&mut self, id: TileId, new_kind: TileKind) {
        let tile = self.grid.tile(id);
        let old_kind = tile.kind();
        let pos = tile.position();
        if old_kind == new_kind {
            return;
        }

        // Release the slot first so the tile never holds both start and end
        match old_kind {
            TileKind::NavStart => self.grid.nav_mut().release_start(),
            TileKind::NavEnd => self.grid.nav_mut().release_end(),
            _ => {}
        }

        if VisualKind::for_kind(old_kind).is_some() {
            self.sink.clear_annotation(pos);
        }

        match new_kind {
            TileKind::Wall => self.grid.tile_mut(id).walkable = false,
            TileKind::Floor => self.grid.tile_mut(id).walkable = true,
            TileKind::NavStart => {
                if let Some(previous) = self.grid.nav().start() {
                    log::debug!("Demoting previous start {}", self.grid.tile(previous).position());
                    self.set_type(previous, TileKind::Floor);
                }
                self.grid.nav_mut().set_start(id);
                self.grid.tile_mut(id).walkable = true;
            }
            TileKind::NavEnd => {
                if let Some(previous) = self.grid.nav().end() {
                    log::debug!("Demoting previous end {}", self.grid.tile(previous).position());
                    self.set_type(previous, TileKind::Floor);
                }
                self.grid.nav_mut().set_end(id);
                self.grid.tile_mut(id).walkable = true;
            }
            TileKind::NavPath | TileKind::OpenSet | TileKind::ClosedSet => {}
        }

        if let Some(visual) = VisualKind::for_kind(new_kind) {
            self.sink.annotate(pos, visual);
        }

        self.grid.tile_mut(id).kind = new_kind;
        log::debug!("{} {} -> {}", pos, old_kind.name(), new_kind.name());
    }

    /// Bounds-checked [`set_type`](Self::set_type) by coordinates
    pub fn set_type_at(&mut self, x: i32, y: i32, new_kind: TileKind) -> Result<TileId> {
        let id = self.grid.id_of(x, y)?;
        self.set_type(id, new_kind);
        Ok(id)
    }

    /// Make `id` the start tile, demoting any previous start to floor
    pub fn set_start(&mut self, id: TileId) {
        self.set_type(id, TileKind::NavStart);
    }

    /// Make `id` the end tile, demoting any previous end to floor
    pub fn set_end(&mut self, id: TileId) {
        self.set_type(id, TileKind::NavEnd);
    }
}

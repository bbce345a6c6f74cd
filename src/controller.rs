//! Input intents and the mode rules around them
//!
//! The window translates mouse and keyboard state into [`Intent`]s; the
//! [`Controller`] applies them to the grid and the search engine. Grid edits
//! are only accepted while the engine is idle.

use serde::{Deserialize, Serialize};

use crate::action_log::ActionLog;
use crate::annotation::AnnotationSink;
use crate::error::{GridError, Result};
use crate::grid::{self, Grid, TileKind};
use crate::pathfinding::{PathfindingEngine, SearchOutcome, SearchState};
use crate::tile_state::TileStateMachine;

/// Kinds a user may paint directly. Navigation points go through
/// [`Intent::PlaceNavPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    Floor,
    Wall,
}

impl Brush {
    pub fn kind(self) -> TileKind {
        match self {
            Brush::Floor => TileKind::Floor,
            Brush::Wall => TileKind::Wall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Paint a tile with a brush
    Paint { x: i32, y: i32, brush: Brush },
    /// Place start or end, alternating which one gets replaced
    PlaceNavPoint { x: i32, y: i32 },
    /// Describe a tile
    Examine { x: i32, y: i32 },
    /// Search when idle, reset when a search has finished
    SearchOrReset,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Painted(TileKind),
    /// Tile already had the requested kind
    Unchanged,
    Examined(String),
    Searched(SearchOutcome),
    Reset,
}

pub struct Controller<S: AnnotationSink> {
    grid: Grid,
    engine: PathfindingEngine,
    sink: S,
    /// With both points placed, the next nav click replaces the start
    replace_start_next: bool,
    action_log: ActionLog,
}

impl<S: AnnotationSink> Controller<S> {
    pub fn new(cols: i32, rows: i32, sink: S) -> Self {
        Controller {
            grid: Grid::new(cols, rows),
            engine: PathfindingEngine::new(),
            sink,
            replace_start_next: false,
            action_log: ActionLog::new(cols, rows),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn search_state(&self) -> SearchState {
        self.engine.state()
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.action_log
    }

    /// Painting is disabled from the start of a search until reset
    pub fn can_modify_grid(&self) -> bool {
        self.engine.is_idle()
    }

    /// Apply an intent, recording it in the action log if it changed anything
    pub fn apply(&mut self, intent: Intent) -> Result<Response> {
        let result = match intent {
            Intent::Paint { x, y, brush } => self.paint(x, y, brush.kind()),
            Intent::PlaceNavPoint { x, y } => self.place_nav_point(x, y),
            Intent::Examine { x, y } => self.examine(x, y),
            Intent::SearchOrReset => self.search_or_reset(),
            Intent::Reset => Ok(self.reset()),
        };

        match &result {
            Ok(Response::Unchanged) => {}
            Ok(_) => self.action_log.log(intent),
            Err(e) => log::warn!("Ignoring {:?}: {}", intent, e),
        }
        result
    }

    fn paint(&mut self, x: i32, y: i32, kind: TileKind) -> Result<Response> {
        if !self.can_modify_grid() {
            return Err(GridError::GridLocked);
        }
        let id = self.grid.id_of(x, y)?;
        if self.grid.tile(id).kind() == kind {
            return Ok(Response::Unchanged);
        }
        TileStateMachine::new(&mut self.grid, &mut self.sink).set_type(id, kind);
        Ok(Response::Painted(kind))
    }

    fn place_nav_point(&mut self, x: i32, y: i32) -> Result<Response> {
        let nav = self.grid.nav();
        let kind = if !nav.has_start() || (nav.has_end() && self.replace_start_next) {
            TileKind::NavStart
        } else {
            TileKind::NavEnd
        };

        let response = self.paint(x, y, kind)?;
        self.replace_start_next = kind == TileKind::NavEnd;
        Ok(response)
    }

    fn examine(&self, x: i32, y: i32) -> Result<Response> {
        let description = self.grid.get(x, y)?.to_string();
        log::info!("{}", description);
        Ok(Response::Examined(description))
    }

    fn search_or_reset(&mut self) -> Result<Response> {
        if self.engine.is_idle() {
            let outcome = self.engine.run(&mut self.grid, &mut self.sink)?;
            Ok(Response::Searched(outcome))
        } else {
            Ok(self.reset())
        }
    }

    /// Rebuild an all-floor grid of the same size and return to idle
    pub fn reset(&mut self) -> Response {
        let previous = std::mem::replace(&mut self.grid, Grid::new(0, 0));
        self.grid = grid::reset(previous);
        self.engine.reset();
        self.sink.clear_all();
        self.replace_start_next = false;
        log::info!("Grid reset ({}x{})", self.grid.cols(), self.grid.rows());
        Response::Reset
    }
}

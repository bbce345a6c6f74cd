use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationSink;
use crate::error::{GridError, Result};
use crate::grid::{Grid, Position, TileId, TileKind};
use crate::tile_state::TileStateMachine;

/// Cost of a horizontal or vertical step
pub const ORTHOGONAL_COST: i32 = 10;
/// Cost of a diagonal step (10 * sqrt(2), rounded)
pub const DIAGONAL_COST: i32 = 14;

/// Grid-step distance allowing diagonal moves
pub fn distance(a: Position, b: Position) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + ORTHOGONAL_COST * (hi - lo)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Terminal result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found {
        /// Start to end, both included
        path: Vec<Position>,
        /// g cost recorded at the end tile
        cost: i32,
        /// Number of tiles moved to the closed set
        explored: usize,
    },
    NoPath {
        explored: usize,
    },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Frontier entry. Entries go stale when their tile's g cost improves or the
/// tile is closed; stale entries are skipped when popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: i32,
    h: i32,
    g: i32,
    id: TileId,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            // Tie-breaker: lowest tile id for deterministic ordering
            .then_with(|| other.id.cmp(&self.id))
            .then_with(|| other.g.cmp(&self.g))
    }
}

/// What the search loop leaves behind for annotation
struct SearchTrace {
    found: bool,
    closed: Vec<TileId>,
    open: Vec<TileId>,
}

/// Runs one search per reset: Idle -> Running -> Succeeded | Failed -> (reset) -> Idle
#[derive(Debug)]
pub struct PathfindingEngine {
    state: SearchState,
}

impl Default for PathfindingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PathfindingEngine {
    pub fn new() -> Self {
        PathfindingEngine {
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SearchState::Idle
    }

    /// Back to idle. The caller rebuilds the grid alongside.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
    }

    /// Search from the registry's start tile to its end tile, then annotate
    /// the explored region and mark the path.
    pub fn run(&mut self, grid: &mut Grid, sink: &mut dyn AnnotationSink) -> Result<SearchOutcome> {
        if self.state != SearchState::Idle {
            return Err(GridError::SearchNotIdle(self.state));
        }
        let nav = grid.nav();
        let (start, end) = nav.endpoints().ok_or(GridError::MissingNavigationPoints {
            has_start: nav.has_start(),
            has_end: nav.has_end(),
        })?;

        self.state = SearchState::Running;
        log::info!(
            "Pathfinding from {} to {}",
            grid.tile(start).position(),
            grid.tile(end).position()
        );

        grid.clear_search_state();
        let trace = search(grid, start, end);

        let mut tiles = TileStateMachine::new(grid, sink);
        show_sets(&mut tiles, &trace, start, end);

        let outcome = if trace.found {
            let path = retrace_path(&mut tiles, start, end);
            let cost = tiles.grid().tile(end).g_cost();
            log::info!(
                "Found path of {} tiles, cost {}, {} tiles explored",
                path.len(),
                cost,
                trace.closed.len()
            );
            self.state = SearchState::Succeeded;
            SearchOutcome::Found {
                path,
                cost,
                explored: trace.closed.len(),
            }
        } else {
            log::info!("No valid path exists ({} tiles explored)", trace.closed.len());
            self.state = SearchState::Failed;
            SearchOutcome::NoPath {
                explored: trace.closed.len(),
            }
        };

        Ok(outcome)
    }
}

fn search(grid: &mut Grid, start: TileId, end: TileId) -> SearchTrace {
    let end_pos = grid.tile(end).position();
    let mut in_open = vec![false; grid.len()];
    let mut in_closed = vec![false; grid.len()];
    let mut closed = Vec::new();
    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();

    {
        let tile = grid.tile_mut(start);
        tile.g_cost = 0;
        tile.h_cost = distance(tile.position(), end_pos);
        open.push(OpenEntry {
            f: tile.f_cost(),
            h: tile.h_cost,
            g: 0,
            id: start,
        });
    }
    in_open[start.0] = true;

    let mut found = false;
    while let Some(entry) = open.pop() {
        let current = entry.id;
        if in_closed[current.0] || entry.g != grid.tile(current).g_cost() {
            continue;
        }

        in_open[current.0] = false;
        in_closed[current.0] = true;
        closed.push(current);

        let current_tile = grid.tile(current);
        let current_pos = current_tile.position();
        let current_g = current_tile.g_cost();
        log::trace!(
            "Expanding {} f={} h={}",
            current_pos,
            current_tile.f_cost(),
            current_tile.h_cost()
        );

        if current == end {
            found = true;
            break;
        }

        for neighbor in grid.neighbors(current) {
            if in_closed[neighbor.0] || !grid.tile(neighbor).is_walkable() {
                continue;
            }

            let tile = grid.tile_mut(neighbor);
            let new_move_cost = current_g + distance(current_pos, tile.position());

            // Update cost and parent if unseen or a better path has been found
            if !in_open[neighbor.0] || new_move_cost < tile.g_cost {
                tile.g_cost = new_move_cost;
                tile.h_cost = distance(tile.position(), end_pos);
                tile.parent = Some(current);
                in_open[neighbor.0] = true;
                open.push(OpenEntry {
                    f: tile.f_cost(),
                    h: tile.h_cost,
                    g: new_move_cost,
                    id: neighbor,
                });
            }
        }
    }

    let open = in_open
        .iter()
        .enumerate()
        .filter(|&(_, &is_open)| is_open)
        .map(|(i, _)| TileId(i))
        .collect();

    SearchTrace { found, closed, open }
}

/// Mark the explored region. Start and end keep their kinds.
fn show_sets(tiles: &mut TileStateMachine<'_>, trace: &SearchTrace, start: TileId, end: TileId) {
    for &id in &trace.closed {
        if id != start && id != end {
            tiles.set_type(id, TileKind::ClosedSet);
        }
    }
    for &id in &trace.open {
        if id != start && id != end {
            tiles.set_type(id, TileKind::OpenSet);
        }
    }
}

/// Follow parent links back from the end and mark the tiles in between
fn retrace_path(tiles: &mut TileStateMachine<'_>, start: TileId, end: TileId) -> Vec<Position> {
    let mut reversed = Vec::new();
    let mut current = end;
    while current != start {
        reversed.push(current);
        match tiles.grid().tile(current).parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    reversed.push(start);
    reversed.reverse();

    for &id in &reversed {
        if id != start && id != end {
            tiles.set_type(id, TileKind::NavPath);
        }
    }

    reversed
        .into_iter()
        .map(|id| tiles.grid().tile(id).position())
        .collect()
}

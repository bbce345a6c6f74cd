pub mod action_log;
pub mod annotation;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod layout;
pub mod navigation;
pub mod pathfinding;
pub mod tile_state;

pub use annotation::{AnnotationLayer, AnnotationSink, RecordingSink, VisualKind};
pub use controller::{Brush, Controller, Intent, Response};
pub use error::{GridError, Result};
pub use grid::{Grid, Position, Tile, TileId, TileKind};
pub use navigation::NavigationRegistry;
pub use pathfinding::{distance, PathfindingEngine, SearchOutcome, SearchState};
pub use tile_state::TileStateMachine;

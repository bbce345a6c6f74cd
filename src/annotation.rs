//! Visual annotations requested by the tile state machine
//!
//! The core never draws. Every kind transition is reported to an
//! [`AnnotationSink`] as a typed request keyed by tile position; the window
//! keeps an [`AnnotationLayer`] and paints one colored square per entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{Position, TileKind};

/// Tile kinds that have something to show. Floor is the bare background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Wall,
    NavStart,
    NavEnd,
    NavPath,
    OpenSet,
    ClosedSet,
}

impl VisualKind {
    pub fn for_kind(kind: TileKind) -> Option<VisualKind> {
        match kind {
            TileKind::Floor => None,
            TileKind::Wall => Some(VisualKind::Wall),
            TileKind::NavStart => Some(VisualKind::NavStart),
            TileKind::NavEnd => Some(VisualKind::NavEnd),
            TileKind::NavPath => Some(VisualKind::NavPath),
            TileKind::OpenSet => Some(VisualKind::OpenSet),
            TileKind::ClosedSet => Some(VisualKind::ClosedSet),
        }
    }
}

/// Receiver of annotation requests
pub trait AnnotationSink {
    fn annotate(&mut self, tile: Position, kind: VisualKind);

    fn clear_annotation(&mut self, tile: Position);

    /// Called when the whole grid is rebuilt
    fn clear_all(&mut self);
}

/// Current annotation per tile, as the renderer sees it
#[derive(Debug, Default, Clone)]
pub struct AnnotationLayer {
    visuals: HashMap<Position, VisualKind>,
}

impl AnnotationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tile: Position) -> Option<VisualKind> {
        self.visuals.get(&tile).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, VisualKind)> + '_ {
        self.visuals.iter().map(|(&pos, &kind)| (pos, kind))
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Number of tiles showing `kind`
    pub fn count(&self, kind: VisualKind) -> usize {
        self.visuals.values().filter(|&&k| k == kind).count()
    }
}

impl AnnotationSink for AnnotationLayer {
    fn annotate(&mut self, tile: Position, kind: VisualKind) {
        self.visuals.insert(tile, kind);
    }

    fn clear_annotation(&mut self, tile: Position) {
        self.visuals.remove(&tile);
    }

    fn clear_all(&mut self) {
        self.visuals.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationEvent {
    Annotate(Position, VisualKind),
    Clear(Position),
    ClearAll,
}

/// Keeps every request in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<AnnotationEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AnnotationEvent] {
        &self.events
    }

    /// Drop recorded events, returning them
    pub fn take(&mut self) -> Vec<AnnotationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replay the recorded requests into a layer
    pub fn to_layer(&self) -> AnnotationLayer {
        let mut layer = AnnotationLayer::new();
        for event in &self.events {
            match *event {
                AnnotationEvent::Annotate(pos, kind) => layer.annotate(pos, kind),
                AnnotationEvent::Clear(pos) => layer.clear_annotation(pos),
                AnnotationEvent::ClearAll => layer.clear_all(),
            }
        }
        layer
    }
}

impl AnnotationSink for RecordingSink {
    fn annotate(&mut self, tile: Position, kind: VisualKind) {
        self.events.push(AnnotationEvent::Annotate(tile, kind));
    }

    fn clear_annotation(&mut self, tile: Position) {
        self.events.push(AnnotationEvent::Clear(tile));
    }

    fn clear_all(&mut self) {
        self.events.push(AnnotationEvent::ClearAll);
    }
}

//! Event types and sinks for observing grid builds.
//!
//! This module defines [`GridEvent`] and a set of sinks to emit, collect, or forward
//! events while a [`crate::builder::GridBuilder`] runs.
use crate::builder::GridConfig;
use crate::site::{GridStats, SiteGrid};

/// Discriminant of a [`GridEvent`], used for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    BuildStarted,
    RasterBuilt,
    CellEvaluated,
    BuildFinished,
    Warning,
}

/// Describes events emitted during a grid build.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// Emitted before the raster is constructed.
    BuildStarted {
        /// Configuration of the build.
        config: GridConfig,
        /// Threshold after clamping.
        effective_threshold: f64,
        /// Name of the equal-area projection in use.
        projection: String,
    },

    /// Emitted once the raster covering the region is known.
    RasterBuilt {
        columns: usize,
        rows: usize,
        cell_count: usize,
    },

    /// Emitted for every cell, in ascending index order, after all ratios are known.
    CellEvaluated {
        /// Stable cell index.
        index: usize,
        /// Overlap ratio of the cell.
        ratio: f64,
        /// Whether the cell meets the threshold.
        retained: bool,
    },

    /// Emitted after a successful build.
    BuildFinished {
        /// Summary of the build.
        stats: GridStats,
        /// The produced grid.
        grid: SiteGrid,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. stage name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl GridEvent {
    pub fn kind(&self) -> GridEventKind {
        match self {
            GridEvent::BuildStarted { .. } => GridEventKind::BuildStarted,
            GridEvent::RasterBuilt { .. } => GridEventKind::RasterBuilt,
            GridEvent::CellEvaluated { .. } => GridEventKind::CellEvaluated,
            GridEvent::BuildFinished { .. } => GridEventKind::BuildFinished,
            GridEvent::Warning { .. } => GridEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GridEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GridEvent);

    /// Whether events of `kind` should be constructed and sent at all.
    fn wants(&self, _kind: GridEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GridEvent) {}

    #[inline]
    fn wants(&self, _kind: GridEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GridEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GridEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GridEvent),
{
    #[inline]
    fn send(&mut self, event: GridEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GridEvent>,
    only: Option<Vec<GridEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only events of the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = GridEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GridEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GridEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GridEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GridEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: GridEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

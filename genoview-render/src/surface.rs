//! The drawing port and the in-memory figure bookkeeping shared by surfaces.

use std::collections::BTreeMap;

use crate::trace::{PlotLayout, Trace};
use crate::{RenderError, RenderResult};

/// A charting backend addressed by target identifiers.
///
/// `initialize_plot` (re)creates a target; `append_trace_and_redraw` extends
/// an existing one and must fail with [`RenderError::UnknownTarget`] if the
/// target was never initialized.
pub trait PlotSurface {
    fn initialize_plot(&mut self, target: &str, trace: Trace, layout: PlotLayout) -> RenderResult<()>;

    fn append_trace_and_redraw(&mut self, target: &str, trace: Trace) -> RenderResult<()>;
}

/// Everything drawn into one target
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub layout: PlotLayout,
    pub traces: Vec<Trace>,
    pub redraws: usize,
}

/// Targets by id, kept in a sorted map so output order is stable
#[derive(Debug, Clone, Default)]
pub struct FigureStore {
    figures: BTreeMap<String, Figure>,
}

impl FigureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &str) -> Option<&Figure> {
        self.figures.get(target)
    }

    pub fn figure(&self, target: &str) -> RenderResult<&Figure> {
        self.get(target).ok_or_else(|| RenderError::UnknownTarget(target.to_string()))
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.figures.keys().map(String::as_str)
    }
}

impl PlotSurface for FigureStore {
    fn initialize_plot(&mut self, target: &str, trace: Trace, layout: PlotLayout) -> RenderResult<()> {
        if self.figures.contains_key(target) {
            log::debug!("Re-initializing plot target '{}'", target);
        }
        self.figures.insert(
            target.to_string(),
            Figure { layout, traces: vec![trace], redraws: 0 },
        );
        Ok(())
    }

    fn append_trace_and_redraw(&mut self, target: &str, trace: Trace) -> RenderResult<()> {
        let figure = self
            .figures
            .get_mut(target)
            .ok_or_else(|| RenderError::UnknownTarget(target.to_string()))?;
        figure.traces.push(trace);
        figure.redraws += 1;
        Ok(())
    }
}

/// One call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Initialize { target: String, trace: Trace, layout: PlotLayout },
    Append { target: String, trace: Trace },
}

/// Test double that records every call in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    store: FigureStore,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure(&self, target: &str) -> Option<&Figure> {
        self.store.get(target)
    }

    /// Traces appended after initialization, in order
    pub fn appended(&self) -> impl Iterator<Item = &Trace> {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::Append { trace, .. } => Some(trace),
            SurfaceCall::Initialize { .. } => None,
        })
    }
}

impl PlotSurface for RecordingSurface {
    fn initialize_plot(&mut self, target: &str, trace: Trace, layout: PlotLayout) -> RenderResult<()> {
        self.store.initialize_plot(target, trace.clone(), layout.clone())?;
        self.calls.push(SurfaceCall::Initialize { target: target.to_string(), trace, layout });
        Ok(())
    }

    fn append_trace_and_redraw(&mut self, target: &str, trace: Trace) -> RenderResult<()> {
        self.store.append_trace_and_redraw(target, trace.clone())?;
        self.calls.push(SurfaceCall::Append { target: target.to_string(), trace });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Stroke;

    #[test]
    fn test_append_before_initialize_fails() {
        let mut store = FigureStore::new();
        let err = store
            .append_trace_and_redraw("missing", Trace::Empty)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownTarget(ref t) if t == "missing"));
    }

    #[test]
    fn test_store_counts_redraws() {
        let mut store = FigureStore::new();
        store.initialize_plot("a", Trace::Empty, PlotLayout::default()).unwrap();
        store
            .append_trace_and_redraw("a", Trace::line(0.0, 0.0, 1.0, 1.0, Stroke::default()))
            .unwrap();
        store.append_trace_and_redraw("a", Trace::Empty).unwrap();

        let figure = store.figure("a").unwrap();
        assert_eq!(figure.traces.len(), 3);
        assert_eq!(figure.redraws, 2);
        assert_eq!(store.targets().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_reinitialize_replaces_figure() {
        let mut store = FigureStore::new();
        store.initialize_plot("a", Trace::Empty, PlotLayout::default()).unwrap();
        store.append_trace_and_redraw("a", Trace::Empty).unwrap();
        store.initialize_plot("a", Trace::Empty, PlotLayout::default()).unwrap();
        assert_eq!(store.figure("a").unwrap().traces.len(), 1);
    }

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new();
        surface.initialize_plot("t", Trace::Empty, PlotLayout::default()).unwrap();
        surface.append_trace_and_redraw("t", Trace::rect(0.0, 0.0, 1.0, 1.0, "#f00")).unwrap();
        assert_eq!(surface.calls.len(), 2);
        assert!(matches!(surface.calls[0], SurfaceCall::Initialize { .. }));
        assert_eq!(surface.appended().count(), 1);
        // Failed calls are not recorded
        assert!(surface.append_trace_and_redraw("other", Trace::Empty).is_err());
        assert_eq!(surface.calls.len(), 2);
    }
}

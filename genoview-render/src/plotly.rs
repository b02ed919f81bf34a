//! Plotly figure export: each target becomes a `{data, layout}` JSON object
//! that can be handed straight to `Plotly.newPlot`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::surface::{Figure, FigureStore, PlotSurface};
use crate::trace::{PlotLayout, Shape, Trace};
use crate::RenderResult;

#[derive(Debug, Default)]
pub struct PlotlyFigureSurface {
    store: FigureStore,
}

impl PlotlyFigureSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &FigureStore {
        &self.store
    }

    pub fn to_json(&self, target: &str) -> RenderResult<Value> {
        Ok(figure_json(self.store.figure(target)?))
    }

    /// Write `target` as pretty-printed JSON at `path`
    pub fn write_json<P: AsRef<Path>>(&self, target: &str, path: P) -> RenderResult<()> {
        let figure = self.to_json(target)?;
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut out, &figure)?;
        writeln!(out)?;
        out.flush()?;
        log::info!("Wrote Plotly figure for '{}' to {}", target, path.as_ref().display());
        Ok(())
    }
}

impl PlotSurface for PlotlyFigureSurface {
    fn initialize_plot(&mut self, target: &str, trace: Trace, layout: PlotLayout) -> RenderResult<()> {
        self.store.initialize_plot(target, trace, layout)
    }

    fn append_trace_and_redraw(&mut self, target: &str, trace: Trace) -> RenderResult<()> {
        self.store.append_trace_and_redraw(target, trace)
    }
}

fn figure_json(figure: &Figure) -> Value {
    json!({
        "data": figure.traces.iter().map(trace_json).collect::<Vec<_>>(),
        "layout": layout_json(&figure.layout),
    })
}

fn trace_json(trace: &Trace) -> Value {
    match trace {
        Trace::Empty => json!({}),
        Trace::Line { x0, y0, x1, y1, stroke } => json!({
            "x": [x0, x1],
            "y": [y0, y1],
            "mode": "lines",
            "line": { "color": stroke.color, "width": stroke.width },
        }),
        Trace::Text { x, y, text, position, font } => json!({
            "x": [x],
            "y": [y],
            "mode": "lines+text",
            "text": [text],
            "textposition": position.as_plotly(),
            "textfont": { "family": font.family, "size": font.size, "color": font.color },
        }),
        Trace::Rect { x0, y0, x1, y1, fill } => json!({
            "x": [x0, x1, x1, x0, x0],
            "y": [y0, y0, y1, y1, y0],
            "mode": "lines",
            "fill": "toself",
            "fillcolor": fill,
            "line": { "width": 0 },
        }),
    }
}

fn layout_json(layout: &PlotLayout) -> Value {
    let mut value = json!({
        "xaxis": axis_json(layout, layout.x_range),
        "yaxis": axis_json(layout, layout.y_range),
        "width": layout.width,
        "height": layout.height,
        "showlegend": layout.show_legend,
        "shapes": layout.shapes.iter().map(shape_json).collect::<Vec<_>>(),
    });
    if !layout.hover {
        value["hovermode"] = Value::Bool(false);
    }
    value
}

fn axis_json(layout: &PlotLayout, range: Option<(f64, f64)>) -> Value {
    let mut axis = json!({
        "showticklabels": layout.show_tick_labels,
        "autotick": false,
        "showgrid": layout.show_grid,
        "zeroline": layout.zero_line,
    });
    if let Some((low, high)) = range {
        axis["range"] = json!([low, high]);
    }
    axis
}

fn shape_json(shape: &Shape) -> Value {
    match shape {
        Shape::Line { x0, y0, x1, y1, stroke } => json!({
            "type": "line",
            "x0": x0,
            "y0": y0,
            "x1": x1,
            "y1": y1,
            "line": { "color": stroke.color, "width": stroke.width },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruler::plot_chromosomes;
    use genoview_core::{ChromosomeReference, LayoutConfig};

    fn ruler_figure() -> Value {
        let mut surface = PlotlyFigureSurface::new();
        plot_chromosomes(&mut surface, &LayoutConfig::default(), &ChromosomeReference::default(), "chart")
            .unwrap();
        surface.to_json("chart").unwrap()
    }

    #[test]
    fn test_layout_matches_fixed_chart() {
        let figure = ruler_figure();
        let layout = &figure["layout"];
        assert_eq!(layout["width"], 1200);
        assert_eq!(layout["height"], 500);
        assert_eq!(layout["showlegend"], false);
        assert_eq!(layout["hovermode"], false);
        assert_eq!(layout["yaxis"]["range"], json!([0.0, 5.0]));
        assert!(layout["xaxis"].get("range").is_none());
        assert_eq!(layout["xaxis"]["autotick"], false);
        assert_eq!(layout["shapes"][0]["type"], "line");
        assert_eq!(layout["shapes"][0]["x1"], 1165.0);
    }

    #[test]
    fn test_data_traces() {
        let figure = ruler_figure();
        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 1 + 2 * 24 + 1);
        assert_eq!(data[0], json!({}));
        assert_eq!(data[1]["mode"], "lines");
        assert_eq!(data[1]["line"]["color"], "#000");
        assert_eq!(data[2]["mode"], "lines+text");
        assert_eq!(data[2]["text"], json!(["1"]));
        assert_eq!(data[2]["textposition"], "top");
        assert_eq!(data[2]["textfont"]["color"], "#ff7f0e");
        assert_eq!(data[2]["textfont"]["size"], 11.0);
    }

    #[test]
    fn test_rect_trace_is_filled_polygon() {
        let value = trace_json(&Trace::rect(1.0, 2.0, 3.0, 4.0, "#00f"));
        assert_eq!(value["fill"], "toself");
        assert_eq!(value["fillcolor"], "#00f");
        assert_eq!(value["x"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.json");
        let mut surface = PlotlyFigureSurface::new();
        plot_chromosomes(&mut surface, &LayoutConfig::default(), &ChromosomeReference::default(), "chart")
            .unwrap();
        surface.write_json("chart", &path).unwrap();

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["data"].as_array().unwrap().len(), 50);
        assert_eq!(parsed["data"][48]["text"], json!(["Y"]));
        assert_eq!(parsed["layout"]["width"], 1200);
        assert!(surface.write_json("missing", dir.path().join("x.json")).is_err());
    }
}

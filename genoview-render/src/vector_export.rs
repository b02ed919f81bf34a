/*!
# SVG Export

A [`PlotSurface`] that keeps every figure in memory and serializes it as a
standalone SVG document. Output is byte-for-byte deterministic unless the
timestamped footer is switched on.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::surface::{Figure, FigureStore, PlotSurface};
use crate::trace::{Font, PlotLayout, Shape, TextPosition, Trace};
use crate::RenderResult;

/// Gap in pixels between a text anchor and the glyphs
const TEXT_PAD: f64 = 3.0;

/// SVG document options
#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub background_color: String,
    /// Overrides the font family of every text trace
    pub font_family: Option<String>,
    pub title: Option<String>,
    pub provenance_comment: Option<String>,
    /// Adds a footer with the generation time
    pub show_footer: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            font_family: None,
            title: None,
            provenance_comment: None,
            show_footer: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct SvgSurface {
    store: FigureStore,
    options: SvgOptions,
}

impl SvgSurface {
    pub fn new(options: SvgOptions) -> Self {
        Self { store: FigureStore::new(), options }
    }

    pub fn store(&self) -> &FigureStore {
        &self.store
    }

    /// Serialize `target` as an SVG document
    pub fn to_svg(&self, target: &str) -> RenderResult<String> {
        let figure = self.store.figure(target)?;
        let mut buf = Vec::new();
        SvgBuilder::from_figure(figure, &self.options).write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write `target` as an SVG file at `path`
    pub fn write_svg<P: AsRef<Path>>(&self, target: &str, path: P) -> RenderResult<()> {
        let figure = self.store.figure(target)?;
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        SvgBuilder::from_figure(figure, &self.options).write_to(&mut out)?;
        out.flush()?;
        log::info!("Wrote SVG for '{}' to {}", target, path.as_ref().display());
        Ok(())
    }
}

impl PlotSurface for SvgSurface {
    fn initialize_plot(&mut self, target: &str, trace: Trace, layout: PlotLayout) -> RenderResult<()> {
        self.store.initialize_plot(target, trace, layout)
    }

    fn append_trace_and_redraw(&mut self, target: &str, trace: Trace) -> RenderResult<()> {
        self.store.append_trace_and_redraw(target, trace)
    }
}

struct SvgBuilder<'a> {
    layout: &'a PlotLayout,
    options: &'a SvgOptions,
    elements: Vec<String>,
    top_comments: Vec<String>,
}

impl<'a> SvgBuilder<'a> {
    fn from_figure(figure: &'a Figure, options: &'a SvgOptions) -> Self {
        let mut svg = Self {
            layout: &figure.layout,
            options,
            elements: Vec::new(),
            top_comments: Vec::new(),
        };

        if let Some(comment) = &options.provenance_comment {
            svg.top_comments.push(comment.clone());
        }
        if let Some(title) = &options.title {
            svg.elements.push(format!("<title>{}</title>", escape_xml(title)));
        }
        svg.add_background();
        for shape in &figure.layout.shapes {
            svg.add_shape(shape);
        }
        for trace in &figure.traces {
            svg.add_trace(trace);
        }
        if options.show_footer {
            svg.add_footer();
        }
        svg
    }

    fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.layout.width,
            self.layout.height,
            escape_xml(&self.options.background_color)
        ));
    }

    fn add_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Line { x0, y0, x1, y1, stroke } => {
                self.push_line(*x0, *y0, *x1, *y1, &stroke.color, stroke.width)
            }
        }
    }

    fn add_trace(&mut self, trace: &Trace) {
        match trace {
            Trace::Empty => {}
            Trace::Line { x0, y0, x1, y1, stroke } => {
                self.push_line(*x0, *y0, *x1, *y1, &stroke.color, stroke.width)
            }
            Trace::Rect { x0, y0, x1, y1, fill } => {
                let (ax, bx) = (self.layout.x_to_px(*x0), self.layout.x_to_px(*x1));
                let (ay, by) = (self.layout.y_to_px(*y0), self.layout.y_to_px(*y1));
                self.elements.push(format!(
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                    ax.min(bx),
                    ay.min(by),
                    (bx - ax).abs(),
                    (by - ay).abs(),
                    escape_xml(fill)
                ));
            }
            Trace::Text { x, y, text, position, font } => self.push_text(*x, *y, text, *position, font),
        }
    }

    fn push_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            self.layout.x_to_px(x0),
            self.layout.y_to_px(y0),
            self.layout.x_to_px(x1),
            self.layout.y_to_px(y1),
            escape_xml(color),
            width
        ));
    }

    fn push_text(&mut self, x: f64, y: f64, text: &str, position: TextPosition, font: &Font) {
        let px = self.layout.x_to_px(x);
        let py = self.layout.y_to_px(y);
        let (px, py, placement) = match position {
            TextPosition::Top => (px, py - TEXT_PAD, r#"text-anchor="middle""#),
            TextPosition::MiddleRight => {
                (px + TEXT_PAD, py, r#"text-anchor="start" dominant-baseline="middle""#)
            }
        };
        let family = self.options.font_family.as_deref().unwrap_or(&font.family);
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" {} font-family="{}" font-size="{}px" fill="{}">{}</text>"#,
            px,
            py,
            placement,
            escape_xml(family),
            font.size,
            escape_xml(&font.color),
            escape_xml(text)
        ));
    }

    fn add_footer(&mut self) {
        let footer = format!(
            "Genoview v{} | Generated: {}",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        self.elements.push(format!(
            r#"<text x="10" y="{}" font-family="{}" font-size="9px" fill="gray">{}</text>"#,
            self.layout.height.saturating_sub(4),
            escape_xml(self.options.font_family.as_deref().unwrap_or("sans serif")),
            footer
        ));
    }

    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let (w, h) = (self.layout.width, self.layout.height);
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            w, h, w, h
        )?;
        for comment in &self.top_comments {
            for line in comment.lines() {
                writeln!(out, "  <!-- {} -->", line.replace("--", "- -"))?;
            }
        }
        for element in &self.elements {
            writeln!(out, "  {}", element)?;
        }
        writeln!(out, "</svg>")?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

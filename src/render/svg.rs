//! SVG document surface.

use std::fmt::Write as _;

use super::{Layer, Primitive, Style, Surface, TextStyle};
use crate::config::Viewport;

/// Accumulates layers into a standalone SVG document.
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    viewport: Viewport,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The complete document for everything drawn since the last clear.
    pub fn to_svg(&self) -> String {
        let Viewport { width, height } = self.viewport;
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        out.push('\n');
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.body.clear();
    }

    fn draw_layer(&mut self, layer: &Layer) {
        let _ = writeln!(self.body, r#"<g class="{}">"#, layer.kind.class());
        for primitive in &layer.primitives {
            write_primitive(&mut self.body, primitive);
        }
        self.body.push_str("</g>\n");
    }
}

fn write_style(out: &mut String, style: &Style) {
    if let Some(fill) = style.fill {
        let _ = write!(out, r#" fill="{fill}""#);
    }
    if let Some(stroke) = style.stroke {
        let _ = write!(out, r#" stroke="{stroke}""#);
    }
    if let Some(width) = style.stroke_width {
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
    if let Some(opacity) = style.opacity {
        let _ = write!(out, r#" opacity="{opacity}""#);
    }
    if let Some(dash) = style.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash}""#);
    }
}

fn write_text_style(out: &mut String, style: &TextStyle) {
    let _ = write!(
        out,
        r#" font-size="{}" font-weight="{}" fill="{}" stroke="{}" stroke-width="{}" paint-order="{}""#,
        style.font_size, style.font_weight, style.fill, style.stroke, style.stroke_width, style.paint_order
    );
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Path { class, d, style } => {
            let _ = write!(out, r#"<path class="{class}" d="{d}""#);
            write_style(out, style);
            out.push_str("/>\n");
        }
        Primitive::Circle {
            class,
            cx,
            cy,
            r,
            style,
        } => {
            let _ = write!(out, r#"<circle class="{class}" cx="{cx:.3}" cy="{cy:.3}" r="{r}""#);
            write_style(out, style);
            out.push_str("/>\n");
        }
        Primitive::Text {
            class,
            x,
            y,
            text,
            style,
        } => {
            let _ = write!(out, r#"<text class="{class}" x="{x:.3}" y="{y:.3}""#);
            write_text_style(out, style);
            let _ = writeln!(out, ">{}</text>", escape(text));
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

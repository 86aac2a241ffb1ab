use std::fmt::Write as _;

use crate::error::DiagramResult;
use crate::render::{
    Definition, FontWeight, GradientStop, Renderer, SceneFrame, ShapeKind, ShapeNode, ShapeStyle,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes every frame into a standalone SVG document.
///
/// Each render replaces the previous document wholesale, so the surface never
/// shows a mix of two rebuilds.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    render_count: usize,
    released: bool,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document; empty before the first render or after release.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &SceneFrame) -> DiagramResult<()> {
        frame.validate()?;
        self.document = frame_to_svg(frame);
        self.render_count += 1;
        self.released = false;
        Ok(())
    }

    fn release(&mut self) {
        self.document.clear();
        self.released = true;
    }
}

/// Renders `frame` as an SVG string without touching any surface.
#[must_use]
pub fn frame_to_svg(frame: &SceneFrame) -> String {
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    let mut out = String::with_capacity(256 + frame.nodes.len() * 96);
    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="100%" height="{height}" viewBox="0 0 {width} {height}" style="display:block;max-width:{width}px;margin:0 auto">"#
    );
    if !frame.defs.is_empty() {
        out.push_str("<defs>");
        for definition in &frame.defs {
            write_definition(&mut out, definition);
        }
        out.push_str("</defs>");
    }
    for node in &frame.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>");
    out
}

fn write_definition(out: &mut String, definition: &Definition) {
    match definition {
        Definition::RadialGradient { id, stops } => {
            let _ = write!(out, r#"<radialGradient id="{}">"#, escape(id));
            write_stops(out, stops);
            out.push_str("</radialGradient>");
        }
        Definition::LinearGradient { id, stops } => {
            let _ = write!(out, r#"<linearGradient id="{}">"#, escape(id));
            write_stops(out, stops);
            out.push_str("</linearGradient>");
        }
        Definition::Glow { id, std_deviation } => {
            let _ = write!(
                out,
                r#"<filter id="{}"><feGaussianBlur stdDeviation="{std_deviation}" result="blur"/><feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#,
                escape(id)
            );
        }
    }
}

fn write_stops(out: &mut String, stops: &[GradientStop]) {
    for stop in stops {
        let _ = write!(
            out,
            r#"<stop offset="{:.0}%" stop-color="{}"/>"#,
            stop.offset * 100.0,
            stop.color.to_svg()
        );
    }
}

fn write_node(out: &mut String, node: &ShapeNode) {
    match &node.kind {
        ShapeKind::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{radius:.2}""#,
                center.x, center.y
            );
        }
        ShapeKind::Ellipse {
            center,
            radius_x,
            radius_y,
        } => {
            let _ = write!(
                out,
                r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{radius_x:.2}" ry="{radius_y:.2}""#,
                center.x, center.y
            );
        }
        ShapeKind::Rect {
            origin,
            width,
            height,
            corner_radius,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{width:.2}" height="{height:.2}""#,
                origin.x, origin.y
            );
            if *corner_radius > 0.0 {
                let _ = write!(out, r#" rx="{corner_radius:.2}""#);
            }
        }
        ShapeKind::Line { from, to } => {
            let _ = write!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}""#,
                from.x, from.y, to.x, to.y
            );
        }
        ShapeKind::Path { data } => {
            let _ = write!(out, r#"<path d="{}""#, data.to_svg());
        }
        ShapeKind::Text {
            position,
            font_size,
            anchor,
            weight,
            ..
        } => {
            let _ = write!(
                out,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="{font_size}" font-family="system-ui, sans-serif""#,
                position.x,
                position.y,
                anchor.as_svg()
            );
            if *weight == FontWeight::Bold {
                out.push_str(r#" font-weight="bold""#);
            }
        }
        ShapeKind::Group { .. } => out.push_str("<g"),
    }

    write_style(
        out,
        &node.style,
        matches!(node.kind, ShapeKind::Line { .. }),
    );
    if let Some(region) = &node.region_id {
        let _ = write!(
            out,
            r#" data-region="{}" style="cursor:pointer""#,
            escape(region)
        );
    }

    match &node.kind {
        ShapeKind::Text { content, .. } => {
            let _ = write!(out, ">{}</text>", escape(content));
        }
        ShapeKind::Group { children } => {
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
        _ => out.push_str("/>"),
    }
}

fn write_style(out: &mut String, style: &ShapeStyle, is_line: bool) {
    match &style.fill {
        Some(paint) => {
            let _ = write!(out, r#" fill="{}""#, escape(&paint.to_svg()));
        }
        None if !is_line => out.push_str(r#" fill="none""#),
        None => {}
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape(&stroke.to_svg()),
            style.stroke_width
        );
    }
    if let Some(dash) = &style.dash {
        let joined: Vec<String> = dash.iter().map(ToString::to_string).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, joined.join(","));
    }
    if style.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{:.3}""#, style.opacity.max(0.0));
    }
    if let Some(filter) = &style.filter {
        let _ = write!(out, r#" filter="url(#{})""#, escape(filter));
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, frame_to_svg};
    use crate::core::{Point, Viewport};
    use crate::render::{
        Color, Definition, GradientStop, Paint, Renderer, SceneFrame, SceneLayer, ShapeNode,
        ShapeStyle, TextAnchor,
    };

    fn sample_frame() -> SceneFrame {
        let mut frame = SceneFrame::empty(Viewport::new(200, 100));
        frame.defs.push(Definition::radial_gradient(
            "core",
            &[
                GradientStop::new(0.0, Color::WHITE),
                GradientStop::new(1.0, Color::rgb(1.0, 0.0, 0.0)),
            ],
        ));
        frame.nodes.push(
            ShapeNode::circle(
                Point::new(50.0, 50.0),
                10.0,
                ShapeStyle::filled(Paint::reference("core")),
            )
            .with_region("core"),
        );
        frame.nodes.push(ShapeNode::text(
            Point::new(10.0, 90.0),
            "Sun & <Earth>",
            12.0,
            TextAnchor::Start,
            Color::WHITE,
        ));
        frame.layers.push(crate::render::LayerSpan {
            layer: SceneLayer::Structure,
            start: 0,
            len: 2,
        });
        frame
    }

    #[test]
    fn document_contains_defs_regions_and_escaped_text() {
        let svg = frame_to_svg(&sample_frame());
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"<radialGradient id="core">"#));
        assert!(svg.contains(r#"fill="url(#core)""#));
        assert!(svg.contains(r#"data-region="core""#));
        assert!(svg.contains("Sun &amp; &lt;Earth&gt;"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn release_clears_document() {
        let mut renderer = SvgRenderer::new();
        renderer.render(&sample_frame()).expect("render");
        assert_eq!(renderer.render_count(), 1);
        assert!(!renderer.document().is_empty());
        renderer.release();
        assert!(renderer.document().is_empty());
        assert!(renderer.is_released());
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let mut frame = sample_frame();
        frame.defs.clear();
        let mut renderer = SvgRenderer::new();
        assert!(renderer.render(&frame).is_err());
    }
}

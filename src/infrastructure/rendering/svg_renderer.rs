use crate::domain::chart::scene::{Element, LayerGroup, Scene, Shape, Style};

/// Serializes a scene to a standalone `<svg>` string
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    clip_id: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new("chart-area")
    }
}

impl SvgRenderer {
    /// `clip_id` must be unique within the page when several charts are shown
    pub fn new(clip_id: &str) -> Self {
        Self { clip_id: clip_id.to_string() }
    }

    pub fn render(&self, scene: &Scene) -> String {
        let layout = scene.layout();
        let (left, top) = (layout.margin.left, layout.margin.top);
        let mut out = String::with_capacity(16 * 1024);

        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            num(layout.svg_width()),
            num(layout.svg_height())
        ));
        out.push_str(&format!(
            r#"<defs><clipPath id="{}"><rect width="{}" height="{}"/></clipPath></defs>"#,
            self.clip_id,
            num(layout.plot.width),
            num(layout.plot.height)
        ));

        out.push_str(&format!(
            r#"<g transform="translate({},{})" clip-path="url(#{})">"#,
            num(left),
            num(top),
            self.clip_id
        ));
        self.render_group(scene, LayerGroup::Plot, &mut out);
        out.push_str("</g>");

        out.push_str(&format!(
            r#"<g class="x-axis" transform="translate({},{})">"#,
            num(left),
            num(top + layout.plot.height)
        ));
        self.render_group(scene, LayerGroup::XAxis, &mut out);
        out.push_str("</g>");

        out.push_str(&format!(r#"<g class="y-axis" transform="translate({},{})">"#, num(left), num(top)));
        self.render_group(scene, LayerGroup::YAxis, &mut out);
        out.push_str("</g>");

        out.push_str("</svg>");
        out
    }

    fn render_group(&self, scene: &Scene, group: LayerGroup, out: &mut String) {
        for layer in scene.group(group) {
            out.push_str(&format!(r#"<g class="{}">"#, layer.id()));
            for element in layer.placed_elements() {
                write_element(&element, out);
            }
            out.push_str("</g>");
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    let paint = paint_attributes(&element.style);
    match &element.shape {
        Shape::Rect { x, y, width, height, rx } => {
            let radius = if *rx > 0.0 { format!(r#" rx="{}""#, num(*rx)) } else { String::new() };
            out.push_str(&format!(
                r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                element.class,
                num(*x),
                num(*y),
                num(width.max(0.0)),
                num(height.max(0.0)),
                radius,
                paint
            ));
        }
        Shape::Line { x1, y1, x2, y2 } => out.push_str(&format!(
            r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            element.class,
            num(*x1),
            num(*y1),
            num(*x2),
            num(*y2),
            paint
        )),
        Shape::Path { points } => {
            let d = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| format!("{}{},{}", if i == 0 { "M" } else { "L" }, num(*x), num(*y)))
                .collect::<String>();
            out.push_str(&format!(r#"<path class="{}" d="{}"{}/>"#, element.class, d, paint));
        }
        Shape::Circle { cx, cy, r } => out.push_str(&format!(
            r#"<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            element.class,
            num(*cx),
            num(*cy),
            num(*r),
            paint
        )),
        Shape::Text { x, y, content, anchor, font_size, bold } => out.push_str(&format!(
            r#"<text class="{}" x="{}" y="{}" text-anchor="{}" font-size="{}px"{}{}>{}</text>"#,
            element.class,
            num(*x),
            num(*y),
            anchor.as_ref(),
            num(*font_size),
            if *bold { r#" font-weight="bold""# } else { "" },
            paint,
            escape(content)
        )),
    }
}

fn paint_attributes(style: &Style) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(fill) => attrs.push_str(&format!(r#" fill="{}""#, fill.to_css())),
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = style.stroke {
        attrs.push_str(&format!(r#" stroke="{}" stroke-width="{}""#, stroke.to_css(), num(style.stroke_width)));
    }
    if let Some((dash, gap)) = style.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{},{}""#, num(dash), num(gap)));
    }
    if style.opacity < 1.0 {
        attrs.push_str(&format!(r#" opacity="{}""#, num(style.opacity)));
    }
    attrs
}

/// At most two decimals, trailing zeros dropped
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

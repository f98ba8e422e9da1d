use crate::domain::chart::config::Palette;
use crate::domain::chart::drawing::{Drawing, fib_guides, fib_label};
use crate::domain::chart::scene::{Element, LayerId, Scene, Shape, Style, TextAnchor};

const LABEL_FONT_SIZE: f64 = 10.0;

/// Shapes for one drawing. Committed drawings and previews share this so a
/// preview looks exactly like what will be stored.
pub fn drawing_elements(drawing: &Drawing, width: f64, palette: &Palette, class: &'static str) -> Vec<Element> {
    match drawing {
        Drawing::TrendLine { start, end } => vec![Element::data(
            class,
            Shape::Line { x1: start.x, y1: start.y, x2: end.x, y2: end.y },
            Style::stroked(palette.trend_line, 2.0).dashed(5.0, 5.0),
        )],
        Drawing::HorizontalLine { y } => vec![Element::pinned(
            class,
            Shape::Line { x1: 0.0, y1: *y, x2: width, y2: *y },
            Style::stroked(palette.horizontal_line, 2.0),
        )],
        Drawing::FibRetracement { start, end } => fib_guides(start.y, end.y)
            .flat_map(|(level, y)| {
                [
                    Element::pinned(
                        class,
                        Shape::Line { x1: 0.0, y1: y, x2: width, y2: y },
                        Style::stroked(palette.fib_guide, 1.0).dashed(3.0, 3.0),
                    ),
                    Element::pinned(
                        class,
                        Shape::Text {
                            x: width - 5.0,
                            y: y - 5.0,
                            content: fib_label(level),
                            anchor: TextAnchor::End,
                            font_size: LABEL_FONT_SIZE,
                            bold: false,
                        },
                        Style::filled(palette.fib_label),
                    ),
                ]
            })
            .collect(),
        Drawing::PointMarker { x, y, label, .. } => {
            let mut elements = vec![Element::data(
                class,
                Shape::Circle { cx: *x, cy: *y, r: 5.0 },
                Style::filled(palette.marker_fill).with_stroke(palette.marker_stroke, 1.0),
            )];
            if !label.is_empty() {
                elements.push(Element::data(
                    class,
                    Shape::Text {
                        x: x + 8.0,
                        y: y - 8.0,
                        content: label.clone(),
                        anchor: TextAnchor::Start,
                        font_size: LABEL_FONT_SIZE,
                        bold: false,
                    },
                    Style::filled(palette.marker_stroke),
                ));
            }
            elements
        }
    }
}

/// Clear-and-redraw of every committed drawing
pub fn render_drawings(scene: &mut Scene, drawings: &[Drawing], palette: &Palette) {
    let width = scene.layout().plot.width;
    let layer = scene.layer_mut(LayerId::Drawings);
    layer.clear();
    layer.extend(
        drawings
            .iter()
            .flat_map(|drawing| drawing_elements(drawing, width, palette, "drawing")),
    );
}

/// Replaces the preview layer with the in-progress drawing, if any
pub fn render_preview(scene: &mut Scene, preview: Option<&Drawing>, palette: &Palette) {
    let width = scene.layout().plot.width;
    let layer = scene.layer_mut(LayerId::Preview);
    layer.clear();
    if let Some(drawing) = preview {
        layer.extend(
            drawing_elements(drawing, width, palette, "temp-drawing")
                .into_iter()
                .map(|element| Element { style: element.style.with_opacity(palette.preview_opacity), ..element }),
        );
    }
}

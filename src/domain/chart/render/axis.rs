use crate::domain::chart::config::ChartConfig;
use crate::domain::chart::scales::{LinearScale, time_ticks};
use crate::domain::chart::scene::{Element, Layer, Shape, Style, TextAnchor};
use crate::domain::market_data::Timeframe;
use crate::time_utils::format_tick_label;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;

/// Bottom axis in x-axis group coordinates (origin at the plot's
/// bottom-left). Called by the static pass with the base scale and by the
/// transform controller with the rescaled one.
pub fn build_x_axis(layer: &mut Layer, time: &LinearScale, timeframe: &Timeframe, config: &ChartConfig) {
    layer.clear();
    let style = Style::stroked(config.palette.axis, 1.0);
    let (r0, r1) = time.range();

    layer.push(Element::pinned("domain", Shape::Line { x1: r0, y1: 0.0, x2: r1, y2: 0.0 }, style));

    for ts in time_ticks(time, config.x_ticks) {
        let x = time.map(ts as f64);
        layer.push(Element::pinned("tick", Shape::Line { x1: x, y1: 0.0, x2: x, y2: TICK_SIZE }, style));
        layer.push(Element::pinned(
            "tick-label",
            Shape::Text {
                x,
                y: TICK_SIZE + TICK_PADDING + FONT_SIZE,
                content: format_tick_label(ts, timeframe),
                anchor: TextAnchor::Middle,
                font_size: FONT_SIZE,
                bold: false,
            },
            Style::filled(config.palette.axis),
        ));
    }
}

/// Left axis with `$x.xx` labels
pub fn build_y_axis(layer: &mut Layer, price: &LinearScale, config: &ChartConfig) {
    layer.clear();
    let style = Style::stroked(config.palette.axis, 1.0);
    let (r0, r1) = price.range();

    layer.push(Element::pinned("domain", Shape::Line { x1: 0.0, y1: r0, x2: 0.0, y2: r1 }, style));

    for value in price.ticks(config.y_ticks) {
        let y = price.map(value);
        layer.push(Element::pinned("tick", Shape::Line { x1: -TICK_SIZE, y1: y, x2: 0.0, y2: y }, style));
        layer.push(Element::pinned(
            "tick-label",
            Shape::Text {
                x: -(TICK_SIZE + TICK_PADDING),
                y: y + FONT_SIZE / 3.0,
                content: format!("${:.2}", value),
                anchor: TextAnchor::End,
                font_size: FONT_SIZE,
                bold: false,
            },
            Style::filled(config.palette.axis),
        ));
    }
}

/// Horizontal grid lines across the plot at the price ticks
pub fn build_grid(layer: &mut Layer, price: &LinearScale, width: f64, config: &ChartConfig) {
    layer.clear();
    let style = Style::stroked(config.palette.axis, 1.0).with_opacity(config.palette.grid_opacity);
    layer.extend(price.ticks(config.y_ticks).into_iter().map(|value| {
        let y = price.map(value);
        Element::pinned("grid-line", Shape::Line { x1: 0.0, y1: y, x2: width, y2: y }, style)
    }));
}

use crate::domain::chart::config::ChartConfig;
use crate::domain::chart::entities::ChartContext;
use crate::domain::chart::scene::{Element, LayerId, Scene, Shape, Style};
use crate::domain::chart::value_objects::ChartMode;
use crate::domain::market_data::Candle;

/// Clears the candle and line layers and fills the one for `mode`
pub fn run(scene: &mut Scene, context: &ChartContext, candles: &[Candle], mode: ChartMode, config: &ChartConfig) {
    scene.layer_mut(LayerId::Candles).clear();
    scene.layer_mut(LayerId::Line).clear();

    let Some(scales) = context.scales.as_ref() else {
        return;
    };
    let palette = &config.palette;

    match mode {
        ChartMode::Candle => {
            let band = scales.band_width;
            let mut bodies = Vec::with_capacity(candles.len());
            let mut wicks = Vec::with_capacity(candles.len());
            for candle in candles {
                let (open, close) = (candle.ohlcv.open.value(), candle.ohlcv.close.value());
                let color = if open > close { palette.bearish } else { palette.bullish };
                let x = scales.x_of(candle);
                let top = scales.price.map(open.max(close));
                let bottom = scales.price.map(open.min(close));
                bodies.push(Element::data(
                    "candle",
                    Shape::Rect { x: x - band / 2.0, y: top, width: band, height: bottom - top, rx: 0.0 },
                    Style::filled(color),
                ));
                wicks.push(Element::data(
                    "high-low-line",
                    Shape::Line {
                        x1: x,
                        y1: scales.price.map(candle.ohlcv.high.value()),
                        x2: x,
                        y2: scales.price.map(candle.ohlcv.low.value()),
                    },
                    Style::stroked(color, 1.0),
                ));
            }
            let layer = scene.layer_mut(LayerId::Candles);
            layer.extend(bodies);
            layer.extend(wicks);
        }
        ChartMode::Line => {
            let points: Vec<(f64, f64)> = candles
                .iter()
                .map(|candle| (scales.x_of(candle), scales.price.map(candle.ohlcv.close.value())))
                .collect();
            let layer = scene.layer_mut(LayerId::Line);
            layer.push(Element::data(
                "price-line",
                Shape::Path { points: points.clone() },
                Style::stroked(palette.line, 1.5),
            ));
            layer.extend(points.into_iter().map(|(cx, cy)| {
                Element::data("dot", Shape::Circle { cx, cy, r: 2.0 }, Style::filled(palette.line))
            }));
        }
    }
}

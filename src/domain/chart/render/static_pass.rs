use super::axis::{build_grid, build_x_axis, build_y_axis};
use crate::domain::chart::config::ChartConfig;
use crate::domain::chart::entities::ChartContext;
use crate::domain::chart::scene::{Element, LayerId, Scene, Shape, Style, TextAnchor};
use crate::domain::market_data::Candle;

/// Layers owned by this pass; everything else survives a data change
pub const STATIC_LAYERS: [LayerId; 5] =
    [LayerId::Grid, LayerId::Volume, LayerId::Annotations, LayerId::XAxis, LayerId::YAxis];

/// Rebuilds grid, volume bars, the last-close label and both axes from
/// scratch. With no scales (empty series) the layers are left empty.
pub fn run(scene: &mut Scene, context: &ChartContext, candles: &[Candle], config: &ChartConfig) {
    scene.set_layout(context.layout);
    for id in STATIC_LAYERS {
        scene.layer_mut(id).clear();
    }

    let Some(scales) = context.scales.as_ref() else {
        return;
    };
    let width = context.layout.plot.width;
    let height = context.layout.plot.height;
    let palette = &config.palette;

    build_grid(scene.layer_mut(LayerId::Grid), &scales.price, width, config);

    let band = scales.band_width;
    scene.layer_mut(LayerId::Volume).extend(candles.iter().map(|candle| {
        let top = scales.volume.map(candle.ohlcv.volume.value());
        let color = if candle.ohlcv.open > candle.ohlcv.close { palette.bearish } else { palette.bullish };
        Element::data(
            "volume-bar",
            Shape::Rect { x: scales.x_of(candle) - band / 2.0, y: top, width: band, height: height - top, rx: 0.0 },
            Style::filled(color.with_alpha(palette.volume_alpha)),
        )
    }));

    if let Some(last) = candles.last() {
        let annotations = scene.layer_mut(LayerId::Annotations);
        annotations.push(Element::pinned(
            "last-price-box",
            Shape::Rect { x: width - 70.0, y: 10.0, width: 70.0, height: 24.0, rx: 4.0 },
            Style::filled(palette.label_background),
        ));
        let color = if last.ohlcv.close > last.ohlcv.open { palette.bullish } else { palette.bearish };
        annotations.push(Element::pinned(
            "last-price",
            Shape::Text {
                x: width - 35.0,
                y: 26.0,
                content: format!("${:.2}", last.ohlcv.close.value()),
                anchor: TextAnchor::Middle,
                font_size: 12.0,
                bold: true,
            },
            Style::filled(color),
        ));
    }

    build_x_axis(scene.layer_mut(LayerId::XAxis), &scales.time, &context.timeframe, config);
    build_y_axis(scene.layer_mut(LayerId::YAxis), &scales.price, config);
}

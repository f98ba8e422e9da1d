use price_chart_annotate::domain::chart::drawing::ToolId;
use price_chart_annotate::domain::chart::scene::{Layer, LayerId, Shape};
use price_chart_annotate::domain::chart::transform::ViewTransform;
use price_chart_annotate::domain::chart::{Chart, ChartConfig, ChartMode, ContainerSize, DirtyFlags, Point};
use price_chart_annotate::domain::market_data::{Candle, Timeframe};
use std::sync::Arc;

const STATIC: [LayerId; 5] = [LayerId::Grid, LayerId::Volume, LayerId::Annotations, LayerId::XAxis, LayerId::YAxis];

fn series(n: i64, drift: f64) -> Arc<Vec<Candle>> {
    Arc::new(
        (0..n)
            .map(|i| {
                let open = 100.0 + i as f64 * drift;
                let close = open + if i % 3 == 0 { -0.5 } else { 0.8 };
                Candle::from_values(i * 3_600_000, open, open.max(close) + 1.0, open.min(close) - 1.0, close, 200.0 + i as f64)
            })
            .collect(),
    )
}

fn loaded_chart() -> Chart {
    let mut chart = Chart::new("passes".to_string(), ChartConfig::default(), ContainerSize::new(800.0, 500.0));
    chart.replace_candles(series(60, 0.4));
    chart.flush();
    chart
}

fn static_layers(chart: &Chart) -> Vec<Layer> {
    STATIC.iter().map(|id| chart.scene().layer(*id).clone()).collect()
}

#[test]
fn mode_round_trip_leaves_static_layers_identical() {
    let mut chart = loaded_chart();
    let before = static_layers(&chart);
    let static_passes = chart.stats().static_passes;

    assert!(chart.set_mode(ChartMode::Line));
    chart.flush();
    assert!(chart.scene().layer(LayerId::Candles).is_empty());
    assert_eq!(chart.scene().layer(LayerId::Line).len(), 61);

    assert!(chart.set_mode(ChartMode::Candle));
    chart.flush();
    assert!(chart.scene().layer(LayerId::Line).is_empty());
    assert_eq!(chart.scene().layer(LayerId::Candles).len(), 120);

    assert_eq!(static_layers(&chart), before);
    assert_eq!(chart.stats().static_passes, static_passes);
}

#[test]
fn same_mode_is_not_a_change() {
    let mut chart = loaded_chart();
    assert!(!chart.set_mode(ChartMode::Candle));
    assert_eq!(chart.flush(), DirtyFlags::default());
}

#[test]
fn data_replacement_mid_gesture_keeps_draft() {
    let mut chart = loaded_chart();
    chart.select_tool(Some(ToolId::TrendLine));
    chart.pointer_down(160.0, 120.0);
    chart.pointer_move(300.0, 200.0);
    chart.flush();
    let draft = *chart.draft();
    assert_eq!(draft.start, Some(Point::new(100.0, 100.0)));
    assert_eq!(draft.current, Some(Point::new(240.0, 180.0)));

    chart.replace_candles(series(61, -0.3));
    chart.flush();
    assert_eq!(*chart.draft(), draft);
    assert!(!chart.scene().layer(LayerId::Preview).is_empty());

    chart.pointer_up();
    chart.flush();
    assert_eq!(chart.drawings().len(), 1);
    match &chart.scene().layer(LayerId::Drawings).elements()[0].shape {
        Shape::Line { x1, y1, x2, y2 } => assert_eq!((*x1, *y1, *x2, *y2), (100.0, 100.0, 240.0, 180.0)),
        other => panic!("unexpected shape {:?}", other),
    }
}

#[test]
fn gesture_moves_only_rerender_preview() {
    let mut chart = loaded_chart();
    chart.select_tool(Some(ToolId::FibRetracement));
    chart.flush();
    let before = chart.stats();

    chart.pointer_down(100.0, 100.0);
    for step in 0..20 {
        chart.pointer_move(100.0 + step as f64, 100.0 + 2.0 * step as f64);
        let ran = chart.flush();
        assert_eq!(ran, DirtyFlags { gesture: true, ..DirtyFlags::default() });
    }

    let after = chart.stats();
    assert_eq!(after.preview_passes, before.preview_passes + 20);
    assert_eq!(after.static_passes, before.static_passes);
    assert_eq!(after.mode_passes, before.mode_passes);
    assert_eq!(after.drawing_passes, before.drawing_passes);
    assert_eq!(after.scale_runs, before.scale_runs);
}

#[test]
fn commit_rerenders_drawings_and_preview_only() {
    let mut chart = loaded_chart();
    chart.select_tool(Some(ToolId::HorizontalLine));
    chart.pointer_down(200.0, 150.0);
    chart.flush();
    let before = chart.stats();

    chart.pointer_up();
    let ran = chart.flush();
    assert_eq!(ran, DirtyFlags { drawings: true, gesture: true, ..DirtyFlags::default() });
    assert!(chart.scene().layer(LayerId::Preview).is_empty());
    assert_eq!(chart.stats().static_passes, before.static_passes);
    assert_eq!(chart.stats().mode_passes, before.mode_passes);
}

#[test]
fn mode_change_runs_mode_pass_only() {
    let mut chart = loaded_chart();
    let before = chart.stats();
    chart.set_mode(ChartMode::Line);
    assert_eq!(chart.flush(), DirtyFlags { mode: true, ..DirtyFlags::default() });
    let after = chart.stats();
    assert_eq!(after.mode_passes, before.mode_passes + 1);
    assert_eq!(after.static_passes, before.static_passes);
    assert_eq!(after.drawing_passes, before.drawing_passes);
    assert_eq!(after.preview_passes, before.preview_passes);
}

#[test]
fn data_change_keeps_committed_drawings() {
    let mut chart = loaded_chart();
    chart.select_tool(Some(ToolId::HorizontalLine));
    chart.pointer_down(200.0, 150.0);
    chart.pointer_up();
    chart.flush();
    let drawings_before = chart.scene().layer(LayerId::Drawings).clone();
    let before = chart.stats();

    chart.replace_candles(series(62, 0.1));
    assert_eq!(chart.flush(), DirtyFlags { data: true, ..DirtyFlags::default() });
    assert_eq!(chart.scene().layer(LayerId::Drawings), &drawings_before);

    let after = chart.stats();
    assert_eq!(after.scale_runs, before.scale_runs + 1);
    assert_eq!(after.static_passes, before.static_passes + 1);
    assert_eq!(after.mode_passes, before.mode_passes + 1);
    assert_eq!(after.drawing_passes, before.drawing_passes);
}

#[test]
fn static_pass_builds_volume_and_last_price() {
    let chart = loaded_chart();
    let scene = chart.scene();
    assert_eq!(scene.layer(LayerId::Volume).len(), 60);
    assert!(!scene.layer(LayerId::Grid).is_empty());

    let annotations = scene.layer(LayerId::Annotations).elements();
    assert_eq!(annotations.len(), 2);
    let last = chart.candles().last().expect("candles");
    match &annotations[1].shape {
        Shape::Text { content, bold, .. } => {
            assert_eq!(content, &format!("${:.2}", last.ohlcv.close.value()));
            assert!(*bold);
        }
        other => panic!("unexpected shape {:?}", other),
    }
}

#[test]
fn empty_series_renders_nothing() {
    let mut chart = Chart::new("empty".to_string(), ChartConfig::default(), ContainerSize::new(800.0, 500.0));
    chart.flush();
    for id in [LayerId::Grid, LayerId::Volume, LayerId::Candles, LayerId::XAxis, LayerId::YAxis] {
        assert!(chart.scene().layer(id).is_empty(), "{} should be empty", id);
    }
}

#[test]
fn zoom_moves_data_layers_and_rebuilds_x_axis() {
    let mut chart = loaded_chart();
    let grid_revision = chart.scene().layer(LayerId::Grid).revision();
    let axis_revision = chart.scene().layer(LayerId::XAxis).revision();

    assert!(chart.zoom_in());
    let view = chart.view_transform();
    assert_ne!(view, ViewTransform::IDENTITY);
    for id in [LayerId::Volume, LayerId::Candles, LayerId::Drawings, LayerId::Preview] {
        assert_eq!(chart.scene().layer(id).view(), view);
    }
    assert_eq!(chart.scene().layer(LayerId::Grid).view(), ViewTransform::IDENTITY);
    assert_eq!(chart.scene().layer(LayerId::Grid).revision(), grid_revision);
    assert!(chart.scene().layer(LayerId::XAxis).revision() > axis_revision);
    assert!(!chart.dirty().any());
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!((actual - expected).abs() < 1e-6, "{}: {} != {}", what, actual, expected);
}

#[test]
fn zoomed_geometry_follows_the_rescaled_time_scale() {
    let mut chart = loaded_chart();
    assert!(chart.zoom_in());
    assert!(chart.wheel(250.0, 120.0, -120.0));
    chart.pointer_down(400.0, 200.0);
    chart.pointer_move(370.0, 200.0);
    chart.pointer_up();

    let k = chart.view_transform().k;
    let band = chart.context().scales.as_ref().expect("scales").band_width;
    let effective = chart.effective_time_scale().expect("scales");
    let centres: Vec<f64> = chart.candles().iter().map(|c| effective.map(c.timestamp.as_f64())).collect();
    let n = centres.len();

    let volume: Vec<Shape> = chart.scene().layer(LayerId::Volume).placed_elements().map(|e| e.shape).collect();
    assert_eq!(volume.len(), n);
    for (shape, centre) in volume.iter().zip(&centres) {
        let Shape::Rect { x, width, .. } = shape else { panic!("volume bar is a rect") };
        assert_close(*x, centre - band * k / 2.0, "volume x");
        assert_close(*width, band * k, "volume width");
    }

    let candles: Vec<Shape> = chart.scene().layer(LayerId::Candles).placed_elements().map(|e| e.shape).collect();
    assert_eq!(candles.len(), 2 * n);
    for (shape, centre) in candles[..n].iter().zip(&centres) {
        let Shape::Rect { x, width, .. } = shape else { panic!("candle body is a rect") };
        assert_close(*x, centre - band * k / 2.0, "body x");
        assert_close(*width, band * k, "body width");
    }
    for (shape, centre) in candles[n..].iter().zip(&centres) {
        let Shape::Line { x1, x2, .. } = shape else { panic!("wick is a line") };
        assert_close(*x1, *centre, "wick x1");
        assert_close(*x2, *centre, "wick x2");
    }

    chart.set_mode(ChartMode::Line);
    chart.flush();
    let line: Vec<Shape> = chart.scene().layer(LayerId::Line).placed_elements().map(|e| e.shape).collect();
    assert_eq!(line.len(), n + 1);
    let Shape::Path { points } = &line[0] else { panic!("price line is a path") };
    for ((x, _), centre) in points.iter().zip(&centres) {
        assert_close(*x, *centre, "line point");
    }
    for (shape, centre) in line[1..].iter().zip(&centres) {
        let Shape::Circle { cx, r, .. } = shape else { panic!("dot is a circle") };
        assert_close(*cx, *centre, "dot cx");
        assert_eq!(*r, 2.0);
    }
}

#[test]
fn drawing_gestures_land_in_pre_zoom_space() {
    let mut chart = loaded_chart();
    chart.zoom_in();
    let view = chart.view_transform();
    chart.select_tool(Some(ToolId::PointMarker));
    chart.pointer_down(360.0, 200.0);
    chart.pointer_up();

    let marker_x = match &chart.drawings()[0] {
        price_chart_annotate::domain::chart::drawing::Drawing::PointMarker { x, .. } => *x,
        other => panic!("unexpected drawing {:?}", other),
    };
    assert!((view.apply_x(marker_x) - 300.0).abs() < 1e-9);
}

#[test]
fn timeframe_change_reruns_data_passes() {
    let mut chart = loaded_chart();
    chart.set_timeframe(Timeframe::parse("1H"));
    assert!(chart.flush().data);
    chart.set_timeframe(Timeframe::parse("1H"));
    assert!(!chart.flush().any());
}

#[test]
fn resize_relayouts_every_pass() {
    let mut chart = loaded_chart();
    chart.resize(ContainerSize::new(1000.0, 600.0));
    let ran = chart.flush();
    assert!(ran.data && ran.drawings && ran.gesture);
    assert_eq!(chart.scene().layout().plot.width, 910.0);
}

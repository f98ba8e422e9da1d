use price_chart_annotate::domain::chart::scales::LinearScale;
use price_chart_annotate::domain::chart::transform::{TransformController, ViewTransform};
use price_chart_annotate::domain::chart::{Chart, ChartConfig, ContainerSize, ZoomConfig};
use price_chart_annotate::domain::market_data::Candle;
use quickcheck_macros::quickcheck;
use std::sync::Arc;

fn controller() -> TransformController {
    let mut controller = TransformController::new(ZoomConfig::default());
    controller.set_extent(710.0);
    controller
}

fn loaded_chart() -> Chart {
    let candles: Vec<Candle> = (0..40)
        .map(|i| Candle::from_values(i * 60_000, 100.0, 101.0, 99.0, 100.5, 500.0))
        .collect();
    let mut chart = Chart::new("zoom".to_string(), ChartConfig::default(), ContainerSize::new(800.0, 500.0));
    chart.replace_candles(Arc::new(candles));
    chart.flush();
    chart
}

#[test]
fn reset_restores_base_time_scale() {
    let mut chart = loaded_chart();
    chart.zoom_in();
    chart.zoom_in();
    chart.zoom_out();
    chart.zoom_in();
    assert!(!chart.view_transform().is_identity());

    chart.reset_zoom();
    assert_eq!(chart.view_transform(), ViewTransform::IDENTITY);

    let base = chart.context().scales.expect("scales").time;
    let effective = chart.effective_time_scale().expect("scales");
    for i in 0..40 {
        let ts = (i * 60_000) as f64;
        assert!((effective.map(ts) - base.map(ts)).abs() < 1e-6);
    }
}

#[test]
fn zoom_in_stops_at_max_scale() {
    let mut controller = controller();
    for _ in 0..50 {
        controller.zoom_in();
        assert!(controller.scale() <= 10.0);
    }
    assert_eq!(controller.scale(), 10.0);
    assert!(!controller.zoom_in());
}

#[test]
fn zoom_out_stops_at_min_scale() {
    let mut controller = controller();
    for _ in 0..50 {
        controller.zoom_out();
        assert!(controller.scale() >= 0.5);
    }
    assert_eq!(controller.scale(), 0.5);
    assert!(!controller.zoom_out());
}

#[test]
fn button_zoom_keeps_plot_centre() {
    let mut controller = controller();
    controller.pan_by(-120.0);
    let centre_before = controller.transform().invert_x(355.0);
    controller.zoom_in();
    let centre_after = controller.transform().invert_x(355.0);
    assert!((centre_before - centre_after).abs() < 1e-9);
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut controller = controller();
    let before = controller.transform().invert_x(200.0);
    assert!(controller.wheel(200.0, -250.0));
    assert!(controller.scale() > 1.0);
    let after = controller.transform().invert_x(200.0);
    assert!((before - after).abs() < 1e-9);
}

#[test]
fn pan_moves_translation_only() {
    let mut controller = controller();
    assert!(controller.pan_by(30.0));
    assert_eq!(controller.transform(), ViewTransform::new(30.0, 1.0));
    assert!(!controller.pan_by(0.0));
}

#[test]
fn reset_reports_change_once() {
    let mut controller = controller();
    controller.zoom_in();
    assert!(controller.reset());
    assert!(!controller.reset());
}

#[test]
fn rescale_leaves_base_untouched() {
    let base = LinearScale::new((0.0, 1000.0), (0.0, 500.0));
    let view = ViewTransform::new(-250.0, 2.0);
    let effective = view.rescale(&base);
    assert_eq!(base.domain(), (0.0, 1000.0));
    assert_eq!(effective.range(), base.range());
    assert!((effective.domain().0 - 250.0).abs() < 1e-9);
    assert!((effective.domain().1 - 750.0).abs() < 1e-9);
}

#[quickcheck]
fn scale_stays_within_bounds(ops: Vec<(u8, i16)>) -> bool {
    let mut controller = controller();
    ops.into_iter().all(|(op, amount)| {
        match op % 4 {
            0 => controller.zoom_in(),
            1 => controller.zoom_out(),
            2 => controller.wheel(amount.unsigned_abs() as f64 % 710.0, amount as f64 * 4.0),
            _ => controller.pan_by(amount as f64),
        };
        let k = controller.scale();
        (0.5..=10.0).contains(&k)
    })
}

#![cfg(target_arch = "wasm32")]

use price_chart_annotate::domain::chart::{Chart, ChartConfig, ContainerSize};
use price_chart_annotate::domain::market_data::Candle;
use price_chart_annotate::infrastructure::rendering::CanvasRenderer;
use price_chart_annotate::presentation::PriceChart;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().and_then(|w| w.document()).expect("document");
    let canvas = document
        .create_element("canvas")
        .expect("create canvas")
        .dyn_into::<HtmlCanvasElement>()
        .expect("canvas element");
    canvas.set_id(id);
    document.body().expect("body").append_child(&canvas).expect("append");
    canvas
}

#[wasm_bindgen_test]
fn paints_scene_and_sizes_canvas() {
    let target = canvas("canvas-render-test");
    let candles = (0..20)
        .map(|i| Candle::from_values(i * 60_000, 10.0, 11.0, 9.0, 10.5, 100.0))
        .collect();
    let mut chart = Chart::new("canvas".to_string(), ChartConfig::default(), ContainerSize::new(500.0, 300.0));
    chart.replace_candles(Arc::new(candles));
    chart.flush();

    let result = CanvasRenderer::new("canvas-render-test".to_string()).render(chart.scene());
    assert!(result.is_ok());
    assert_eq!(target.width(), chart.scene().layout().svg_width().ceil() as u32);
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    let chart = Chart::new("canvas".to_string(), ChartConfig::default(), ContainerSize::new(500.0, 300.0));
    assert!(CanvasRenderer::new("no-such-canvas".to_string()).render(chart.scene()).is_err());
}

#[wasm_bindgen_test]
fn wasm_handle_loads_demo_and_zooms() {
    canvas("wasm-handle-test");
    let handle = PriceChart::new(800.0, 500.0, None).expect("chart");
    assert_eq!(handle.load_demo("msft", "1H").expect("demo"), 100);
    assert_eq!(handle.candle_count(), 100);

    handle.zoom_in();
    assert!((handle.zoom_level() - 1.2).abs() < 1e-9);
    handle.reset_zoom();
    assert_eq!(handle.zoom_level(), 1.0);

    assert!(handle.render_svg().contains(r#"class="candle""#));
    assert!(handle.render_to_canvas("wasm-handle-test".to_string()).is_ok());
    assert_eq!(handle.drawings_json().expect("json"), "[]");
    assert!(handle.select_tool(Some("bogus".to_string())).is_err());

    handle.start_stream(None);
    handle.stop_stream();
    assert!(!handle.is_streaming());
    handle.start_stream(None);
    assert!(handle.is_streaming());
    handle.stop_stream();
}

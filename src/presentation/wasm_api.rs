use futures::StreamExt;
use gloo_timers::future::IntervalStream;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

use crate::application::{ChartCoordinator, ChartHandle, SimulatedFeedUseCase, StreamControl};
use crate::domain::{
    chart::{Chart, ChartConfig, ChartMode, ContainerSize, drawing::ToolId},
    errors::AppError,
    events::{ChartCommand, CommandChannel, DomainEvent},
    logging::{LogComponent, get_logger},
    market_data::{Candle, Symbol, Timeframe, services::FeedConfig},
};
use crate::infrastructure::rendering::{CanvasRenderer, SvgRenderer};
use crate::log_error;

fn to_js(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn call_js(callback: &js_sys::Function, arg: &JsValue, what: &str) {
    if let Err(err) = callback.call1(&JsValue::NULL, arg) {
        get_logger().warn(
            LogComponent::Presentation("PriceChart"),
            &format!("{} callback failed: {:?}", what, err),
        );
    }
}

/// JavaScript handle to one chart. Commands run immediately and leave the
/// scene up to date, so `renderSvg`/`renderToCanvas` can follow any call.
/// Event callbacks run after the chart is released and may call back in.
#[wasm_bindgen]
pub struct PriceChart {
    chart: ChartHandle,
    commands: CommandChannel,
    feed: Rc<RefCell<SimulatedFeedUseCase>>,
    stream: StreamControl,
    svg: SvgRenderer,
}

#[wasm_bindgen]
impl PriceChart {
    /// `config_json` is an optional partial `ChartConfig`; missing fields
    /// take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: Option<String>) -> Result<PriceChart, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(&json).map_err(to_js)?,
            None => ChartConfig::default(),
        };
        let container = ContainerSize { width, height };
        let commands = CommandChannel::new();
        let chart = Chart::new("wasm-chart".to_string(), config, container);
        let coordinator = ChartCoordinator::new(chart, commands.clone());

        Ok(Self {
            chart: ChartHandle::new(coordinator),
            commands,
            feed: Rc::new(RefCell::new(SimulatedFeedUseCase::new(FeedConfig::default(), js_sys::Date::now() as u64))),
            stream: StreamControl::new(),
            svg: SvgRenderer::new("wasm-chart-plot"),
        })
    }

    /// Replaces the candles with a JSON array of
    /// `{timestamp, open, high, low, close, volume}` objects
    #[wasm_bindgen(js_name = setCandles)]
    pub fn set_candles(&self, json: &str) -> Result<usize, JsValue> {
        let candles: Vec<Candle> = serde_json::from_str(json).map_err(|err| to_js(err.into()))?;
        let count = candles.len();
        self.chart.update(|c| c.load_candles(Arc::new(candles))).map_err(to_js)?;
        Ok(count)
    }

    /// Generates a simulated history for a ticker and timeframe tag
    #[wasm_bindgen(js_name = loadDemo)]
    pub fn load_demo(&self, symbol: &str, timeframe: &str) -> Result<usize, JsValue> {
        let symbol = Symbol::new(symbol.to_string()).map_err(|err| JsValue::from_str(&err))?;
        let snapshot = self
            .feed
            .borrow_mut()
            .bootstrap(symbol, Timeframe::parse(timeframe), js_sys::Date::now() as i64);
        let count = snapshot.candles.len();
        self.chart.update(|c| c.load_snapshot(snapshot)).map_err(to_js)?;
        Ok(count)
    }

    /// Streams simulated ticks into the chart. `on_update` is called with
    /// the candle count after each accepted tick.
    #[wasm_bindgen(js_name = startStream)]
    pub fn start_stream(&self, on_update: Option<js_sys::Function>) {
        let Some(token) = self.stream.start() else {
            return;
        };
        let chart = self.chart.clone();
        let feed = self.feed.clone();
        let interval = feed.borrow().config().tick_interval_ms;

        wasm_bindgen_futures::spawn_local(async move {
            let mut ticks = IntervalStream::new(interval);
            while ticks.next().await.is_some() && token.is_current() {
                let Some(snapshot) = feed.borrow_mut().tick() else {
                    continue;
                };
                let count = snapshot.candles.len();
                if chart.update(|c| c.load_candles(snapshot.candles)).is_err() {
                    continue;
                }
                if let Some(callback) = on_update.as_ref() {
                    call_js(callback, &JsValue::from(count as u32), "Update");
                }
            }
        });
    }

    #[wasm_bindgen(js_name = stopStream)]
    pub fn stop_stream(&self) {
        self.stream.stop();
    }

    #[wasm_bindgen(js_name = isStreaming)]
    pub fn is_streaming(&self) -> bool {
        self.stream.is_running()
    }

    /// Registers a callback receiving the name of every chart event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) {
        self.chart.listen(move |event| {
            call_js(&callback, &JsValue::from_str(event.event_type()), "Event");
        });
    }

    /// `tool` is one of `trendline`, `horizontalLine`, `fibRetracement`,
    /// `pencil`; `None` deselects
    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&self, tool: Option<String>) -> Result<(), JsValue> {
        let tool = match tool {
            Some(name) => Some(
                name.parse::<ToolId>()
                    .map_err(|_| JsValue::from_str(&format!("Unknown tool: {}", name)))?,
            ),
            None => None,
        };
        self.send(ChartCommand::SelectTool(tool));
        Ok(())
    }

    /// `candle` or `line`
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode = mode
            .parse::<ChartMode>()
            .map_err(|_| JsValue::from_str(&format!("Unknown chart mode: {}", mode)))?;
        self.send(ChartCommand::SetMode(mode));
        Ok(())
    }

    #[wasm_bindgen(js_name = clearDrawings)]
    pub fn clear_drawings(&self) {
        self.send(ChartCommand::ClearDrawings);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&self) {
        self.send(ChartCommand::ZoomIn);
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&self) {
        self.send(ChartCommand::ZoomOut);
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&self) {
        self.send(ChartCommand::ResetZoom);
    }

    /// Pointer coordinates are relative to the chart container
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64) {
        self.chart.update(|c| c.pointer_down(x, y));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) {
        self.chart.update(|c| c.pointer_move(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) {
        self.chart.update(|c| c.pointer_up());
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) {
        self.chart.update(|c| c.pointer_leave());
    }

    /// Returns whether the zoom changed
    pub fn wheel(&self, x: f64, y: f64, delta_y: f64) -> bool {
        self.chart.update(|c| c.wheel(x, y, delta_y))
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.chart.update(|c| {
            c.chart_mut().resize(ContainerSize { width, height });
            c.flush();
        });
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> String {
        self.chart.read(|c| self.svg.render(c.chart().scene()))
    }

    #[wasm_bindgen(js_name = renderToCanvas)]
    pub fn render_to_canvas(&self, canvas_id: String) -> Result<(), JsValue> {
        let renderer = CanvasRenderer::new(canvas_id);
        self.chart
            .read(|c| renderer.render(c.chart().scene()))
            .map_err(|err| {
                log_error!(LogComponent::Presentation("PriceChart"), "Canvas render failed: {}", err);
                to_js(err)
            })
    }

    /// Committed drawings as a JSON array
    #[wasm_bindgen(js_name = drawingsJson)]
    pub fn drawings_json(&self) -> Result<String, JsValue> {
        self.chart
            .read(|c| serde_json::to_string(c.chart().drawings()))
            .map_err(|err| to_js(err.into()))
    }

    #[wasm_bindgen(js_name = zoomLevel)]
    pub fn zoom_level(&self) -> f64 {
        self.chart.read(|c| c.chart().view_transform().k)
    }

    #[wasm_bindgen(js_name = candleCount)]
    pub fn candle_count(&self) -> usize {
        self.chart.read(|c| c.chart().candles().len())
    }

    /// Applies one simulated tick; returns the candle count
    pub fn tick(&self) -> Result<usize, JsValue> {
        let snapshot = self
            .feed
            .borrow_mut()
            .tick()
            .ok_or_else(|| JsValue::from_str("call loadDemo before tick"))?;
        let count = snapshot.candles.len();
        self.chart.update(|c| c.load_candles(snapshot.candles)).map_err(to_js)?;
        Ok(count)
    }

    fn send(&self, command: ChartCommand) {
        self.commands.send(command);
        self.chart.update(|c| c.process_commands());
    }
}

use super::config::ChartConfig;
use super::drawing::{DraftGesture, Drawing, DrawingContext, DrawingEngine, ToolId};
use super::render::{axis, drawing_pass, mode_pass, static_pass};
use super::scales::{LinearScale, ScaleSet};
use super::scene::{LayerId, Scene};
use super::transform::{TransformController, ViewTransform};
use super::value_objects::{ChartMode, ContainerSize, Layout, Point};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Candle, Timeframe};
use crate::domain::state::MarketSnapshot;
use crate::log_debug;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Immutable inputs shared by every pass for one data revision: layout,
/// scales (absent for an empty series) and the timeframe for tick labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContext {
    pub layout: Layout,
    pub scales: Option<ScaleSet>,
    pub timeframe: Timeframe,
}

impl ChartContext {
    pub fn build(candles: &[Candle], layout: Layout, timeframe: Timeframe) -> Self {
        Self { scales: ScaleSet::compute(candles, &layout), layout, timeframe }
    }
}

/// Pending work, one flag per independent reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    /// Candles, timeframe or size changed: scales, static and mode passes
    pub data: bool,
    /// Chart mode changed: mode pass only
    pub mode: bool,
    /// Annotation store changed: drawings layer only
    pub drawings: bool,
    /// Draft gesture changed: preview layer only
    pub gesture: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.data || self.mode || self.drawings || self.gesture
    }
}

/// How many times each pass has run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub scale_runs: u64,
    pub static_passes: u64,
    pub mode_passes: u64,
    pub drawing_passes: u64,
    pub preview_passes: u64,
    pub view_updates: u64,
}

/// Effect of one pointer event
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    /// The draft gesture moved or started
    Gesture,
    /// The view was panned
    Panned,
    Committed(Drawing),
}

/// The chart aggregate: market input, scene, view transform and drawing
/// engine, with dirty flags deciding which passes `flush` runs.
#[derive(Debug, Clone)]
pub struct Chart {
    pub id: String,
    config: ChartConfig,
    market: MarketSnapshot,
    mode: ChartMode,
    context: Arc<ChartContext>,
    scene: Scene,
    transform: TransformController,
    drawing: DrawingEngine,
    pan_anchor: Option<f64>,
    dirty: DirtyFlags,
    stats: RenderStats,
}

impl Chart {
    pub fn new(id: String, config: ChartConfig, container: ContainerSize) -> Self {
        let layout = Layout::new(container, config.margin, config.toolbar_reserve);
        let mut transform = TransformController::new(config.zoom);
        transform.set_extent(layout.plot.width);
        Self {
            id,
            market: MarketSnapshot::default(),
            mode: ChartMode::default(),
            context: Arc::new(ChartContext::build(&[], layout, Timeframe::default())),
            scene: Scene::new(layout),
            transform,
            drawing: DrawingEngine::new(),
            pan_anchor: None,
            dirty: DirtyFlags { data: true, ..DirtyFlags::default() },
            stats: RenderStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn market(&self) -> &MarketSnapshot {
        &self.market
    }

    pub fn candles(&self) -> &[Candle] {
        &self.market.candles
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn context(&self) -> &ChartContext {
        &self.context
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn drawings(&self) -> &[Drawing] {
        self.drawing.store().drawings()
    }

    pub fn draft(&self) -> &DraftGesture {
        self.drawing.draft()
    }

    pub fn active_tool(&self) -> Option<ToolId> {
        self.drawing.active_tool()
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.transform.transform()
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// The base time scale seen through the current view
    pub fn effective_time_scale(&self) -> Option<LinearScale> {
        self.context
            .scales
            .as_ref()
            .map(|scales| self.transform.effective_time_scale(&scales.time))
    }

    /// Replaces candles, symbol and timeframe at once
    pub fn set_market(&mut self, market: MarketSnapshot) {
        self.market = market;
        self.dirty.data = true;
    }

    /// Swaps in a new candle array; the draft gesture is not touched
    pub fn replace_candles(&mut self, candles: Arc<Vec<Candle>>) {
        self.market.candles = candles;
        self.dirty.data = true;
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        if self.market.timeframe != timeframe {
            self.market.timeframe = timeframe;
            self.dirty.data = true;
        }
    }

    pub fn resize(&mut self, container: ContainerSize) {
        let layout = Layout::new(container, self.config.margin, self.config.toolbar_reserve);
        if layout == self.context.layout {
            return;
        }
        self.context = Arc::new(ChartContext { layout, ..(*self.context).clone() });
        self.dirty.data = true;
        self.dirty.drawings = true;
        self.dirty.gesture = true;
    }

    pub fn set_mode(&mut self, mode: ChartMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.dirty.mode = true;
        true
    }

    pub fn select_tool(&mut self, tool: Option<ToolId>) -> bool {
        self.pan_anchor = None;
        let changed = self.drawing.select_tool(tool);
        if changed {
            self.dirty.gesture = true;
        }
        changed
    }

    pub fn clear_drawings(&mut self) {
        self.drawing.clear_all();
        self.dirty.drawings = true;
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.transform.zoom_in();
        self.after_view_change(changed)
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.transform.zoom_out();
        self.after_view_change(changed)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.transform.reset();
        self.after_view_change(changed)
    }

    /// Wheel zoom anchored at the pointer (container coordinates)
    pub fn wheel(&mut self, container_x: f64, container_y: f64, delta_y: f64) -> bool {
        if !(container_x.is_finite() && container_y.is_finite() && delta_y.is_finite()) {
            return false;
        }
        let plot = self.context.layout.to_plot(container_x, container_y);
        let changed = self.transform.wheel(plot.x, delta_y);
        self.after_view_change(changed)
    }

    /// With a tool selected this starts a gesture, otherwise a drag pan.
    /// Coordinates are relative to the container; non-finite ones are ignored.
    pub fn pointer_down(&mut self, container_x: f64, container_y: f64) -> PointerOutcome {
        if !(container_x.is_finite() && container_y.is_finite()) {
            return PointerOutcome::Ignored;
        }
        let plot = self.context.layout.to_plot(container_x, container_y);
        if self.drawing.active_tool().is_none() {
            self.pan_anchor = Some(plot.x);
            return PointerOutcome::Ignored;
        }
        if self.drawing.pointer_down(self.to_pre_zoom(plot)) {
            self.dirty.gesture = true;
            PointerOutcome::Gesture
        } else {
            PointerOutcome::Ignored
        }
    }

    pub fn pointer_move(&mut self, container_x: f64, container_y: f64) -> PointerOutcome {
        if !(container_x.is_finite() && container_y.is_finite()) {
            return PointerOutcome::Ignored;
        }
        let plot = self.context.layout.to_plot(container_x, container_y);
        if self.drawing.draft().is_active() {
            if self.drawing.pointer_move(self.to_pre_zoom(plot)) {
                self.dirty.gesture = true;
                return PointerOutcome::Gesture;
            }
            return PointerOutcome::Ignored;
        }
        let Some(anchor) = self.pan_anchor else {
            return PointerOutcome::Ignored;
        };
        self.pan_anchor = Some(plot.x);
        let changed = self.transform.pan_by(plot.x - anchor);
        if self.after_view_change(changed) { PointerOutcome::Panned } else { PointerOutcome::Ignored }
    }

    pub fn pointer_up(&mut self) -> PointerOutcome {
        self.pan_anchor = None;
        if !self.drawing.draft().is_active() {
            return PointerOutcome::Ignored;
        }
        let context = DrawingContext {
            plot_width: self.context.layout.plot.width,
            price: self.context.scales.as_ref().map(|scales| &scales.price),
            candles: &self.market.candles,
        };
        let committed = self.drawing.pointer_up(&context);
        self.dirty.gesture = true;
        match committed {
            Some(drawing) => {
                self.dirty.drawings = true;
                log_debug!(LogComponent::Domain("Chart"), "committed {} drawing", drawing.tool());
                PointerOutcome::Committed(drawing)
            }
            None => PointerOutcome::Ignored,
        }
    }

    /// Pointer left the chart: a drag pan ends, a drawing gesture is kept
    pub fn pointer_leave(&mut self) {
        self.pan_anchor = None;
    }

    /// Runs only the passes whose inputs changed and returns what ran
    pub fn flush(&mut self) -> DirtyFlags {
        let dirty = std::mem::take(&mut self.dirty);
        if !dirty.any() {
            return dirty;
        }

        if dirty.data {
            let layout = self.context.layout;
            self.context = Arc::new(ChartContext::build(&self.market.candles, layout, self.market.timeframe.clone()));
            self.transform.set_extent(layout.plot.width);
            self.stats.scale_runs += 1;

            static_pass::run(&mut self.scene, &self.context, &self.market.candles, &self.config);
            self.stats.static_passes += 1;
        }

        if dirty.data || dirty.mode {
            mode_pass::run(&mut self.scene, &self.context, &self.market.candles, self.mode, &self.config);
            self.stats.mode_passes += 1;
        }

        if dirty.data {
            self.apply_view();
        }

        if dirty.drawings {
            drawing_pass::render_drawings(&mut self.scene, self.drawing.store().drawings(), &self.config.palette);
            self.stats.drawing_passes += 1;
        }

        if dirty.gesture {
            let context = DrawingContext {
                plot_width: self.context.layout.plot.width,
                price: self.context.scales.as_ref().map(|scales| &scales.price),
                candles: &self.market.candles,
            };
            let preview = self.drawing.preview(&context);
            drawing_pass::render_preview(&mut self.scene, preview.as_ref(), &self.config.palette);
            self.stats.preview_passes += 1;
        }

        log_debug!(
            LogComponent::Domain("Chart"),
            "flush data={} mode={} drawings={} gesture={}",
            dirty.data,
            dirty.mode,
            dirty.drawings,
            dirty.gesture
        );
        dirty
    }

    fn to_pre_zoom(&self, plot: Point) -> Point {
        Point::new(self.transform.transform().invert_x(plot.x), plot.y)
    }

    fn after_view_change(&mut self, changed: bool) -> bool {
        if changed {
            self.apply_view();
        }
        changed
    }

    /// Moves zoomable layers and rebuilds the x axis from the rescaled time
    /// scale. The base scales are left as they are.
    fn apply_view(&mut self) {
        let view = self.transform.transform();
        for id in LayerId::iter().filter(LayerId::follows_view) {
            self.scene.layer_mut(id).set_view(view);
        }
        if let Some(scales) = self.context.scales.as_ref() {
            let effective = self.transform.effective_time_scale(&scales.time);
            axis::build_x_axis(
                self.scene.layer_mut(LayerId::XAxis),
                &effective,
                &self.context.timeframe,
                &self.config,
            );
        }
        self.stats.view_updates += 1;
    }
}

use futures::StreamExt;
use gloo_timers::future::IntervalStream;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

use crate::{
    application::{ChartCoordinator, ChartHandle, SimulatedFeedUseCase, StreamControl},
    domain::{
        chart::{Chart, ChartConfig, ChartMode, ContainerSize, PointerOutcome, drawing::ToolId},
        events::{ChartCommand, ChartEvent, CommandChannel},
        logging::{LogComponent, LogEntry, LogLevel, Logger, get_logger},
        market_data::{
            OrderBook, OrderLevel, Symbol, Timeframe,
            services::{DEMO_SYMBOLS, FeedConfig},
        },
    },
    event_utils::{EventListenerHandle, EventOptions, event_listener_with_options, window_event_listener_with_options},
    global_state::{
        active_tool, candle_count, chart_mode, chart_svg, current_price, drawing_count, is_streaming, logs,
        logs_paused, order_book, price_up, status, symbol, timeframe, zoom_level,
    },
    infrastructure::rendering::SvgRenderer,
};

const MAX_LOG_LINES: usize = 100;
const DASHBOARD_CHART_ID: &str = "dashboard";

/// Mirrors entries into the debug console and forwards them to `inner`,
/// each side applying its own level
pub struct LeptosLogger<L: Logger> {
    inner: L,
    min_level: LogLevel,
}

impl<L: Logger> LeptosLogger<L> {
    pub fn new(inner: L, min_level: LogLevel) -> Self {
        Self { inner, min_level }
    }
}

impl<L: Logger> Logger for LeptosLogger<L> {
    fn log(&self, entry: LogEntry) {
        if entry.level >= self.min_level && !logs_paused().get_untracked() {
            let line = entry.format_line();
            logs().update(|lines| {
                lines.push(line);
                if lines.len() > MAX_LOG_LINES {
                    let excess = lines.len() - MAX_LOG_LINES;
                    lines.drain(..excess);
                }
            });
        }
        if entry.level >= self.inner.min_level() {
            self.inner.log(entry);
        }
    }

    fn min_level(&self) -> LogLevel {
        self.min_level.min(self.inner.min_level())
    }
}

/// Re-serializes the scene into the signal the chart surface renders
fn publish_scene(chart: &ChartHandle, renderer: &SvgRenderer) {
    let svg = chart.read(|c| renderer.render(c.chart().scene()));
    chart_svg().set(svg);
}

/// Pointer position relative to the element the listener is attached to
fn surface_position(event: &web_sys::MouseEvent) -> Option<(f64, f64)> {
    let element = event.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = element.get_bounding_client_rect();
    Some((event.client_x() as f64 - rect.left(), event.client_y() as f64 - rect.top()))
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Demo dashboard: header, toolbars, chart and a log console
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>{DASHBOARD_CSS}</style>
        <div class="price-chart-app">
            <Header />
            <div class="workspace">
                <div class="chart-column">
                    <ChartWorkspace />
                </div>
                <OrderBookPanel />
            </div>
            <DebugConsole />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    view! {
        <div class="header">
            <h1>{move || format!("{} • {}", symbol().get(), timeframe().get())}</h1>
            <div class="price-info">
                <div class="price-item">
                    <div class="price-value" class:down=move || !price_up().get()>
                        {move || {
                            let arrow = if price_up().get() { "▲" } else { "▼" };
                            format!("{} ${:.2}", arrow, current_price().get())
                        }}
                    </div>
                    <div class="price-label">"Last Price"</div>
                </div>
                <div class="price-item">
                    <div class="price-value">{move || candle_count().get().to_string()}</div>
                    <div class="price-label">"Candles"</div>
                </div>
                <div class="price-item">
                    <div class="price-value">{move || format!("{:.2}x", zoom_level().get())}</div>
                    <div class="price-label">"Zoom"</div>
                </div>
                <div class="price-item">
                    <div class="price-value">{move || drawing_count().get().to_string()}</div>
                    <div class="price-label">"Drawings"</div>
                </div>
                <div class="price-item">
                    <button class="stream-btn" on:click=move |_| is_streaming().update(|on| *on = !*on)>
                        {move || if is_streaming().get() { "● LIVE" } else { "○ PAUSED" }}
                    </button>
                    <div class="price-label">"Feed"</div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn MarketSelectors() -> impl IntoView {
    view! {
        <div class="selectors">
            <select on:change=move |ev| symbol().set(event_target_value(&ev))>
                {DEMO_SYMBOLS
                    .iter()
                    .map(|name| {
                        let name = name.to_string();
                        let value = name.clone();
                        view! {
                            <option value=value.clone() selected=move || symbol().get() == value>
                                {name}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select on:change=move |ev| timeframe().set(event_target_value(&ev))>
                {Timeframe::known()
                    .into_iter()
                    .map(|tf| {
                        let tag = tf.to_string();
                        let value = tag.clone();
                        view! {
                            <option value=value.clone() selected=move || timeframe().get() == value>
                                {tag}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn ModeTabs(on_command: Callback<ChartCommand>) -> impl IntoView {
    view! {
        <div class="mode-tabs">
            {ChartMode::iter()
                .map(|mode| {
                    view! {
                        <button
                            class="tab"
                            class:active=move || chart_mode().get() == mode
                            on:click=move |_| on_command.call(ChartCommand::SetMode(mode))
                        >
                            {mode.to_string()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn DrawingToolbar(on_command: Callback<ChartCommand>) -> impl IntoView {
    view! {
        <div class="drawing-toolbar">
            {ToolId::iter()
                .map(|tool| {
                    view! {
                        <button
                            class="tool-btn"
                            title=tool.label()
                            class:active=move || active_tool().get() == Some(tool)
                            on:click=move |_| {
                                let next = if active_tool().get_untracked() == Some(tool) { None } else { Some(tool) };
                                on_command.call(ChartCommand::SelectTool(next));
                            }
                        >
                            {tool.label()}
                        </button>
                    }
                })
                .collect_view()}
            <span class="separator" />
            <button class="tool-btn" on:click=move |_| on_command.call(ChartCommand::ClearDrawings)>"Clear"</button>
            <button class="tool-btn" on:click=move |_| on_command.call(ChartCommand::ZoomIn)>"+"</button>
            <button class="tool-btn" on:click=move |_| on_command.call(ChartCommand::ZoomOut)>"−"</button>
            <button class="tool-btn" on:click=move |_| on_command.call(ChartCommand::ResetZoom)>"Reset"</button>
        </div>
    }
}

#[component]
fn OrderBookPanel() -> impl IntoView {
    let level_row = |class: &'static str| {
        move |level: OrderLevel| {
            view! {
                <div class="book-row">
                    <span class=class>{format!("${:.2}", level.price)}</span>
                    <span>{level.size.to_string()}</span>
                </div>
            }
        }
    };
    view! {
        <div class="order-book">
            <h2>"Order Book"</h2>
            <div class="book-row book-head">
                <span>"Price"</span>
                <span>"Size"</span>
            </div>
            {move || {
                let book = order_book().get();
                let spread = book_spread_label(&book);
                let asks = book.asks.into_iter().rev().map(level_row("ask")).collect_view();
                let bids = book.bids.into_iter().map(level_row("bid")).collect_view();
                view! {
                    {asks}
                    <div class="book-spread">{spread}</div>
                    {bids}
                }
            }}
        </div>
    }
}

fn book_spread_label(book: &OrderBook) -> String {
    match book.spread() {
        Some(spread) => format!("Spread {:.2}", spread),
        None => "No quotes".to_string(),
    }
}

/// Subscribes the dashboard signals to the chart's events
fn wire_signals(chart: &ChartHandle) {
    chart.listen(|event| match event {
        ChartEvent::DataUpdated { candle_count: count, .. } => {
            candle_count().set(*count);
            status().set(format!("Rendered {} candles", count));
        }
        ChartEvent::DataRejected { reason, .. } => status().set(format!("Update rejected: {}", reason)),
        ChartEvent::ToolChanged { tool, .. } => active_tool().set(*tool),
        ChartEvent::DrawingCommitted { .. } => drawing_count().update(|count| *count += 1),
        ChartEvent::DrawingsCleared { .. } => drawing_count().set(0),
        ChartEvent::ModeChanged { mode, .. } => chart_mode().set(*mode),
        ChartEvent::ViewChanged { transform, .. } => zoom_level().set(transform.k),
    });
}

/// Header price and colour from the last candle, order book around it
fn update_price(chart: &ChartHandle, feed: &RefCell<SimulatedFeedUseCase>) {
    let Some(last) = chart.read(|c| c.chart().candles().last().copied()) else {
        return;
    };
    current_price().set(last.ohlcv.close.value());
    price_up().set(last.is_bullish());
    if let Some(book) = feed.borrow_mut().order_book() {
        order_book().set(book);
    }
}

#[component]
fn ChartWorkspace() -> impl IntoView {
    let config = ChartConfig::default();
    let feed_config = FeedConfig::default();
    let tick_interval = feed_config.tick_interval_ms;

    let channel = CommandChannel::new();
    let chart = Chart::new(DASHBOARD_CHART_ID.to_string(), config, ContainerSize::default());
    let chart = ChartHandle::new(ChartCoordinator::new(chart, channel.clone()));
    let feed = Rc::new(RefCell::new(SimulatedFeedUseCase::new(feed_config, js_sys::Date::now() as u64)));
    let renderer = Rc::new(SvgRenderer::new("dashboard-plot"));
    wire_signals(&chart);

    let on_command = {
        let chart = chart.clone();
        let renderer = renderer.clone();
        Callback::new(move |command: ChartCommand| {
            channel.send(command);
            chart.update(|c| c.process_commands());
            publish_scene(&chart, &renderer);
        })
    };

    // Symbol or timeframe changed: regenerate the history
    {
        let chart = chart.clone();
        let feed = feed.clone();
        let renderer = renderer.clone();
        create_effect(move |_| {
            let tag = timeframe().get();
            let symbol = match Symbol::new(symbol().get()) {
                Ok(symbol) => symbol,
                Err(err) => {
                    status().set(err);
                    return;
                }
            };
            let snapshot = feed.borrow_mut().bootstrap(symbol, Timeframe::parse(&tag), now_ms());
            if chart.update(|c| c.load_snapshot(snapshot)).is_ok() {
                update_price(&chart, &feed);
            }
            publish_scene(&chart, &renderer);
        });
    }

    // Streaming updates; the loop ends when the workspace is cleaned up
    let stream = StreamControl::new();
    if let Some(token) = stream.start() {
        let chart = chart.clone();
        let renderer = renderer.clone();
        is_streaming().set(true);
        spawn_local(async move {
            let mut ticks = IntervalStream::new(tick_interval);
            while ticks.next().await.is_some() {
                if !token.is_current() {
                    break;
                }
                if !is_streaming().get_untracked() {
                    continue;
                }
                let Some(snapshot) = feed.borrow_mut().tick() else {
                    continue;
                };
                if chart.update(|c| c.load_candles(snapshot.candles)).is_ok() {
                    update_price(&chart, &feed);
                    publish_scene(&chart, &renderer);
                }
            }
            get_logger().info(LogComponent::Presentation("ChartWorkspace"), "Feed loop stopped");
        });
    }

    let surface = create_node_ref::<html::Div>();
    let listeners: Rc<RefCell<Vec<EventListenerHandle>>> = Rc::new(RefCell::new(Vec::new()));

    // Wheel needs a non-passive listener so the page does not scroll
    {
        let chart = chart.clone();
        let renderer = renderer.clone();
        let listeners = listeners.clone();
        surface.on_load(move |el| {
            let handle = event_listener_with_options(
                el.unchecked_ref::<web_sys::EventTarget>(),
                ev::wheel,
                &EventOptions::active(),
                move |event: web_sys::WheelEvent| {
                    event.prevent_default();
                    let Some((x, y)) = surface_position(&event) else {
                        return;
                    };
                    if chart.update(|c| c.wheel(x, y, event.delta_y())) {
                        publish_scene(&chart, &renderer);
                    }
                },
            );
            listeners.borrow_mut().push(handle);
        });
    }

    // Releasing the button anywhere ends a gesture or pan
    {
        let chart = chart.clone();
        let renderer = renderer.clone();
        let handle = window_event_listener_with_options(ev::mouseup, &EventOptions::default(), move |_: web_sys::MouseEvent| {
            let outcome = chart.update(|c| c.pointer_up());
            if outcome != PointerOutcome::Ignored {
                publish_scene(&chart, &renderer);
            }
        });
        listeners.borrow_mut().extend(handle);
    }

    on_cleanup(move || {
        stream.stop();
        for handle in listeners.borrow_mut().drain(..) {
            handle.remove();
        }
    });

    let on_mouse_down = {
        let chart = chart.clone();
        let renderer = renderer.clone();
        move |event: web_sys::MouseEvent| {
            if let Some((x, y)) = surface_position(&event) {
                chart.update(|c| c.pointer_down(x, y));
                publish_scene(&chart, &renderer);
            }
        }
    };
    let on_mouse_move = {
        let chart = chart.clone();
        let renderer = renderer.clone();
        move |event: web_sys::MouseEvent| {
            let Some((x, y)) = surface_position(&event) else {
                return;
            };
            let outcome = chart.update(|c| c.pointer_move(x, y));
            if outcome != PointerOutcome::Ignored {
                publish_scene(&chart, &renderer);
            }
        }
    };
    let on_mouse_leave = move |_: web_sys::MouseEvent| chart.update(|c| c.pointer_leave());

    view! {
        <div class="toolbar-row">
            <MarketSelectors />
            <ModeTabs on_command=on_command />
        </div>
        <DrawingToolbar on_command=on_command />
        <div
            class="chart-surface"
            node_ref=surface
            class:drawing=move || active_tool().get().is_some()
            on:mousedown=on_mouse_down
            on:mousemove=on_mouse_move
            on:mouseleave=on_mouse_leave
            inner_html=move || chart_svg().get()
        />
        <div class="status">{move || status().get()}</div>
    }
}

#[component]
fn DebugConsole() -> impl IntoView {
    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Log"</span>
                <button
                    class="debug-btn"
                    on:click=move |_| {
                        logs_paused().update(|paused| *paused = !*paused);
                        get_logger().info(
                            LogComponent::Presentation("DebugConsole"),
                            if logs_paused().get_untracked() { "Logging paused" } else { "Logging resumed" },
                        );
                    }
                >
                    {move || if logs_paused().get() { "Resume" } else { "Pause" }}
                </button>
                <button class="debug-btn" on:click=move |_| logs().set(Vec::new())>
                    "Clear"
                </button>
            </div>
            <div class="debug-log">
                {move || {
                    logs()
                        .get()
                        .into_iter()
                        .map(|line| view! { <div class="log-line">{line}</div> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

const DASHBOARD_CSS: &str = r#"
.price-chart-app {
    font-family: -apple-system, BlinkMacSystemFont, sans-serif;
    background: #111827;
    min-height: 100vh;
    padding: 20px;
    color: white;
}
.header {
    text-align: center;
    margin-bottom: 16px;
    background: rgba(255, 255, 255, 0.05);
    padding: 16px;
    border-radius: 12px;
}
.price-info { display: flex; justify-content: center; gap: 40px; margin-top: 12px; }
.price-item { text-align: center; }
.price-value { font-size: 22px; font-weight: 700; color: #22c55e; font-family: 'Courier New', monospace; }
.price-value.down { color: #ef4444; }
.price-label { font-size: 12px; color: #9ca3af; margin-top: 4px; }
.toolbar-row { display: flex; justify-content: space-between; margin-bottom: 8px; }
.selectors select { margin-right: 8px; background: #1f2937; color: white; border: 1px solid #374151; padding: 4px; }
.tab, .tool-btn, .stream-btn, .debug-btn {
    background: #1f2937;
    color: white;
    border: 1px solid #374151;
    padding: 5px 10px;
    border-radius: 5px;
    cursor: pointer;
    font-size: 12px;
    margin-left: 4px;
}
.tab.active, .tool-btn.active { background: #3b82f6; border-color: #3b82f6; }
.drawing-toolbar { margin-bottom: 8px; }
.separator { display: inline-block; width: 12px; }
.chart-surface { background: #1f2937; border-radius: 8px; display: inline-block; cursor: grab; user-select: none; }
.chart-surface.drawing { cursor: crosshair; }
.status { color: #9ca3af; font-size: 13px; margin: 8px 0; }
.debug-console { background: rgba(0, 0, 0, 0.6); border-radius: 8px; padding: 12px; max-height: 240px; overflow-y: auto; }
.debug-header { display: flex; justify-content: space-between; margin-bottom: 8px; color: #22c55e; font-weight: bold; }
.debug-log { font-family: 'Courier New', monospace; font-size: 11px; line-height: 1.3; }
.log-line { color: #e5e7eb; margin: 2px 0; }
.workspace { display: flex; gap: 16px; align-items: flex-start; }
.chart-column { flex: 1; }
.order-book { background: rgba(255, 255, 255, 0.05); border-radius: 8px; padding: 12px; min-width: 180px; }
.order-book h2 { font-size: 16px; margin: 0 0 8px 0; }
.book-row { display: flex; justify-content: space-between; font-family: 'Courier New', monospace; font-size: 13px; }
.book-head { color: #9ca3af; font-size: 12px; }
.book-spread { border-top: 1px solid #374151; margin: 6px 0; padding-top: 4px; color: #9ca3af; font-size: 11px; }
.ask { color: #ef4444; }
.bid { color: #22c55e; }
"#;

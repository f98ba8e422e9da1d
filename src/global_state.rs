use crate::domain::chart::{ChartMode, drawing::ToolId};
use crate::domain::market_data::OrderBook;
use leptos::*;
use once_cell::sync::OnceCell;

/// Dashboard-wide signals shared by the header, toolbar and chart surface
pub struct Globals {
    pub current_price: RwSignal<f64>,
    pub price_up: RwSignal<bool>,
    pub candle_count: RwSignal<usize>,
    pub is_streaming: RwSignal<bool>,
    pub zoom_level: RwSignal<f64>,
    pub symbol: RwSignal<String>,
    pub timeframe: RwSignal<String>,
    pub chart_mode: RwSignal<ChartMode>,
    pub active_tool: RwSignal<Option<ToolId>>,
    pub drawing_count: RwSignal<usize>,
    pub order_book: RwSignal<OrderBook>,
    pub chart_svg: RwSignal<String>,
    pub status: RwSignal<String>,
    pub logs: RwSignal<Vec<String>>,
    pub logs_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        current_price: create_rw_signal(0.0),
        price_up: create_rw_signal(true),
        candle_count: create_rw_signal(0),
        is_streaming: create_rw_signal(false),
        zoom_level: create_rw_signal(1.0),
        symbol: create_rw_signal("AAPL".to_string()),
        timeframe: create_rw_signal("1D".to_string()),
        chart_mode: create_rw_signal(ChartMode::Candle),
        active_tool: create_rw_signal(None),
        drawing_count: create_rw_signal(0),
        order_book: create_rw_signal(OrderBook::default()),
        chart_svg: create_rw_signal(String::new()),
        status: create_rw_signal("Initializing...".to_string()),
        logs: create_rw_signal(Vec::new()),
        logs_paused: create_rw_signal(false),
    })
}

crate::global_signals! {
    pub current_price: f64,
    pub price_up: bool,
    pub candle_count: usize,
    pub is_streaming: bool,
    pub zoom_level: f64,
    pub symbol: String,
    pub timeframe: String,
    pub chart_mode: ChartMode,
    pub active_tool: Option<ToolId>,
    pub drawing_count: usize,
    pub order_book: OrderBook,
    pub chart_svg: String,
    pub status: String,
    pub logs: Vec<String>,
    pub logs_paused: bool,
}

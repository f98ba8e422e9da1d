//! Drawing tools, the drawing record type and the gesture state machine
//! that turns pointer input into committed drawings.

use super::annotation_store::AnnotationStore;
use super::scales::LinearScale;
use super::value_objects::Point;
use crate::domain::market_data::Candle;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Fibonacci retracement ratios, top guide first
pub const FIB_LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum ToolId {
    #[strum(serialize = "trendline")]
    #[serde(rename = "trendline")]
    TrendLine,
    #[strum(serialize = "horizontalLine")]
    #[serde(rename = "horizontalLine")]
    HorizontalLine,
    #[strum(serialize = "fibRetracement")]
    #[serde(rename = "fibRetracement")]
    FibRetracement,
    #[strum(serialize = "pencil")]
    #[serde(rename = "pencil")]
    PointMarker,
}

impl ToolId {
    pub fn label(&self) -> &'static str {
        match self {
            ToolId::TrendLine => "Trend Line",
            ToolId::HorizontalLine => "Horizontal Line",
            ToolId::FibRetracement => "Fibonacci Retracement",
            ToolId::PointMarker => "Point Marker",
        }
    }
}

/// A committed annotation in pre-zoom plot pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Drawing {
    #[serde(rename = "trendline")]
    TrendLine { start: Point, end: Point },
    #[serde(rename = "horizontalLine")]
    HorizontalLine { y: f64 },
    #[serde(rename = "fibRetracement")]
    FibRetracement { start: Point, end: Point },
    #[serde(rename = "point", rename_all = "camelCase")]
    PointMarker {
        x: f64,
        y: f64,
        data_index: usize,
        /// `None` when the x position falls outside the series
        timestamp: Option<i64>,
        price: f64,
        label: String,
    },
}

impl Drawing {
    pub fn tool(&self) -> ToolId {
        match self {
            Drawing::TrendLine { .. } => ToolId::TrendLine,
            Drawing::HorizontalLine { .. } => ToolId::HorizontalLine,
            Drawing::FibRetracement { .. } => ToolId::FibRetracement,
            Drawing::PointMarker { .. } => ToolId::PointMarker,
        }
    }
}

/// `(level, y)` for every retracement guide between two y values. The
/// smaller y gets level 0 whichever way the gesture went.
pub fn fib_guides(start_y: f64, end_y: f64) -> impl Iterator<Item = (f64, f64)> {
    let (top, bottom) = if start_y <= end_y { (start_y, end_y) } else { (end_y, start_y) };
    let range = bottom - top;
    FIB_LEVELS.into_iter().map(move |level| (level, top + range * level))
}

pub fn fib_label(level: f64) -> String {
    format!("{:.1}%", level * 100.0)
}

/// What finalizing a gesture needs to know about the chart
#[derive(Debug, Clone, Copy)]
pub struct DrawingContext<'a> {
    pub plot_width: f64,
    pub price: Option<&'a LinearScale>,
    pub candles: &'a [Candle],
}

impl<'a> DrawingContext<'a> {
    /// Point marker at `position`: nearest candle by proportional x, price
    /// from the inverse price scale
    fn point_marker(&self, position: Point) -> Drawing {
        let count = self.candles.len();
        let raw_index = if count > 1 && self.plot_width > 0.0 {
            (position.x / self.plot_width * (count - 1) as f64).round()
        } else {
            0.0
        };
        let in_range = count > 0 && raw_index >= 0.0 && raw_index < count as f64;
        let data_index = if count == 0 {
            0
        } else {
            raw_index.clamp(0.0, (count - 1) as f64) as usize
        };
        let timestamp = in_range.then(|| self.candles[data_index].timestamp.value());
        let price = self.price.map(|scale| scale.invert(position.y)).unwrap_or(0.0);

        Drawing::PointMarker {
            x: position.x,
            y: position.y,
            data_index,
            timestamp,
            price,
            label: format!("${:.2}", price),
        }
    }

    /// The drawing a tool produces for a gesture from `start` to `end`
    pub fn finalize(&self, tool: ToolId, start: Point, end: Point) -> Drawing {
        match tool {
            ToolId::TrendLine => Drawing::TrendLine { start, end },
            ToolId::HorizontalLine => Drawing::HorizontalLine { y: start.y },
            ToolId::FibRetracement => Drawing::FibRetracement { start, end },
            ToolId::PointMarker => self.point_marker(start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Active,
}

/// The in-progress gesture. `start` and `current` are set only while active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DraftGesture {
    pub tool: Option<ToolId>,
    pub phase: GesturePhase,
    pub start: Option<Point>,
    pub current: Option<Point>,
}

impl DraftGesture {
    pub fn is_active(&self) -> bool {
        self.phase == GesturePhase::Active
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.start = None;
        self.current = None;
    }
}

/// Gesture state machine plus the store it commits into
#[derive(Debug, Clone, Default)]
pub struct DrawingEngine {
    draft: DraftGesture,
    store: AnnotationStore,
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftGesture {
        &self.draft
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn active_tool(&self) -> Option<ToolId> {
        self.draft.tool
    }

    /// Selecting a different tool, or none, abandons an active gesture.
    /// Returns whether the draft changed.
    pub fn select_tool(&mut self, tool: Option<ToolId>) -> bool {
        if self.draft.tool == tool {
            return false;
        }
        self.draft.tool = tool;
        self.draft.reset();
        true
    }

    /// Starts a gesture when a tool is selected
    pub fn pointer_down(&mut self, position: Point) -> bool {
        if self.draft.tool.is_none() {
            return false;
        }
        self.draft.phase = GesturePhase::Active;
        self.draft.start = Some(position);
        self.draft.current = Some(position);
        true
    }

    pub fn pointer_move(&mut self, position: Point) -> bool {
        if !self.draft.is_active() {
            return false;
        }
        self.draft.current = Some(position);
        true
    }

    /// Commits the active gesture and returns the stored drawing
    pub fn pointer_up(&mut self, context: &DrawingContext<'_>) -> Option<Drawing> {
        if !self.draft.is_active() {
            return None;
        }
        let committed = match (self.draft.tool, self.draft.start, self.draft.current) {
            (Some(tool), Some(start), Some(current)) => Some(context.finalize(tool, start, current)),
            _ => None,
        };
        self.draft.reset();
        if let Some(drawing) = &committed {
            self.store.push(drawing.clone());
        }
        committed
    }

    /// Drops the active gesture without committing
    pub fn cancel(&mut self) -> bool {
        if !self.draft.is_active() {
            return false;
        }
        self.draft.reset();
        true
    }

    /// Empties the store; the draft is left alone
    pub fn clear_all(&mut self) {
        self.store.clear();
    }

    /// What would be committed if the pointer were released now
    pub fn preview(&self, context: &DrawingContext<'_>) -> Option<Drawing> {
        if !self.draft.is_active() {
            return None;
        }
        match (self.draft.tool, self.draft.start, self.draft.current) {
            (Some(tool), Some(start), Some(current)) => Some(context.finalize(tool, start, current)),
            _ => None,
        }
    }
}

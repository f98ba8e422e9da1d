use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// How the price series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    #[display(fmt = "Candlestick")]
    #[strum(serialize = "candle")]
    Candle,
    #[display(fmt = "Line")]
    #[strum(serialize = "line")]
    Line,
}

/// A position in plot pixel space (origin at the plot's top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// 8-bit RGB with a fractional alpha, printed as a CSS color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self { a: alpha, ..*self }
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(239, 68, 68);
    pub const GREEN: Color = Color::rgb(34, 197, 94);
    pub const BLUE: Color = Color::rgb(59, 130, 246);
    pub const GRAY: Color = Color::rgb(156, 163, 175);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 20.0, right: 30.0, bottom: 30.0, left: 60.0 }
    }
}

/// Outer pixel size of the chart host element
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self { width: 800.0, height: 500.0 }
    }
}

/// Inner drawable region after margins
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

/// Container, margins and the resulting plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub container: ContainerSize,
    pub margin: Margin,
    pub plot: PlotArea,
}

impl Layout {
    /// `toolbar_reserve` is taken from the plot height below the bottom margin
    pub fn new(container: ContainerSize, margin: Margin, toolbar_reserve: f64) -> Self {
        let width = (container.width - margin.left - margin.right).max(0.0);
        let height = (container.height - margin.top - margin.bottom - toolbar_reserve).max(0.0);
        Self { container, margin, plot: PlotArea::new(width, height) }
    }

    /// Container coordinates to plot coordinates
    pub fn to_plot(&self, container_x: f64, container_y: f64) -> Point {
        Point::new(container_x - self.margin.left, container_y - self.margin.top)
    }

    /// Height of the drawn svg: plot plus vertical margins
    pub fn svg_height(&self) -> f64 {
        self.plot.height + self.margin.top + self.margin.bottom
    }

    pub fn svg_width(&self) -> f64 {
        self.plot.width + self.margin.left + self.margin.right
    }
}

use super::value_objects::{Color, Margin};
use serde::{Deserialize, Serialize};

/// Zoom limits and step factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Wheel zoom factor is `2^(-delta_y * wheel_sensitivity)`
    pub wheel_sensitivity: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 10.0,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            wheel_sensitivity: 0.002,
        }
    }
}

/// Colors used by the render passes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub bullish: Color,
    pub bearish: Color,
    pub volume_alpha: f64,
    pub line: Color,
    pub axis: Color,
    pub grid_opacity: f64,
    pub label_background: Color,
    pub trend_line: Color,
    pub horizontal_line: Color,
    pub fib_guide: Color,
    pub fib_label: Color,
    pub marker_fill: Color,
    pub marker_stroke: Color,
    pub preview_opacity: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bullish: Color::GREEN,
            bearish: Color::RED,
            volume_alpha: 0.3,
            line: Color::BLUE,
            axis: Color::GRAY,
            grid_opacity: 0.1,
            label_background: Color::rgba(0, 0, 0, 0.5),
            trend_line: Color::WHITE,
            horizontal_line: Color::YELLOW,
            fib_guide: Color::rgba(147, 197, 253, 0.8),
            fib_label: Color::WHITE,
            marker_fill: Color::rgba(255, 255, 255, 0.8),
            marker_stroke: Color::WHITE,
            preview_opacity: 0.7,
        }
    }
}

/// Chart layout and behavior settings. Every field has a default, so a
/// partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margin: Margin,
    /// Plot height given up to the toolbar below the chart
    pub toolbar_reserve: f64,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub zoom: ZoomConfig,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            toolbar_reserve: 40.0,
            x_ticks: 10,
            y_ticks: 10,
            zoom: ZoomConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> crate::domain::errors::ValidationResult<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::domain::errors::ValidationResult<()> {
        use crate::domain::errors::AppError;
        let zoom = &self.zoom;
        if !(zoom.min_scale > 0.0 && zoom.min_scale <= zoom.max_scale) {
            return Err(AppError::ValidationError(format!(
                "zoom bounds [{}, {}] are not a positive interval",
                zoom.min_scale, zoom.max_scale
            )));
        }
        if zoom.zoom_in_factor <= 0.0 || zoom.zoom_out_factor <= 0.0 {
            return Err(AppError::ValidationError("zoom step factors must be positive".to_string()));
        }
        Ok(())
    }
}

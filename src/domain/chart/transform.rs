use super::config::ZoomConfig;
use super::scales::LinearScale;
use serde::{Deserialize, Serialize};

/// Horizontal pan/zoom: `x' = translate_x + k * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform { translate_x: 0.0, k: 1.0 };

    pub fn new(translate_x: f64, k: f64) -> Self {
        Self { translate_x, k }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Pre-zoom x to on-screen x
    pub fn apply_x(&self, x: f64) -> f64 {
        self.translate_x + self.k * x
    }

    /// On-screen x to pre-zoom x
    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.translate_x) / self.k
    }

    /// The base scale seen through this transform. The base is not touched.
    pub fn rescale(&self, base: &LinearScale) -> LinearScale {
        let (r0, r1) = base.range();
        let d0 = base.invert(self.invert_x(r0));
        let d1 = base.invert(self.invert_x(r1));
        LinearScale::new((d0, d1), (r0, r1))
    }
}

/// Owns the view transform and applies zoom/pan gestures to it
#[derive(Debug, Clone)]
pub struct TransformController {
    transform: ViewTransform,
    extent_width: f64,
    config: ZoomConfig,
}

impl TransformController {
    pub fn new(config: ZoomConfig) -> Self {
        Self { transform: ViewTransform::IDENTITY, extent_width: 0.0, config }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.k
    }

    /// Plot width; button zoom is anchored at its centre
    pub fn set_extent(&mut self, width: f64) {
        self.extent_width = width.max(0.0);
    }

    pub fn effective_time_scale(&self, base: &LinearScale) -> LinearScale {
        self.transform.rescale(base)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.scale_by(self.config.zoom_in_factor)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.scale_by(self.config.zoom_out_factor)
    }

    pub fn reset(&mut self) -> bool {
        self.replace(ViewTransform::IDENTITY)
    }

    /// Multiply the scale, keeping the plot centre fixed
    pub fn scale_by(&mut self, factor: f64) -> bool {
        let centre = self.extent_width / 2.0;
        self.scale_at(centre, self.transform.k * factor)
    }

    /// Wheel zoom anchored at the pointer's plot x
    pub fn wheel(&mut self, pointer_x: f64, delta_y: f64) -> bool {
        let factor = 2f64.powf(-delta_y * self.config.wheel_sensitivity);
        self.scale_at(pointer_x, self.transform.k * factor)
    }

    /// Drag pan by a pixel delta; unbounded
    pub fn pan_by(&mut self, dx: f64) -> bool {
        let next = ViewTransform::new(self.transform.translate_x + dx, self.transform.k);
        self.replace(next)
    }

    /// Set scale to `k` (clamped) keeping the screen point `anchor_x` over
    /// the same pre-zoom x
    fn scale_at(&mut self, anchor_x: f64, k: f64) -> bool {
        if !k.is_finite() {
            return false;
        }
        let k = k.clamp(self.config.min_scale, self.config.max_scale);
        let anchored = self.transform.invert_x(anchor_x);
        let next = ViewTransform::new(anchor_x - anchored * k, k);
        self.replace(next)
    }

    fn replace(&mut self, next: ViewTransform) -> bool {
        if next == self.transform {
            return false;
        }
        self.transform = next;
        true
    }
}

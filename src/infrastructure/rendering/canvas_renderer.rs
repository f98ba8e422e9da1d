use crate::domain::{
    chart::scene::{Element, Layer, LayerGroup, Scene, Shape, Style},
    errors::{AppError, RenderingResult},
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn rendering_error(what: &str, err: JsValue) -> AppError {
    AppError::RenderingError(format!("{}: {:?}", what, err))
}

/// Paints a scene onto a `<canvas>` with the 2D context
pub struct CanvasRenderer {
    canvas_id: String,
}

impl CanvasRenderer {
    pub fn new(canvas_id: String) -> Self {
        Self { canvas_id }
    }

    /// Looks the canvas up, sizes it to the scene and returns its context
    fn canvas_context(&self, width: u32, height: u32) -> RenderingResult<CanvasRenderingContext2d> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| AppError::RenderingError("document not available".to_string()))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| AppError::RenderingError(format!("canvas '{}' not found", self.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError(format!("'{}' is not a canvas", self.canvas_id)))?;

        canvas.set_width(width);
        canvas.set_height(height);

        canvas
            .get_context("2d")
            .map_err(|err| rendering_error("get_context failed", err))?
            .ok_or_else(|| AppError::RenderingError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("context is not 2D".to_string()))
    }

    pub fn render(&self, scene: &Scene) -> RenderingResult<()> {
        let layout = scene.layout();
        let ctx = self.canvas_context(layout.svg_width().ceil() as u32, layout.svg_height().ceil() as u32)?;
        let (left, top) = (layout.margin.left, layout.margin.top);

        ctx.clear_rect(0.0, 0.0, layout.svg_width(), layout.svg_height());

        ctx.save();
        ctx.translate(left, top).map_err(|err| rendering_error("translate failed", err))?;
        ctx.begin_path();
        ctx.rect(0.0, 0.0, layout.plot.width, layout.plot.height);
        ctx.clip();
        self.paint_group(&ctx, scene.group(LayerGroup::Plot))?;
        ctx.restore();

        ctx.save();
        ctx.translate(left, top + layout.plot.height)
            .map_err(|err| rendering_error("translate failed", err))?;
        self.paint_group(&ctx, scene.group(LayerGroup::XAxis))?;
        ctx.restore();

        ctx.save();
        ctx.translate(left, top).map_err(|err| rendering_error("translate failed", err))?;
        self.paint_group(&ctx, scene.group(LayerGroup::YAxis))?;
        ctx.restore();

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("Painted scene onto '{}'", self.canvas_id),
        );
        Ok(())
    }

    fn paint_group<'a>(
        &self,
        ctx: &CanvasRenderingContext2d,
        layers: impl Iterator<Item = &'a Layer>,
    ) -> RenderingResult<()> {
        for layer in layers {
            for element in layer.placed_elements() {
                paint_element(ctx, &element)?;
            }
        }
        Ok(())
    }
}

fn apply_style(ctx: &CanvasRenderingContext2d, style: &Style) -> RenderingResult<()> {
    ctx.set_global_alpha(style.opacity);
    ctx.set_line_width(style.stroke_width);
    let dash = js_sys::Array::new();
    if let Some((on, off)) = style.dash {
        dash.push(&JsValue::from_f64(on));
        dash.push(&JsValue::from_f64(off));
    }
    ctx.set_line_dash(&dash).map_err(|err| rendering_error("set_line_dash failed", err))
}

fn finish_path(ctx: &CanvasRenderingContext2d, style: &Style) {
    if let Some(fill) = style.fill {
        ctx.set_fill_style_str(&fill.to_css());
        ctx.fill();
    }
    if let Some(stroke) = style.stroke {
        ctx.set_stroke_style_str(&stroke.to_css());
        ctx.stroke();
    }
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) -> RenderingResult<()> {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.move_to(x + r, y);
    for (x1, y1, x2, y2) in [(x + w, y, x + w, y + h), (x + w, y + h, x, y + h), (x, y + h, x, y), (x, y, x + w, y)] {
        ctx.arc_to(x1, y1, x2, y2, r).map_err(|err| rendering_error("arc_to failed", err))?;
    }
    ctx.close_path();
    Ok(())
}

fn paint_element(ctx: &CanvasRenderingContext2d, element: &Element) -> RenderingResult<()> {
    let style = &element.style;
    apply_style(ctx, style)?;
    match &element.shape {
        Shape::Rect { x, y, width, height, rx } => {
            ctx.begin_path();
            if *rx > 0.0 {
                rounded_rect(ctx, *x, *y, width.max(0.0), height.max(0.0), *rx)?;
            } else {
                ctx.rect(*x, *y, width.max(0.0), height.max(0.0));
            }
            finish_path(ctx, style);
        }
        Shape::Line { x1, y1, x2, y2 } => {
            ctx.begin_path();
            ctx.move_to(*x1, *y1);
            ctx.line_to(*x2, *y2);
            finish_path(ctx, &Style { fill: None, ..*style });
        }
        Shape::Path { points } => {
            ctx.begin_path();
            for (i, (x, y)) in points.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(*x, *y);
                } else {
                    ctx.line_to(*x, *y);
                }
            }
            finish_path(ctx, style);
        }
        Shape::Circle { cx, cy, r } => {
            ctx.begin_path();
            ctx.arc(*cx, *cy, *r, 0.0, std::f64::consts::TAU)
                .map_err(|err| rendering_error("arc failed", err))?;
            finish_path(ctx, style);
        }
        Shape::Text { x, y, content, anchor, font_size, bold } => {
            let weight = if *bold { "bold " } else { "" };
            ctx.set_font(&format!("{}{}px sans-serif", weight, font_size));
            ctx.set_text_align(anchor.as_ref());
            if let Some(fill) = style.fill {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_text(content, *x, *y)
                    .map_err(|err| rendering_error("fill_text failed", err))?;
            }
        }
    }
    Ok(())
}

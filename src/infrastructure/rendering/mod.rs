pub mod canvas_renderer;
pub mod svg_renderer;

pub use canvas_renderer::CanvasRenderer;
pub use svg_renderer::SvgRenderer;

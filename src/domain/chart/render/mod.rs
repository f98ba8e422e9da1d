//! Render passes. Each one owns a fixed set of layers and rewrites only
//! those.

pub mod axis;
pub mod drawing_pass;
pub mod mode_pass;
pub mod static_pass;

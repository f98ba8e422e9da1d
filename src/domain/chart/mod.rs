//! Chart aggregate: scales, view transform, scene, drawings and the passes
//! that keep the scene in sync with them.

pub mod annotation_store;
pub mod config;
pub mod drawing;
pub mod entities;
pub mod render;
pub mod scales;
pub mod scene;
pub mod transform;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use value_objects::*;

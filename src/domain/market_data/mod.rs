//! Market data: candles, timeframes and the simulated feed.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;

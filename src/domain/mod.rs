//! Domain layer: market data, the chart aggregate and the shared ambient
//! pieces (errors, events, logging).

pub mod chart;
pub mod errors;
pub mod events;
pub mod logging;
pub mod market_data;
pub mod state;

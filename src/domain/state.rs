use std::sync::Arc;

use crate::domain::market_data::{Candle, Symbol, Timeframe};

/// Market input for one render cycle. The candle vector is shared and
/// replaced wholesale, never edited in place.
#[derive(Clone, Debug, Default)]
pub struct MarketSnapshot {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub candles: Arc<Vec<Candle>>,
}

impl MarketSnapshot {
    pub fn new(symbol: Symbol, timeframe: Timeframe, candles: Arc<Vec<Candle>>) -> Self {
        Self { symbol, timeframe, candles }
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

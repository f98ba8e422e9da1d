pub use super::value_objects::{OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One OHLCV bar. Serialized flat (`{"timestamp":..,"open":..,...}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub ohlcv: OHLCV,
}

impl Candle {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }

    pub fn from_values(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp: Timestamp::from(timestamp),
            ohlcv: OHLCV::new(
                Price::from(open),
                Price::from(high),
                Price::from(low),
                Price::from(close),
                Volume::from(volume),
            ),
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlcv.close > self.ohlcv.open
    }

    pub fn is_bearish(&self) -> bool {
        self.ohlcv.close < self.ohlcv.open
    }
}

/// Result of feeding one candle into a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Same timestamp as the last candle, which was replaced
    Updated,
    /// Newer than the last candle, appended
    Appended,
    /// Older than the last candle, dropped
    Ignored,
}

/// Append-only candle history. The last candle may be replaced in place;
/// nothing is ever reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candles(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn apply_tick(&mut self, candle: Candle) -> TickOutcome {
        match self.candles.last_mut() {
            Some(last) if last.timestamp == candle.timestamp => {
                *last = candle;
                TickOutcome::Updated
            }
            Some(last) if candle.timestamp < last.timestamp => TickOutcome::Ignored,
            _ => {
                self.candles.push(candle);
                TickOutcome::Appended
            }
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Immutable copy handed to the chart for one render cycle
    pub fn snapshot(&self) -> Arc<Vec<Candle>> {
        Arc::new(self.candles.clone())
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn count(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest_price(&self) -> Option<Price> {
        self.latest().map(|candle| candle.ohlcv.close)
    }
}

/// One resting order level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: f64,
    pub size: u32,
}

/// Asks sorted by ascending price, bids by descending price. Asks sit at or
/// above the reference price, bids at or below it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<OrderLevel>,
    pub bids: Vec<OrderLevel>,
}

impl OrderBook {
    pub fn best_ask(&self) -> Option<&OrderLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&OrderLevel> {
        self.bids.first()
    }

    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

/// Lowest low and highest high
pub fn price_extent(candles: &[Candle]) -> Option<(f64, f64)> {
    candles.iter().fold(None, |acc, candle| {
        let (low, high) = (candle.ohlcv.low.value(), candle.ohlcv.high.value());
        Some(match acc {
            None => (low, high),
            Some((min, max)) => (f64::min(min, low), f64::max(max, high)),
        })
    })
}

/// First and last timestamp over the whole slice
pub fn time_extent(candles: &[Candle]) -> Option<(i64, i64)> {
    candles.iter().fold(None, |acc, candle| {
        let ts = candle.timestamp.value();
        Some(match acc {
            None => (ts, ts),
            Some((min, max)) => (min.min(ts), max.max(ts)),
        })
    })
}

pub fn max_volume(candles: &[Candle]) -> f64 {
    candles.iter().map(|candle| candle.ohlcv.volume.value()).fold(0.0, f64::max)
}

use super::{Candle, OrderBook, OrderLevel, Symbol, Timeframe};
use crate::domain::errors::{AppError, ValidationResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Checks the OHLC invariant, non-negative volume and non-decreasing
/// timestamps. The first offending candle is reported.
pub fn validate_series(candles: &[Candle]) -> ValidationResult<()> {
    for (index, candle) in candles.iter().enumerate() {
        if !candle.ohlcv.is_valid() {
            return Err(AppError::ValidationError(format!(
                "candle {} at {} violates low <= open/close <= high or has negative volume",
                index,
                candle.timestamp.value()
            )));
        }
    }

    if let Some(index) = candles
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(AppError::ValidationError(format!(
            "timestamps go backwards at candle {}",
            index + 1
        )));
    }

    Ok(())
}

/// Simulation parameters for the mock feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub candle_count: usize,
    pub tick_interval_ms: u32,
    pub new_candle_probability: f64,
    /// Fixed seed for reproducible series; `None` uses the host-supplied seed
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            candle_count: 100,
            tick_interval_ms: 1000,
            new_candle_probability: 0.1,
            seed: None,
        }
    }
}

/// Starting price, per-candle volatility and drift for a ticker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolProfile {
    pub base_price: f64,
    pub volatility: f64,
    pub trend: f64,
}

impl SymbolProfile {
    pub fn for_symbol(symbol: &Symbol) -> Self {
        let (base_price, volatility, trend) = match symbol.value() {
            "AAPL" => (180.0, 0.015, 0.001),
            "MSFT" => (350.0, 0.018, 0.002),
            "GOOGL" => (140.0, 0.02, 0.0005),
            "AMZN" => (170.0, 0.025, 0.001),
            "META" => (450.0, 0.03, -0.0005),
            "TSLA" => (220.0, 0.04, 0.001),
            "NVDA" => (800.0, 0.035, 0.003),
            "JPM" => (180.0, 0.012, 0.0008),
            _ => (150.0, 0.02, 0.0),
        };
        Self { base_price, volatility, trend }
    }
}

/// Levels per side in the dashboard order book
pub const ORDER_BOOK_DEPTH: usize = 5;

/// Price step between order book levels
const ORDER_BOOK_STEP: f64 = 0.1;

/// Symbols offered by the demo selector
pub const DEMO_SYMBOLS: [&str; 8] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM"];

/// Random-walk candle generator standing in for a market data source
pub struct MockMarketFeed {
    rng: SmallRng,
    new_candle_probability: f64,
}

impl MockMarketFeed {
    /// `fallback_seed` is used when the config carries no seed (the browser
    /// host passes the current time).
    pub fn new(config: &FeedConfig, fallback_seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(config.seed.unwrap_or(fallback_seed)),
            new_candle_probability: config.new_candle_probability.clamp(0.0, 1.0),
        }
    }

    /// `count` candles ending at `now_ms`, spaced by the timeframe increment.
    /// The drift flips sign across 2 to 4 cycles.
    pub fn generate_series(&mut self, symbol: &Symbol, timeframe: &Timeframe, count: usize, now_ms: i64) -> Vec<Candle> {
        let profile = SymbolProfile::for_symbol(symbol);
        let increment = timeframe.duration_ms();
        let trend_cycles = self.rng.random_range(2usize..=4);
        let cycle_length = (count / trend_cycles).max(1);

        let mut candles = Vec::with_capacity(count);
        let mut last_close = profile.base_price;

        for i in (0..count).rev() {
            let timestamp = now_ms - i as i64 * increment;
            let cycle_position = (i / cycle_length) % trend_cycles;
            let cycle_trend = if cycle_position % 2 == 0 { profile.trend } else { -profile.trend };

            let random_factor = (self.rng.random::<f64>() - 0.5) * 2.0;
            let change_percent = random_factor * profile.volatility + cycle_trend;

            let open = last_close;
            let close = open * (1.0 + change_percent);

            let volume_factor = 0.5 + self.rng.random::<f64>() * 0.5;
            let high_low_range = open * profile.volatility * volume_factor;
            let high = open.max(close) + self.rng.random::<f64>() * high_low_range;
            let low = open.min(close) - self.rng.random::<f64>() * high_low_range;

            let price_change = (close - open).abs() / open;
            let volume_base = self.rng.random_range(5000u32..10000) as f64;
            let volume = (volume_base * (1.0 + price_change * 10.0)).floor();

            candles.push(Candle::from_values(timestamp, open, high, low, close, volume));
            last_close = close;
        }

        candles
    }

    /// One simulated streaming update. The first candle always refreshes the
    /// last bar (same timestamp and open); occasionally a second, newer bar
    /// follows it.
    pub fn next_ticks(&mut self, last: &Candle, timeframe: &Timeframe) -> Vec<Candle> {
        let last_close = last.ohlcv.close.value();
        let change_percent = (self.rng.random::<f64>() - 0.5) * 0.005;
        let close = last_close * (1.0 + change_percent);
        let open = last_close;
        let high_low_range = open * 0.005;
        let high = open.max(close) + self.rng.random::<f64>() * high_low_range;
        let low = open.min(close) - self.rng.random::<f64>() * high_low_range;
        let volume = self.rng.random_range(500u32..5500) as f64;

        let refreshed = Candle::from_values(
            last.timestamp.value(),
            last.ohlcv.open.value(),
            last.ohlcv.high.value().max(high),
            last.ohlcv.low.value().min(low),
            close,
            last.ohlcv.volume.value() + volume,
        );

        let mut ticks = vec![refreshed];
        if self.rng.random_bool(self.new_candle_probability) {
            ticks.push(Candle::from_values(
                last.timestamp.value() + timeframe.duration_ms(),
                open,
                high,
                low,
                close,
                volume,
            ));
        }
        ticks
    }

    /// `depth` asks above and `depth` bids below `last_price`. Level `i`
    /// is offset by `i` steps plus a random fraction of one step; sizes
    /// are 100 to 599.
    pub fn generate_order_book(&mut self, last_price: f64, depth: usize) -> OrderBook {
        let mut side = |sign: f64| -> Vec<OrderLevel> {
            (0..depth)
                .map(|i| {
                    let offset = self.rng.random::<f64>() * ORDER_BOOK_STEP + i as f64 * ORDER_BOOK_STEP;
                    OrderLevel {
                        price: last_price + sign * offset,
                        size: self.rng.random_range(100u32..600),
                    }
                })
                .collect()
        };
        let mut asks = side(1.0);
        let mut bids = side(-1.0);
        asks.sort_by(|a, b| a.price.total_cmp(&b.price));
        bids.sort_by(|a, b| b.price.total_cmp(&a.price));
        OrderBook { asks, bids }
    }
}

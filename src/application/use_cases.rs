use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{
        CandleSeries, OrderBook, Symbol, TickOutcome, Timeframe,
        services::{FeedConfig, MockMarketFeed, ORDER_BOOK_DEPTH},
    },
    state::MarketSnapshot,
};
use crate::log_info;

/// Use case: drive a chart from the simulated market feed. Produces a full
/// snapshot on bootstrap and after every tick.
pub struct SimulatedFeedUseCase {
    feed: MockMarketFeed,
    config: FeedConfig,
    symbol: Symbol,
    timeframe: Timeframe,
    series: CandleSeries,
}

impl SimulatedFeedUseCase {
    pub fn new(config: FeedConfig, fallback_seed: u64) -> Self {
        Self {
            feed: MockMarketFeed::new(&config, fallback_seed),
            config,
            symbol: Symbol::default(),
            timeframe: Timeframe::default(),
            series: CandleSeries::new(),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    /// Regenerates the history for a symbol/timeframe, ending at `now_ms`
    pub fn bootstrap(&mut self, symbol: Symbol, timeframe: Timeframe, now_ms: i64) -> MarketSnapshot {
        let candles = self
            .feed
            .generate_series(&symbol, &timeframe, self.config.candle_count, now_ms);
        log_info!(
            LogComponent::Application("SimulatedFeed"),
            "Generated {} candles for {} {}",
            candles.len(),
            symbol,
            timeframe
        );
        self.series = CandleSeries::from_candles(candles);
        self.symbol = symbol;
        self.timeframe = timeframe;
        self.snapshot()
    }

    /// Applies one streaming update. `None` before the first bootstrap.
    pub fn tick(&mut self) -> Option<MarketSnapshot> {
        let last = *self.series.latest()?;
        for candle in self.feed.next_ticks(&last, &self.timeframe) {
            if self.series.apply_tick(candle) == TickOutcome::Appended {
                get_logger().debug(
                    LogComponent::Application("SimulatedFeed"),
                    &format!("New candle at {}", candle.timestamp.value()),
                );
            }
        }
        Some(self.snapshot())
    }

    /// Simulated depth around the latest close. `None` before bootstrap.
    pub fn order_book(&mut self) -> Option<OrderBook> {
        let last = self.series.latest_price()?.value();
        Some(self.feed.generate_order_book(last, ORDER_BOOK_DEPTH))
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot::new(self.symbol.clone(), self.timeframe.clone(), self.series.snapshot())
    }
}

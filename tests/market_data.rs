use price_chart_annotate::application::SimulatedFeedUseCase;
use price_chart_annotate::domain::market_data::services::{
    FeedConfig, MockMarketFeed, ORDER_BOOK_DEPTH, SymbolProfile, validate_series,
};
use price_chart_annotate::domain::market_data::{
    Candle, CandleSeries, Symbol, TickGranularity, TickOutcome, Timeframe, max_volume, price_extent, time_extent,
};

const NOW: i64 = 1_700_000_000_000;

fn seeded(seed: u64) -> FeedConfig {
    FeedConfig { seed: Some(seed), ..FeedConfig::default() }
}

#[test]
fn apply_tick_updates_appends_or_ignores() {
    let mut series = CandleSeries::from_candles(vec![
        Candle::from_values(0, 1.0, 2.0, 0.5, 1.5, 10.0),
        Candle::from_values(60_000, 1.5, 2.0, 1.0, 1.8, 10.0),
    ]);

    let refreshed = Candle::from_values(60_000, 1.5, 2.5, 1.0, 2.2, 15.0);
    assert_eq!(series.apply_tick(refreshed), TickOutcome::Updated);
    assert_eq!(series.latest(), Some(&refreshed));
    assert_eq!(series.count(), 2);

    let next = Candle::from_values(120_000, 2.2, 2.4, 2.0, 2.3, 5.0);
    assert_eq!(series.apply_tick(next), TickOutcome::Appended);
    assert_eq!(series.count(), 3);

    let stale = Candle::from_values(30_000, 1.0, 1.0, 1.0, 1.0, 1.0);
    assert_eq!(series.apply_tick(stale), TickOutcome::Ignored);
    assert_eq!(series.count(), 3);
    assert_eq!(series.latest_price().map(|p| p.value()), Some(2.3));
}

#[test]
fn snapshot_is_detached_from_series() {
    let mut series = CandleSeries::new();
    series.apply_tick(Candle::from_values(0, 1.0, 2.0, 0.5, 1.5, 10.0));
    let snapshot = series.snapshot();
    series.apply_tick(Candle::from_values(60_000, 1.0, 2.0, 0.5, 1.5, 10.0));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(series.count(), 2);
}

#[test]
fn extents_over_series() {
    let candles = vec![
        Candle::from_values(100, 5.0, 6.0, 4.0, 5.5, 7.0),
        Candle::from_values(200, 5.5, 9.0, 5.0, 8.0, 3.0),
    ];
    assert_eq!(price_extent(&candles), Some((4.0, 9.0)));
    assert_eq!(time_extent(&candles), Some((100, 200)));
    assert_eq!(max_volume(&candles), 7.0);
    assert_eq!(price_extent(&[]), None);
}

#[test]
fn candle_direction() {
    assert!(Candle::from_values(0, 1.0, 2.0, 0.5, 1.5, 1.0).is_bullish());
    assert!(Candle::from_values(0, 1.5, 2.0, 0.5, 1.0, 1.0).is_bearish());
    let flat = Candle::from_values(0, 1.5, 2.0, 0.5, 1.5, 1.0);
    assert!(!flat.is_bullish() && !flat.is_bearish());
}

#[test]
fn candles_deserialize_from_flat_json() {
    let json = r#"[{"timestamp":60000,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0}]"#;
    let candles: Vec<Candle> = serde_json::from_str(json).expect("valid json");
    assert_eq!(candles, vec![Candle::from_values(60_000, 1.0, 2.0, 0.5, 1.5, 10.0)]);
}

#[test]
fn generated_series_is_valid_and_ends_now() {
    let mut feed = MockMarketFeed::new(&seeded(7), 0);
    let candles = feed.generate_series(&Symbol::from("TSLA"), &Timeframe::OneHour, 100, NOW);
    assert_eq!(candles.len(), 100);
    assert!(validate_series(&candles).is_ok());
    assert_eq!(candles.last().map(|c| c.timestamp.value()), Some(NOW));
    assert_eq!(candles[0].timestamp.value(), NOW - 99 * 3_600_000);
    assert!(candles.windows(2).all(|w| w[1].ohlcv.open == w[0].ohlcv.close));
    assert!((candles[0].ohlcv.open.value() - 220.0).abs() < 1e-9);
}

#[test]
fn same_seed_same_series() {
    let a = MockMarketFeed::new(&seeded(42), 1).generate_series(&Symbol::default(), &Timeframe::OneDay, 50, NOW);
    let b = MockMarketFeed::new(&seeded(42), 2).generate_series(&Symbol::default(), &Timeframe::OneDay, 50, NOW);
    assert_eq!(a, b);
}

#[test]
fn ticks_refresh_last_candle_then_maybe_append() {
    let config = FeedConfig { seed: Some(3), new_candle_probability: 1.0, ..FeedConfig::default() };
    let mut feed = MockMarketFeed::new(&config, 0);
    let last = Candle::from_values(NOW, 100.0, 101.0, 99.0, 100.5, 1_000.0);
    let ticks = feed.next_ticks(&last, &Timeframe::FiveMinutes);

    assert_eq!(ticks.len(), 2);
    let refreshed = ticks[0];
    assert_eq!(refreshed.timestamp, last.timestamp);
    assert_eq!(refreshed.ohlcv.open, last.ohlcv.open);
    assert!(refreshed.ohlcv.high >= last.ohlcv.high);
    assert!(refreshed.ohlcv.low <= last.ohlcv.low);
    assert!(refreshed.ohlcv.volume.value() > 1_000.0);
    assert_eq!(ticks[1].timestamp.value(), NOW + 5 * 60_000);
    assert!(validate_series(&ticks).is_ok());

    let never = FeedConfig { seed: Some(3), new_candle_probability: 0.0, ..FeedConfig::default() };
    let ticks = MockMarketFeed::new(&never, 0).next_ticks(&last, &Timeframe::FiveMinutes);
    assert_eq!(ticks.len(), 1);
}

#[test]
fn simulated_feed_use_case_streams_valid_snapshots() {
    let mut use_case = SimulatedFeedUseCase::new(seeded(11), 0);
    assert!(use_case.tick().is_none());

    let snapshot = use_case.bootstrap(Symbol::from("NVDA"), Timeframe::FifteenMinutes, NOW);
    assert_eq!(snapshot.candles.len(), use_case.config().candle_count);
    assert_eq!(snapshot.timeframe, Timeframe::FifteenMinutes);

    for _ in 0..25 {
        let snapshot = use_case.tick().expect("bootstrapped");
        assert!(snapshot.candles.len() >= 100);
        assert!(validate_series(&snapshot.candles).is_ok());
    }
}

#[test]
fn order_book_brackets_the_last_price() {
    let mut feed = MockMarketFeed::new(&seeded(5), 0);
    for seed_price in [12.5, 180.0, 812.34] {
        let book = feed.generate_order_book(seed_price, ORDER_BOOK_DEPTH);
        assert_eq!(book.asks.len(), ORDER_BOOK_DEPTH);
        assert_eq!(book.bids.len(), ORDER_BOOK_DEPTH);

        assert!(book.asks.windows(2).all(|pair| pair[0].price <= pair[1].price));
        assert!(book.bids.windows(2).all(|pair| pair[0].price >= pair[1].price));
        assert!(book.asks.iter().all(|level| level.price >= seed_price && level.price < seed_price + 0.5));
        assert!(book.bids.iter().all(|level| level.price <= seed_price && level.price > seed_price - 0.5));
        assert!(book.asks.iter().chain(&book.bids).all(|level| (100..600).contains(&level.size)));
        assert!(book.spread().expect("both sides") >= 0.0);
    }
}

#[test]
fn order_book_needs_a_bootstrapped_feed() {
    let mut use_case = SimulatedFeedUseCase::new(seeded(8), 0);
    assert!(use_case.order_book().is_none());

    let snapshot = use_case.bootstrap(Symbol::from("AAPL"), Timeframe::OneDay, NOW);
    let last = snapshot.candles.last().expect("candles").ohlcv.close.value();
    let book = use_case.order_book().expect("bootstrapped");
    assert!(book.best_ask().expect("ask").price >= last);
    assert!(book.best_bid().expect("bid").price <= last);
}

#[test]
fn zero_depth_order_book_is_empty() {
    let book = MockMarketFeed::new(&seeded(1), 0).generate_order_book(100.0, 0);
    assert!(book.asks.is_empty() && book.bids.is_empty());
    assert_eq!(book.spread(), None);
}

#[test]
fn symbol_profiles() {
    assert_eq!(SymbolProfile::for_symbol(&Symbol::from("nvda")).base_price, 800.0);
    assert_eq!(SymbolProfile::for_symbol(&Symbol::from("XYZ")).base_price, 150.0);
    assert!(Symbol::new("  ".to_string()).is_err());
}

#[test]
fn timeframe_tags() {
    for tf in Timeframe::known() {
        assert_eq!(Timeframe::parse(&tf.to_string()), tf);
        assert!(tf.is_known());
    }
    let other = Timeframe::parse("3M");
    assert_eq!(other, Timeframe::Other("3M".to_string()));
    assert_eq!(other.to_string(), "3M");
    assert_eq!(other.granularity(), TickGranularity::Unknown);
    assert_eq!(other.duration_ms(), 86_400_000);
    assert_eq!(Timeframe::parse("4H").granularity(), TickGranularity::Hour);
    assert_eq!(Timeframe::default(), Timeframe::OneDay);
}

#[test]
fn timeframe_serializes_as_tag() {
    assert_eq!(serde_json::to_string(&Timeframe::OneWeek).expect("serialize"), "\"1W\"");
    let parsed: Timeframe = serde_json::from_str("\"15m\"").expect("deserialize");
    assert_eq!(parsed, Timeframe::FifteenMinutes);
}

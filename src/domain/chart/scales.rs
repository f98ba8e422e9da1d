use super::value_objects::Layout;
use crate::domain::market_data::{Candle, max_volume, price_extent, time_extent};

/// Fraction of the time span added on both sides of the data
pub const TIME_PADDING: f64 = 0.1;
/// Price domain is `[min_low * PRICE_LOW_FACTOR, max_high * PRICE_HIGH_FACTOR]`
pub const PRICE_LOW_FACTOR: f64 = 0.999;
pub const PRICE_HIGH_FACTOR: f64 = 1.001;
/// Headroom above the tallest volume bar
pub const VOLUME_HEADROOM: f64 = 1.1;
/// Share of the plot height used by volume bars
pub const VOLUME_HEIGHT_RATIO: f64 = 0.1;
/// Share of the per-candle slot filled by a candle body
pub const BAND_RATIO: f64 = 0.8;

/// Continuous, invertible linear map from a domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A zero-width domain maps every value to the middle of the range
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel back to domain. A zero-width range inverts to the domain start.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Round values (1, 2 or 5 times a power of ten) inside the domain,
    /// ascending, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if !lo.is_finite() || !hi.is_finite() || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let (factor, power) = nice_step(lo, hi, count);
        if power < 0 {
            // divide by the inverse step so decimal ticks come out exact
            let inverse = 10f64.powi(-power) / factor;
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        } else {
            let step = factor * 10f64.powi(power);
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        }
    }
}

/// Step as `(factor, power)` meaning `factor * 10^power` with factor 1, 2
/// or 5, giving about `count` intervals
fn nice_step(lo: f64, hi: f64, count: usize) -> (f64, i32) {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor() as i32;
    let error = raw / 10f64.powi(power);
    if error >= 50f64.sqrt() {
        (1.0, power + 1)
    } else if error >= 10f64.sqrt() {
        (5.0, power)
    } else if error >= 2f64.sqrt() {
        (2.0, power)
    } else {
        (1.0, power)
    }
}

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Calendar intervals the time axis can step by, smallest first
pub const TIME_TICK_INTERVALS: [i64; 18] = [
    SECOND_MS,
    5 * SECOND_MS,
    15 * SECOND_MS,
    30 * SECOND_MS,
    MINUTE_MS,
    5 * MINUTE_MS,
    15 * MINUTE_MS,
    30 * MINUTE_MS,
    HOUR_MS,
    3 * HOUR_MS,
    6 * HOUR_MS,
    12 * HOUR_MS,
    DAY_MS,
    2 * DAY_MS,
    7 * DAY_MS,
    30 * DAY_MS,
    90 * DAY_MS,
    365 * DAY_MS,
];

/// Epoch-ms tick positions for a time scale, using the smallest interval
/// that yields at most `count` ticks.
pub fn time_ticks(scale: &LinearScale, count: usize) -> Vec<i64> {
    let (d0, d1) = scale.domain();
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    if !lo.is_finite() || !hi.is_finite() || count == 0 {
        return Vec::new();
    }
    let span = hi - lo;
    let interval = TIME_TICK_INTERVALS
        .iter()
        .copied()
        .find(|interval| span / *interval as f64 <= count as f64)
        .unwrap_or_else(|| {
            let years = (span / (365 * DAY_MS) as f64 / count as f64).ceil().max(1.0) as i64;
            years * 365 * DAY_MS
        });

    let first = (lo / interval as f64).ceil() as i64;
    let last = (hi / interval as f64).floor() as i64;
    (first..=last).map(|i| i * interval).collect()
}

/// Scales derived from one candle snapshot and one layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSet {
    pub time: LinearScale,
    pub price: LinearScale,
    pub volume: LinearScale,
    /// Candle body width in pre-zoom pixels
    pub band_width: f64,
}

impl ScaleSet {
    /// `None` for an empty series; nothing downstream is drawn then.
    pub fn compute(candles: &[Candle], layout: &Layout) -> Option<Self> {
        let (first_ts, last_ts) = time_extent(candles)?;
        let (min_low, max_high) = price_extent(candles)?;
        let width = layout.plot.width;
        let height = layout.plot.height;

        let span = (last_ts - first_ts) as f64;
        let padding = span * TIME_PADDING;
        let time = LinearScale::new(
            (first_ts as f64 - padding, last_ts as f64 + padding),
            (0.0, width),
        );

        let price = LinearScale::new(
            (min_low * PRICE_LOW_FACTOR, max_high * PRICE_HIGH_FACTOR),
            (height, 0.0),
        );

        let volume = LinearScale::new(
            (0.0, max_volume(candles) * VOLUME_HEADROOM),
            (height, height - height * VOLUME_HEIGHT_RATIO),
        );

        let band_width = width / candles.len() as f64 * BAND_RATIO;

        Some(Self { time, price, volume, band_width })
    }

    /// Pre-zoom x of a candle's centre
    pub fn x_of(&self, candle: &Candle) -> f64 {
        self.time.map(candle.timestamp.as_f64())
    }
}

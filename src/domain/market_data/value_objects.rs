use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumString;

/// Price in quote currency
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Traded volume, never negative in a valid candle
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Epoch milliseconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor, Serialize, Deserialize)]
pub struct OHLCV {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl OHLCV {
    /// `low <= min(open, close)`, `high >= max(open, close)`, volume non-negative
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
            && self.volume.value() >= 0.0
            && [self.open, self.high, self.low, self.close].iter().all(|p| p.value().is_finite())
    }
}

/// Ticker label; display only, never used for lookups inside the chart
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: String) -> Result<Self, String> {
        if symbol.trim().is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }
        Ok(Self(symbol.trim().to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self("AAPL".to_string())
    }
}

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Candle timeframe tag. Unknown tags are kept verbatim in `Other` and get
/// the fallback tick format and a one day increment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Timeframe {
    #[strum(serialize = "1m")]
    #[display(fmt = "1m")]
    OneMinute,
    #[strum(serialize = "5m")]
    #[display(fmt = "5m")]
    FiveMinutes,
    #[strum(serialize = "15m")]
    #[display(fmt = "15m")]
    FifteenMinutes,
    #[strum(serialize = "30m")]
    #[display(fmt = "30m")]
    ThirtyMinutes,
    #[strum(serialize = "1H")]
    #[display(fmt = "1H")]
    OneHour,
    #[strum(serialize = "4H")]
    #[display(fmt = "4H")]
    FourHours,
    #[strum(serialize = "1D")]
    #[display(fmt = "1D")]
    OneDay,
    #[strum(serialize = "1W")]
    #[display(fmt = "1W")]
    OneWeek,
    #[strum(default)]
    #[display(fmt = "{}", _0)]
    Other(String),
}

/// How tick labels are rendered for a timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGranularity {
    SubHour,
    Hour,
    Day,
    Week,
    Unknown,
}

impl Timeframe {
    /// Every recognized timeframe, in selector order
    pub fn known() -> [Timeframe; 8] {
        [
            Timeframe::OneMinute,
            Timeframe::FiveMinutes,
            Timeframe::FifteenMinutes,
            Timeframe::ThirtyMinutes,
            Timeframe::OneHour,
            Timeframe::FourHours,
            Timeframe::OneDay,
            Timeframe::OneWeek,
        ]
    }

    /// Parsing never fails; unrecognized input becomes `Other`
    pub fn parse(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| Timeframe::Other(tag.to_string()))
    }

    pub fn duration_ms(&self) -> i64 {
        match self {
            Self::OneMinute => MINUTE_MS,
            Self::FiveMinutes => 5 * MINUTE_MS,
            Self::FifteenMinutes => 15 * MINUTE_MS,
            Self::ThirtyMinutes => 30 * MINUTE_MS,
            Self::OneHour => HOUR_MS,
            Self::FourHours => 4 * HOUR_MS,
            Self::OneDay => DAY_MS,
            Self::OneWeek => 7 * DAY_MS,
            Self::Other(_) => DAY_MS,
        }
    }

    pub fn granularity(&self) -> TickGranularity {
        match self {
            Self::OneMinute | Self::FiveMinutes | Self::FifteenMinutes | Self::ThirtyMinutes => {
                TickGranularity::SubHour
            }
            Self::OneHour | Self::FourHours => TickGranularity::Hour,
            Self::OneDay => TickGranularity::Day,
            Self::OneWeek => TickGranularity::Week,
            Self::Other(_) => TickGranularity::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::OneDay
    }
}

impl Serialize for Timeframe {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timeframe {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Timeframe::parse(&tag))
    }
}

use crate::domain::market_data::{TickGranularity, Timeframe};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Formats an x-axis tick label for the chart's timeframe, in UTC.
///
/// - sub-hour timeframes -> `HH:MM`
/// - `1H`/`4H` -> `M/D HH:00`
/// - `1D` -> `M/D`
/// - `1W` -> `M/D/YY`
/// - anything else -> `M/D/YYYY`
pub fn format_tick_label(timestamp_ms: i64, timeframe: &Timeframe) -> String {
    let Some(date) = utc(timestamp_ms) else {
        return String::new();
    };
    match timeframe.granularity() {
        TickGranularity::SubHour => format!("{:02}:{:02}", date.hour(), date.minute()),
        TickGranularity::Hour => format!("{}/{} {:02}:00", date.month(), date.day(), date.hour()),
        TickGranularity::Day => format!("{}/{}", date.month(), date.day()),
        TickGranularity::Week => {
            format!("{}/{}/{:02}", date.month(), date.day(), date.year().rem_euclid(100))
        }
        TickGranularity::Unknown => format!("{}/{}/{}", date.month(), date.day(), date.year()),
    }
}

fn utc(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}

#[cfg(test)]
mod tests {
    use super::format_tick_label;
    use crate::domain::market_data::Timeframe;

    // 2024-03-05 14:07:00 UTC
    const TS: i64 = 1_709_647_620_000;

    #[test]
    fn label_follows_timeframe() {
        assert_eq!(format_tick_label(TS, &Timeframe::parse("5m")), "14:07");
        assert_eq!(format_tick_label(TS, &Timeframe::parse("4H")), "3/5 14:00");
        assert_eq!(format_tick_label(TS, &Timeframe::parse("1D")), "3/5");
        assert_eq!(format_tick_label(TS, &Timeframe::parse("1W")), "3/5/24");
        assert_eq!(format_tick_label(TS, &Timeframe::parse("3M")), "3/5/2024");
    }

    #[test]
    fn epoch_is_midnight() {
        assert_eq!(format_tick_label(0, &Timeframe::parse("1m")), "00:00");
    }
}

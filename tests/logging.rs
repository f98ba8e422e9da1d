use price_chart_annotate::application::ChartCoordinator;
use price_chart_annotate::domain::chart::{Chart, ChartConfig, ContainerSize};
use price_chart_annotate::domain::events::CommandChannel;
use price_chart_annotate::domain::logging::{LogComponent, LogEntry, LogLevel, Logger, get_logger, init_logger};
use price_chart_annotate::domain::market_data::Candle;
use std::sync::{Arc, Mutex};

struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for RecordingLogger {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().expect("lock").push(entry);
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

// One test per binary: the logger can only be installed once.
#[test]
fn rejected_series_is_logged_as_warning() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    init_logger(Box::new(RecordingLogger { entries: entries.clone() }));

    get_logger().debug(LogComponent::Domain("Test"), "dropped below min level");

    let chart = Chart::new("log".to_string(), ChartConfig::default(), ContainerSize::new(800.0, 500.0));
    let mut coordinator = ChartCoordinator::new(chart, CommandChannel::new());
    let bad = vec![Candle::from_values(0, 10.0, 9.5, 9.0, 10.5, 1.0)];
    assert!(coordinator.load_candles(Arc::new(bad)).is_err());

    let entries = entries.lock().expect("lock");
    assert!(entries.iter().all(|entry| entry.level >= LogLevel::Info));

    let warning = entries
        .iter()
        .find(|entry| entry.level == LogLevel::Warn)
        .expect("warning logged");
    assert_eq!(warning.component, LogComponent::Application("ChartCoordinator"));
    assert!(warning.message.starts_with("Rejected candle update"));

    let line = warning.format_line();
    assert!(line.contains("WARN  app/ChartCoordinator: Rejected candle update"));
}

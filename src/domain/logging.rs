use derive_more::Display;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = "INFO ")]
    Info,
    #[display(fmt = "WARN ")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer and type that produced a log line, e.g. `LogComponent::Domain("Chart")`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "domain/{}", _0)]
    Domain(&'static str),
    #[display(fmt = "app/{}", _0)]
    Application(&'static str),
    #[display(fmt = "infra/{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "ui/{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp_ms: get_time_provider().now_ms(),
            level,
            component,
            message: message.to_string(),
        }
    }

    /// `[time] LEVEL component: message`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            get_time_provider().format_time(self.timestamp_ms),
            self.level,
            self.component,
            self.message
        )
    }
}

/// Clock used to stamp log entries and chart events
pub trait TimeProvider: Send + Sync {
    fn now_ms(&self) -> u64;
    fn format_time(&self, timestamp_ms: u64) -> String;
}

/// Sink for log entries. Entries below `min_level` are dropped before they
/// are built.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn emit(&self, level: LogLevel, component: LogComponent, message: &str) {
        if level >= self.min_level() {
            self.log(LogEntry::new(level, component, message));
        }
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Error, component, message);
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Installs the process-wide logger; only the first call wins
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Installs the process-wide clock; only the first call wins
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

/// The installed logger, or a sink that drops everything
pub fn get_logger() -> &'static dyn Logger {
    match GLOBAL_LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &SilentLogger,
    }
}

/// The installed clock, or a counter when running outside the browser
pub fn get_time_provider() -> &'static dyn TimeProvider {
    match GLOBAL_TIME_PROVIDER.get() {
        Some(provider) => provider.as_ref(),
        None => &SequenceTimeProvider,
    }
}

struct SilentLogger;

impl Logger for SilentLogger {
    fn log(&self, _entry: LogEntry) {}

    fn min_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn now_ms(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TICKS: AtomicU64 = AtomicU64::new(0);
        TICKS.fetch_add(1, Ordering::Relaxed)
    }

    fn format_time(&self, timestamp_ms: u64) -> String {
        format!("#{:06}", timestamp_ms)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $component:expr, $($arg:tt)*) => {{
        let logger = $crate::domain::logging::get_logger();
        if $level >= logger.min_level() {
            logger.emit($level, $component, &format!($($arg)*));
        }
    }};
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        $crate::log_at!($crate::domain::logging::LogLevel::Debug, $component, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Error, $component, $($arg)*)
    };
}

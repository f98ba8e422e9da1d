use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;

/// Installs the panic hook, console logger and browser clock
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info };
    let console_logger = infrastructure::services::ConsoleLogger::new(level);
    domain::logging::init_logger(Box::new(app::LeptosLogger::new(console_logger, LogLevel::Info)));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "price-chart-annotate initialized");
}

/// Mounts the demo dashboard into `<body>`
#[wasm_bindgen(js_name = mountDashboard)]
pub fn mount_dashboard() {
    leptos::mount_to_body(app::App);
}

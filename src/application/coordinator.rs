use crate::domain::{
    chart::{Chart, DirtyFlags, PointerOutcome},
    errors::ValidationResult,
    events::{ChartCommand, ChartEvent, CommandChannel, EventDispatcher, InMemoryEventDispatcher},
    logging::LogComponent,
    market_data::{Candle, services::validate_series},
    state::MarketSnapshot,
};
use crate::{log_info, log_warn};
use std::sync::Arc;

/// Owns one chart, drains its command channel and tells subscribers what
/// changed. Every public call ends with a flush, so the scene is current
/// when it returns.
pub struct ChartCoordinator {
    chart: Chart,
    commands: CommandChannel,
    dispatcher: InMemoryEventDispatcher,
}

impl ChartCoordinator {
    pub fn new(chart: Chart, commands: CommandChannel) -> Self {
        log_info!(LogComponent::Application("ChartCoordinator"), "Creating coordinator for chart '{}'", chart.id);
        Self { chart, commands, dispatcher: InMemoryEventDispatcher::new() }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart {
        &mut self.chart
    }

    /// A sender for the same queue this coordinator drains
    pub fn commands(&self) -> CommandChannel {
        self.commands.clone()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.dispatcher.subscribe_to_chart_events(handler);
    }

    /// Executes queued commands in order, then flushes
    pub fn process_commands(&mut self) -> usize {
        let commands = self.commands.drain();
        let count = commands.len();
        for command in commands {
            self.execute(command);
        }
        self.flush();
        count
    }

    /// Validates and swaps in a new candle array. An invalid series is
    /// rejected and the chart keeps what it had.
    pub fn load_candles(&mut self, candles: Arc<Vec<Candle>>) -> ValidationResult<()> {
        if let Err(err) = validate_series(&candles) {
            log_warn!(LogComponent::Application("ChartCoordinator"), "Rejected candle update: {}", err);
            self.publish(ChartEvent::DataRejected { chart_id: self.chart.id.clone(), reason: err.to_string() });
            return Err(err);
        }
        let candle_count = candles.len();
        self.chart.replace_candles(candles);
        self.flush();
        self.publish(ChartEvent::DataUpdated { chart_id: self.chart.id.clone(), candle_count });
        Ok(())
    }

    /// Like [`Self::load_candles`] but also switches symbol and timeframe
    pub fn load_snapshot(&mut self, snapshot: MarketSnapshot) -> ValidationResult<()> {
        if let Err(err) = validate_series(&snapshot.candles) {
            log_warn!(
                LogComponent::Application("ChartCoordinator"),
                "Rejected {} {} snapshot: {}",
                snapshot.symbol,
                snapshot.timeframe,
                err
            );
            self.publish(ChartEvent::DataRejected { chart_id: self.chart.id.clone(), reason: err.to_string() });
            return Err(err);
        }
        let candle_count = snapshot.candles.len();
        self.chart.set_market(snapshot);
        self.flush();
        self.publish(ChartEvent::DataUpdated { chart_id: self.chart.id.clone(), candle_count });
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> PointerOutcome {
        let outcome = self.chart.pointer_down(x, y);
        self.after_pointer(&outcome);
        outcome
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerOutcome {
        let outcome = self.chart.pointer_move(x, y);
        self.after_pointer(&outcome);
        outcome
    }

    pub fn pointer_up(&mut self) -> PointerOutcome {
        let outcome = self.chart.pointer_up();
        self.after_pointer(&outcome);
        outcome
    }

    pub fn pointer_leave(&mut self) {
        self.chart.pointer_leave();
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        let changed = self.chart.wheel(x, y, delta_y);
        if changed {
            self.publish_view();
        }
        changed
    }

    pub fn flush(&mut self) -> DirtyFlags {
        self.chart.flush()
    }

    fn execute(&mut self, command: ChartCommand) {
        let chart_id = self.chart.id.clone();
        match command {
            ChartCommand::SelectTool(tool) => {
                if self.chart.select_tool(tool) {
                    self.publish(ChartEvent::ToolChanged { chart_id, tool });
                }
            }
            ChartCommand::ClearDrawings => {
                self.chart.clear_drawings();
                self.publish(ChartEvent::DrawingsCleared { chart_id });
            }
            ChartCommand::SetMode(mode) => {
                if self.chart.set_mode(mode) {
                    self.publish(ChartEvent::ModeChanged { chart_id, mode });
                }
            }
            ChartCommand::ZoomIn => {
                if self.chart.zoom_in() {
                    self.publish_view();
                }
            }
            ChartCommand::ZoomOut => {
                if self.chart.zoom_out() {
                    self.publish_view();
                }
            }
            ChartCommand::ResetZoom => {
                if self.chart.reset_zoom() {
                    self.publish_view();
                }
            }
        }
    }

    fn after_pointer(&mut self, outcome: &PointerOutcome) {
        match outcome {
            PointerOutcome::Committed(drawing) => {
                log_info!(LogComponent::Application("ChartCoordinator"), "Drawing committed: {}", drawing.tool());
                self.publish(ChartEvent::DrawingCommitted {
                    chart_id: self.chart.id.clone(),
                    drawing: drawing.clone(),
                });
            }
            PointerOutcome::Panned => self.publish_view(),
            PointerOutcome::Gesture | PointerOutcome::Ignored => {}
        }
        self.flush();
    }

    fn publish_view(&self) {
        self.publish(ChartEvent::ViewChanged {
            chart_id: self.chart.id.clone(),
            transform: self.chart.view_transform(),
        });
    }

    fn publish(&self, event: ChartEvent) {
        self.dispatcher.publish_chart_event(event);
    }
}

use crate::domain::chart::drawing::{Drawing, ToolId};
use crate::domain::chart::transform::ViewTransform;
use crate::domain::chart::value_objects::ChartMode;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::rc::Rc;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> u64 {
        use crate::domain::logging::get_time_provider;
        get_time_provider().now_ms()
    }
}

/// Requests from toolbar-like collaborators, consumed by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum ChartCommand {
    SelectTool(Option<ToolId>),
    ClearDrawings,
    SetMode(ChartMode),
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

/// Single-threaded command queue shared between the senders and the chart
/// that drains it. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct CommandChannel {
    queue: Rc<RefCell<VecDeque<ChartCommand>>>,
}

impl CommandChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&self, command: ChartCommand) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Removes and returns every queued command in send order
    pub fn drain(&self) -> Vec<ChartCommand> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// What happened to a chart, for host subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    DataUpdated { chart_id: String, candle_count: usize },
    DataRejected { chart_id: String, reason: String },
    ToolChanged { chart_id: String, tool: Option<ToolId> },
    DrawingCommitted { chart_id: String, drawing: Drawing },
    DrawingsCleared { chart_id: String },
    ModeChanged { chart_id: String, mode: ChartMode },
    ViewChanged { chart_id: String, transform: ViewTransform },
}

impl DomainEvent for ChartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::DataUpdated { .. } => "DataUpdated",
            ChartEvent::DataRejected { .. } => "DataRejected",
            ChartEvent::ToolChanged { .. } => "ToolChanged",
            ChartEvent::DrawingCommitted { .. } => "DrawingCommitted",
            ChartEvent::DrawingsCleared { .. } => "DrawingsCleared",
            ChartEvent::ModeChanged { .. } => "ModeChanged",
            ChartEvent::ViewChanged { .. } => "ViewChanged",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent);
}

/// Handlers are called synchronously, in subscription order
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    chart_handlers: Vec<Box<dyn Fn(&ChartEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_to_chart_events<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.chart_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent) {
        for handler in &self.chart_handlers {
            handler(&event);
        }
    }
}

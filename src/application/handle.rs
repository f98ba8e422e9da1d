use crate::application::ChartCoordinator;
use crate::domain::events::ChartEvent;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type Listener = Rc<dyn Fn(&ChartEvent)>;

/// Shared access to one coordinator for hosts whose event handlers call
/// back into the chart. Events raised during [`ChartHandle::update`] are
/// queued and handed to listeners only after the coordinator borrow is
/// released, so a listener may `read` or `update` the same chart.
#[derive(Clone)]
pub struct ChartHandle {
    coordinator: Rc<RefCell<ChartCoordinator>>,
    pending: Rc<RefCell<VecDeque<ChartEvent>>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    delivering: Rc<Cell<bool>>,
}

impl ChartHandle {
    pub fn new(mut coordinator: ChartCoordinator) -> Self {
        let pending: Rc<RefCell<VecDeque<ChartEvent>>> = Rc::default();
        let queue = pending.clone();
        coordinator.subscribe(move |event| queue.borrow_mut().push_back(event.clone()));
        Self {
            coordinator: Rc::new(RefCell::new(coordinator)),
            pending,
            listeners: Rc::default(),
            delivering: Rc::default(),
        }
    }

    pub fn listen<F>(&self, listener: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn read<R>(&self, f: impl FnOnce(&ChartCoordinator) -> R) -> R {
        f(&self.coordinator.borrow())
    }

    /// Runs `f` with the coordinator borrowed mutably, then delivers the
    /// events it raised
    pub fn update<R>(&self, f: impl FnOnce(&mut ChartCoordinator) -> R) -> R {
        let result = f(&mut self.coordinator.borrow_mut());
        self.deliver();
        result
    }

    /// Events are delivered in publish order. A nested `update` from a
    /// listener queues its events behind the ones already pending.
    fn deliver(&self) {
        if self.delivering.replace(true) {
            return;
        }
        loop {
            let Some(event) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            let listeners: Vec<Listener> = self.listeners.borrow().clone();
            for listener in listeners {
                listener(&event);
            }
        }
        self.delivering.set(false);
    }
}

/// Start/stop switch for a polling loop. Each `start` hands out a token;
/// `stop` or a later `start` makes every older token stale, so a loop that
/// checks its token after each wake never outlives its own session.
#[derive(Debug, Clone, Default)]
pub struct StreamControl {
    generation: Rc<Cell<u64>>,
    running: Rc<Cell<bool>>,
}

impl StreamControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while a stream is already running
    pub fn start(&self) -> Option<StreamToken> {
        if self.running.replace(true) {
            return None;
        }
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        Some(StreamToken { generation, current: self.generation.clone() })
    }

    pub fn stop(&self) {
        self.running.set(false);
        self.generation.set(self.generation.get() + 1);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[derive(Debug, Clone)]
pub struct StreamToken {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl StreamToken {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }
}

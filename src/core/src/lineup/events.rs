use crate::lineup::Slot;
use crate::roster::{PlayerId, Position};
use chrono::{NaiveDateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Cleared,
    Assigned {
        period: u32,
        player: PlayerId,
        position: Position,
    },
    Benched {
        period: u32,
        player: PlayerId,
    },
    JerseyPrep {
        period: u32,
        player: PlayerId,
    },
    Removed {
        period: u32,
        player: PlayerId,
        from: Slot,
    },
}

impl GridEvent {
    pub fn period(&self) -> Option<u32> {
        match self {
            GridEvent::Cleared => None,
            GridEvent::Assigned { period, .. }
            | GridEvent::Benched { period, .. }
            | GridEvent::JerseyPrep { period, .. }
            | GridEvent::Removed { period, .. } => Some(*period),
        }
    }
}

/// Hook invoked from inside every grid mutation.
pub trait GridObserver {
    fn on_event(&mut self, event: &GridEvent);
}

impl<T: GridObserver> GridObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &GridEvent) {
        self.borrow_mut().on_event(event);
    }
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub recorded_at: NaiveDateTime,
    pub event: GridEvent,
}

const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Bounded edit log. Register a shared handle with `LineupGrid::subscribe`
/// and keep a clone to read it back.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EditHistory {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn shared() -> Rc<RefCell<EditHistory>> {
        Rc::new(RefCell::new(EditHistory::new()))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn events(&self) -> impl Iterator<Item = &GridEvent> {
        self.entries.iter().map(|e| &e.event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl GridObserver for EditHistory {
    fn on_event(&mut self, event: &GridEvent) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }

        self.entries.push(HistoryEntry {
            recorded_at: Utc::now().naive_utc(),
            event: event.clone(),
        });
    }
}

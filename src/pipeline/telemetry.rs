//! Progress reporting abstraction
//!
//! The comparison stage announces each (key, width) pair it visits so the
//! CLI can drive a progress bar while library callers and tests stay silent
//! or record events.

use std::cell::RefCell;

use crate::diff::ComparisonResult;
use crate::naming::ShotId;

/// Events emitted while comparing screenshot pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiffEvent<'a> {
    /// Comparison started; `pairs` = keys x configured widths
    Started {
        /// Number of candidate pairs that will be visited
        pairs: u64,
    },
    /// A pair was reconciled, diffed and recorded
    Compared(&'a ComparisonResult),
    /// A pair was skipped because one side was missing
    Skipped(&'a ShotId),
    /// All pairs visited
    Finished,
}

/// Trait for pluggable progress observation
pub trait ProgressObserver {
    /// Receive one event
    fn observe(&self, event: DiffEvent<'_>);
}

/// Observer that ignores everything (default)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl ProgressObserver for NoOpObserver {
    fn observe(&self, _event: DiffEvent<'_>) {}
}

/// Owned copy of a [`DiffEvent`] for inspection
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    /// See [`DiffEvent::Started`]
    Started(u64),
    /// See [`DiffEvent::Compared`]
    Compared(ShotId),
    /// See [`DiffEvent::Skipped`]
    Skipped(ShotId),
    /// See [`DiffEvent::Finished`]
    Finished,
}

/// In-memory observer for testing
#[derive(Debug, Default)]
pub struct MemoryObserver {
    events: RefCell<Vec<RecordedEvent>>,
}

impl MemoryObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything observed so far, in order
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Ids of skipped pairs
    pub fn skipped(&self) -> Vec<ShotId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Skipped(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ProgressObserver for MemoryObserver {
    fn observe(&self, event: DiffEvent<'_>) {
        let recorded = match event {
            DiffEvent::Started { pairs } => RecordedEvent::Started(pairs),
            DiffEvent::Compared(result) => RecordedEvent::Compared(result.shot_id()),
            DiffEvent::Skipped(id) => RecordedEvent::Skipped(id.clone()),
            DiffEvent::Finished => RecordedEvent::Finished,
        };
        self.events.borrow_mut().push(recorded);
    }
}

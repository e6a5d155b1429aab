//! The open list of leaf nodes waiting to be expanded.
//!
//! One `VecDeque` serves all three disciplines: depth-first pushes to the
//! front, breadth-first pushes to the back, and the heuristic strategies keep
//! the deque sorted by `(f, h)`. All of them pop from the front. A run only
//! ever uses one discipline, which is what keeps the ordered variant sorted.

use std::collections::{TryReserveError, VecDeque};

use log::trace;

use crate::{node::NodeId, strategy::Discipline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: NodeId,
    pub f: u64,
    pub h: u64,
}

impl FrontierEntry {
    fn key(&self) -> (u64, u64) {
        (self.f, self.h)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
    peak: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest size the frontier has reached.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn push(&mut self, entry: FrontierEntry, discipline: Discipline) -> Result<(), TryReserveError> {
        match discipline {
            Discipline::Lifo => self.push_front(entry),
            Discipline::Fifo => self.push_back(entry),
            Discipline::Ordered => self.push_ordered(entry),
        }
    }

    pub fn push_front(&mut self, entry: FrontierEntry) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        trace!("added to the front: {:?}", entry);
        self.entries.push_front(entry);
        self.grew();
        Ok(())
    }

    pub fn push_back(&mut self, entry: FrontierEntry) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        trace!("added to the back: {:?}", entry);
        self.entries.push_back(entry);
        self.grew();
        Ok(())
    }

    /// Insert in front of the first entry whose `(f, h)` is not strictly
    /// smaller than the new entry's. Entries with an equal key end up behind
    /// the new one.
    pub fn push_ordered(&mut self, entry: FrontierEntry) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        let at = self.entries.partition_point(|e| e.key() < entry.key());
        trace!("added in order at {} (f={}, h={}): {:?}", at, entry.f, entry.h, entry.node);
        self.entries.insert(at, entry);
        self.grew();
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<FrontierEntry> {
        self.entries.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter()
    }

    fn grew(&mut self) {
        self.peak = self.peak.max(self.entries.len());
    }
}

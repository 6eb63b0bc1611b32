//! Deferred actions
//!
//! Delayed gameplay (ball respawn, next round) is queued with a tick deadline
//! and drained at the start of every tick. Entries carry an owner so that
//! resetting or destroying the owner cancels whatever it left pending.

use serde::{Deserialize, Serialize};

/// Who a deferred action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Ball,
    Match,
}

/// Work that runs once its deadline passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    RespawnBall,
    AdvanceRound,
}

/// Handle returned by `schedule`, usable with `cancel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    id: TimerId,
    deadline: u64,
    owner: Owner,
    action: Deferred,
}

/// Tick-based timer queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run on the first drain at or after `deadline`
    pub fn schedule(&mut self, deadline: u64, owner: Owner, action: Deferred) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            owner,
            action,
        });
        id
    }

    /// Cancel one entry; returns whether it was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel everything an owner has pending; returns how many were dropped
    pub fn cancel_owner(&mut self, owner: Owner) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    pub fn has_pending(&self, owner: Owner, action: Deferred) -> bool {
        self.entries
            .iter()
            .any(|e| e.owner == owner && e.action == action)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return due actions, earliest deadline first, then in
    /// scheduling order
    pub fn drain_due(&mut self, now: u64) -> Vec<(Owner, Deferred)> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline <= now {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.deadline, e.id.0));
        due.into_iter().map(|e| (e.owner, e.action)).collect()
    }
}

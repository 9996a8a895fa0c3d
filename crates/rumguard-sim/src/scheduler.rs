//! Deferred actions keyed by the entity that owns them.
//!
//! Every "after N seconds" effect (stumble recovery, net release, reload,
//! respawn, corpse removal) is an entry here rather than a timer on the
//! entity. An entry whose owner no longer exists is dropped, never fired.

use hecs::{Entity, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    RecoverFromStumble,
    ReleaseNet,
    FinishReload,
    RespawnPlayer,
    ReleaseStun,
    DespawnCorpse,
    ReloadCannon,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: f64,
    /// Insertion order; breaks ties between equal due times.
    seq: u64,
    owner: Entity,
    action: DeferredAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, owner: Entity, due: f64, action: DeferredAction) {
        self.entries.push(Entry {
            due,
            seq: self.next_seq,
            owner,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove every pending action of `owner`. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != owner);
        before - self.entries.len()
    }

    /// Remove one pending action kind of `owner`.
    pub fn cancel(&mut self, owner: Entity, action: DeferredAction) {
        self.entries
            .retain(|entry| !(entry.owner == owner && entry.action == action));
    }

    pub fn is_pending(&self, owner: Entity, action: DeferredAction) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.owner == owner && entry.action == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every action due at `now`, in due-time order. Entries owned by
    /// entities no longer in `world` are discarded.
    pub fn drain_due(&mut self, now: f64, world: &World) -> Vec<(Entity, DeferredAction)> {
        let mut due = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter()
            .filter(|entry| world.contains(entry.owner))
            .map(|entry| (entry.owner, entry.action))
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

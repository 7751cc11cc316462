//! Read-through entity cache with optimistic writes.
//!
//! Holds fetched entities as an ordered id list plus a by-id index, the two
//! kept in lockstep. Optimistic writes snapshot the pre-write state so a
//! failed round trip restores the cache exactly, value and position included.

use std::collections::HashMap;

use crate::store::Keyed;

#[derive(Debug, Clone)]
pub struct EntityCache<T> {
    order: Vec<String>,
    by_id: HashMap<String, T>,
}

/// Token returned by [`EntityCache::begin_optimistic`]. Carries the pre-write
/// snapshot needed to commit or roll the write back.
#[derive(Debug, Clone)]
pub struct OptimisticWrite<T> {
    id: String,
    prior: Option<(usize, T)>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        EntityCache {
            order: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<T: Keyed + Clone> EntityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and take a freshly fetched list.
    pub fn replace_all(&mut self, entities: Vec<T>) {
        self.order = entities.iter().map(|e| e.key().to_string()).collect();
        self.by_id = entities
            .into_iter()
            .map(|e| (e.key().to_string(), e))
            .collect();
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    /// Entities in list order.
    pub fn all(&self) -> Vec<&T> {
        self.order.iter().filter_map(|id| self.by_id.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert or overwrite. New entries go to the front, the way freshly
    /// created events are shown ahead of older ones.
    pub fn upsert(&mut self, entity: T) {
        let id = entity.key().to_string();
        if !self.by_id.contains_key(&id) {
            self.order.insert(0, id.clone());
        }
        self.by_id.insert(id, entity);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.order.retain(|k| k != id);
        self.by_id.remove(id)
    }

    /// Apply `value` immediately, before server confirmation, and return a
    /// token for committing or rolling the write back.
    pub fn begin_optimistic(&mut self, value: T) -> OptimisticWrite<T> {
        let id = value.key().to_string();
        let prior = self
            .order
            .iter()
            .position(|k| k == &id)
            .and_then(|pos| self.by_id.get(&id).cloned().map(|v| (pos, v)));
        self.upsert(value);
        OptimisticWrite { id, prior }
    }

    /// Replace the optimistic value with the server-confirmed one. Handles
    /// the id move of an optimistic create (temp id to assigned id).
    pub fn commit(&mut self, write: OptimisticWrite<T>, confirmed: T) {
        let confirmed_id = confirmed.key().to_string();

        if confirmed_id != write.id {
            if let Some(pos) = self.order.iter().position(|k| k == &write.id) {
                self.order[pos] = confirmed_id.clone();
            }
            self.by_id.remove(&write.id);

            // A refetch may have already inserted the confirmed id; keep the
            // first occurrence only.
            let mut seen = false;
            self.order.retain(|k| {
                if k == &confirmed_id {
                    if seen {
                        return false;
                    }
                    seen = true;
                }
                true
            });
        }

        self.by_id.insert(confirmed_id, confirmed);
    }

    /// Restore the pre-write state: the prior value back in its old position,
    /// or removal when the write introduced the entry.
    pub fn rollback(&mut self, write: OptimisticWrite<T>) {
        match write.prior {
            Some((pos, value)) => {
                self.order.retain(|k| k != &write.id);
                let pos = pos.min(self.order.len());
                self.order.insert(pos, write.id.clone());
                self.by_id.insert(write.id, value);
            }
            None => {
                self.remove(&write.id);
            }
        }
    }
}

//! A small map holding at most a fixed number of entries, evicting the least
//! recently used entry on overflow. Not synchronized: one owner at a time.
use crate::authoring::*;

#[derive(Debug)]
pub struct BoundedCache<K: Ord + Clone + std::fmt::Debug, V> {
    bound: usize,
    tick: u64,
    entries: BTreeMap<K, (u64, V)>,
}

impl<K: Ord + Clone + std::fmt::Debug, V> BoundedCache<K, V> {
    /// A cache of at most `bound` entries (at least one)
    #[must_use]
    pub fn new(bound: usize) -> Self {
        BoundedCache {
            bound: bound.max(1),
            tick: 0,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Change the bound, evicting right away if the cache is now too large
    pub fn set_bound(&mut self, bound: usize) {
        self.bound = bound.max(1);
        self.evict();
    }

    /// Look up, marking the entry as the most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(key)?;
        entry.0 = tick;
        trace!("Cache hit: {key:?}");
        Some(&entry.1)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.tick += 1;
        self.entries.insert(key, (self.tick, value));
        self.evict();
    }

    fn evict(&mut self) {
        while self.entries.len() > self.bound {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, (tick, _))| *tick)
                .map(|(key, _)| key.clone())
            else {
                return;
            };
            trace!("Cache eviction: {oldest:?}");
            self.entries.remove(&oldest);
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_recently_used() {
        let mut cache = BoundedCache::new(2);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.get(&1), Some(&"one"));

        // 2 is now the least recently used
        cache.insert(3, "three");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.get(&3), Some(&"three"));

        // Replacing does not grow the cache
        cache.insert(3, "drei");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&3), Some(&"drei"));
    }

    #[test]
    fn bound() {
        let mut cache = BoundedCache::new(0);
        assert_eq!(cache.bound(), 1);
        cache.set_bound(10);
        for i in 0..25 {
            cache.insert(i, i * i);
            assert!(cache.len() <= 10);
        }
        assert_eq!(cache.get(&24), Some(&576));
        assert_eq!(cache.get(&0), None);

        cache.set_bound(3);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&24), Some(&576));
        assert_eq!(cache.get(&21), None);
    }
}

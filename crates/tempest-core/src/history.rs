//! Fixed-capacity circular buffer for the observation history.
//!
//! Storage is allocated once at construction. `head` points at the oldest
//! element and `len` counts occupied slots; a push at capacity overwrites the
//! oldest slot and advances `head`.

/// Ring buffer that evicts its oldest element when full.
#[derive(Debug)]
pub struct HistoryRing<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> HistoryRing<T> {
    /// Create a ring holding at most `capacity` elements (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(1);
        let slots = std::iter::repeat_with(|| None).take(cap).collect();
        Self { slots, head: 0, len: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `item` as the newest element.
    /// Returns the evicted oldest element when the ring was already full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let cap = self.capacity();
        if self.len < cap {
            let idx = (self.head + self.len) % cap;
            if let Some(slot) = self.slots.get_mut(idx) {
                *slot = Some(item);
            }
            self.len += 1;
            None
        } else {
            let evicted = self.slots.get_mut(self.head).and_then(|slot| slot.replace(item));
            self.head = (self.head + 1) % cap;
            evicted
        }
    }

    /// Newest element.
    pub fn latest(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + self.len - 1) % self.capacity();
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Oldest element.
    pub fn oldest(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.slots.get(self.head).and_then(Option::as_ref)
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let cap = self.capacity();
        (0..self.len).filter_map(move |i| self.slots.get((self.head + i) % cap).and_then(Option::as_ref))
    }
}

impl<T: Clone> HistoryRing<T> {
    /// Chronological copy of the contents.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

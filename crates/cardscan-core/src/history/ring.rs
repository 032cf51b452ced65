use std::collections::VecDeque;
use std::fmt::Debug;

/// Fixed-capacity ring that evicts its oldest entry once full.
#[derive(Clone, Debug)]
pub struct BoundedRing<T: Clone> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone + Debug> BoundedRing<T> {
    pub fn new(capacity: usize) -> Self {
        BoundedRing {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `value`, returning the evicted entry if the ring was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(value);
        }

        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };

        self.items.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut ring = BoundedRing::new(3);
        assert!(ring.push(1).is_none());
        assert!(ring.push(2).is_none());
        assert!(ring.push(3).is_none());
        assert_eq!(ring.len(), 3);

        assert_eq!(ring.push(4), Some(1));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut ring = BoundedRing::new(0);
        assert_eq!(ring.push("a"), Some("a"));
        assert!(ring.is_empty());
    }
}

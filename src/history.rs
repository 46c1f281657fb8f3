use crate::cluster::PointCluster;

use std::collections::VecDeque;
use std::fmt;

/// Bounded record of the clusters a track has been fed.
///
/// Keeps the newest `capacity` observations and drops the oldest when full.
/// The latest observation is always present.
pub struct ObservationHistory {
    deque: VecDeque<PointCluster>,
    capacity: usize,
    total: u64,
}

impl Clone for ObservationHistory {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
            capacity: self.capacity,
            total: self.total,
        }
    }
}

impl fmt::Debug for ObservationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHistory")
            .field("len", &self.deque.len())
            .field("capacity", &self.capacity)
            .field("total", &self.total)
            .finish()
    }
}

impl ObservationHistory {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        let capacity = cap.max(1);

        Self {
            deque: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    /// Appends `cluster`, returning the evicted oldest observation if the
    /// buffer was full.
    #[inline]
    pub fn push(&mut self, cluster: PointCluster) -> Option<PointCluster> {
        let evicted = if self.is_full() {
            self.deque.pop_front()
        } else {
            None
        };

        self.deque.push_back(cluster);
        self.total += 1;

        evicted
    }

    #[inline]
    pub fn latest(&self) -> Option<&PointCluster> {
        self.deque.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.deque.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of observations ever pushed, including evicted ones.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ PointCluster> {
        self.deque.iter()
    }

    /// Newest to oldest.
    #[inline]
    pub fn rev_iter(&self) -> impl Iterator<Item = &'_ PointCluster> {
        self.deque.iter().rev()
    }
}

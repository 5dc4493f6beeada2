//! Bounded top-K selection over a stream of scored items.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A payload with its score and the key used to break score ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredItem<P> {
    pub score: u64,
    pub key: String,
    pub payload: P,
}

impl<P> ScoredItem<P> {
    pub fn new(score: u64, key: impl Into<String>, payload: P) -> Self {
        Self {
            score,
            key: key.into(),
            payload,
        }
    }
}

/// Total order where `Less` means "ranks higher".
fn rank<P>(a: &ScoredItem<P>, b: &ScoredItem<P>) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.key.cmp(&b.key))
}

/// Heap entry. `BinaryHeap` keeps the greatest element on top, and the
/// greatest here is the lowest-ranked item, so `peek()` is the eviction cutoff.
#[derive(Debug)]
struct Ranked<P>(ScoredItem<P>);

impl<P> PartialEq for Ranked<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P> Eq for Ranked<P> {}

impl<P> PartialOrd for Ranked<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for Ranked<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(&self.0, &other.0)
    }
}

/// The K best items seen so far.
///
/// `offer` is O(log K); memory never exceeds K items. Membership is decided
/// by the heap, presentation order once by [`TopK::finalize`].
#[derive(Debug)]
pub struct TopK<P> {
    k: usize,
    heap: BinaryHeap<Ranked<P>>,
}

impl<P> TopK<P> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(4096)),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer one item. Returns whether it was retained.
    pub fn offer(&mut self, item: ScoredItem<P>) -> bool {
        if self.k == 0 {
            return false;
        }
        let candidate = Ranked(item);
        if self.heap.len() < self.k {
            self.heap.push(candidate);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if candidate < *worst => {
                // PeekMut restores the heap property on drop.
                *worst = candidate;
                true
            }
            _ => false,
        }
    }

    /// Fold another partial result into this one.
    pub fn merge(&mut self, other: TopK<P>) {
        for Ranked(item) in other.heap.into_vec() {
            self.offer(item);
        }
    }

    /// Retained items, highest score first, ties by ascending key.
    pub fn finalize(self) -> Vec<ScoredItem<P>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Ranked(item)| item)
            .collect()
    }
}

//! Streaming aggregation: bounded top-K plus running totals.
//!
//! Items are pulled one at a time and handed to both the [`TopK`] selector
//! and the [`Accumulator`] before the next one is pulled. Only the K winners
//! outlive the pass.

pub mod accumulator;
pub mod topk;

pub use accumulator::Accumulator;
pub use topk::{ScoredItem, TopK};

use serde::Serialize;
use std::fmt::Display;
use tracing::warn;

/// Final, immutable result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult<P> {
    /// Items seen (skipped items excluded).
    pub count: u64,
    /// Sum of the scores of all items seen.
    pub sum: u64,
    /// Items the source failed to produce.
    pub skipped: u64,
    /// Best items, highest score first, ties by ascending key.
    pub top: Vec<ScoredItem<P>>,
}

/// Feeds every item to the selector and the accumulator.
#[derive(Debug)]
pub struct Aggregator<P> {
    top: TopK<P>,
    totals: Accumulator,
    skipped: u64,
}

impl<P> Aggregator<P> {
    pub fn new(k: usize) -> Self {
        Self {
            top: TopK::new(k),
            totals: Accumulator::new(),
            skipped: 0,
        }
    }

    pub fn offer(&mut self, item: ScoredItem<P>) {
        self.totals.offer(item.score);
        self.top.offer(item);
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn finish(self) -> AggregateResult<P> {
        AggregateResult {
            count: self.totals.count,
            sum: self.totals.sum,
            skipped: self.skipped,
            top: self.top.finalize(),
        }
    }
}

/// Aggregate an infallible item stream.
pub fn aggregate<P, I>(items: I, k: usize) -> AggregateResult<P>
where
    I: IntoIterator<Item = ScoredItem<P>>,
{
    let mut aggregator = Aggregator::new(k);
    for item in items {
        aggregator.offer(item);
    }
    aggregator.finish()
}

/// Aggregate a stream whose items may fail individually.
///
/// A failed item is logged and counted in `skipped`; it never aborts the pass.
pub fn aggregate_fallible<P, E, I>(items: I, k: usize) -> AggregateResult<P>
where
    E: Display,
    I: IntoIterator<Item = Result<ScoredItem<P>, E>>,
{
    let mut aggregator = Aggregator::new(k);
    for item in items {
        match item {
            Ok(item) => aggregator.offer(item),
            Err(e) => {
                warn!(event = "core.aggregate.item_skipped", error = %e);
                aggregator.skip();
            }
        }
    }
    aggregator.finish()
}

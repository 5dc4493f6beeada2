use serde::Serialize;

/// Running count and sum of scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Accumulator {
    pub count: u64,
    pub sum: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, score: u64) {
        self.count += 1;
        self.sum += score;
    }

    pub fn merge(&mut self, other: Accumulator) {
        self.count += other.count;
        self.sum += other.sum;
    }
}

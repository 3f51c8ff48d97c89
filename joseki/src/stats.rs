use go::Color;
use serde::{Deserialize, Serialize};

/// Occurrence and outcome counts of every sequence passing through a tree node.
///
/// `b_win + w_win <= count`; games without a known winner only add to `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStats {
    pub count: u64,
    pub b_win: u64,
    pub w_win: u64,
}

impl NodeStats {
    /// Statistics of a node created by a single sequence.
    pub fn new(winner: Option<Color>) -> Self {
        let mut stats = Self::default();
        stats.record(winner);
        stats
    }

    pub fn record(&mut self, winner: Option<Color>) {
        self.count += 1;
        match winner {
            Some(Color::Black) => self.b_win += 1,
            Some(Color::White) => self.w_win += 1,
            None => {}
        }
    }

    pub fn black_win_rate(&self) -> Option<f64> {
        (self.count > 0).then(|| self.b_win as f64 / self.count as f64)
    }

    pub fn white_win_rate(&self) -> Option<f64> {
        (self.count > 0).then(|| self.w_win as f64 / self.count as f64)
    }
}

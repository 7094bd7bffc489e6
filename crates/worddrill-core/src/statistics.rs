//! Session scoring statistics.

use serde::{Deserialize, Serialize};

/// Accuracy as a whole percentage.
///
/// `round(score / total * 100)`, and 0 when nothing has been answered.
pub fn accuracy_percent(score: u32, total_answered: u32) -> u32 {
    if total_answered == 0 {
        return 0;
    }
    (score as f64 / total_answered as f64 * 100.0).round() as u32
}

/// Snapshot of a session's progress, as shown next to each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub total_answered: u32,
    pub pool_size: usize,
    /// Pool items already presented in this pass.
    pub consumed: usize,
}

impl SessionStats {
    /// Items not yet presented.
    pub fn remaining(&self) -> usize {
        self.pool_size.saturating_sub(self.consumed)
    }

    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.score, self.total_answered)
    }
}

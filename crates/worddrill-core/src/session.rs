//! Practice session engine.
//!
//! A [`PracticeSession`] owns one quiz over a loaded item pool: it samples
//! items without replacement, judges answers, keeps score, and moves through
//! completion and restart. Every operation runs to completion; redundant
//! calls from a UI (double submit, advance after the end) are no-ops.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::drill::{Answer, DrillMode, Question};
use crate::model::Record;
use crate::statistics::SessionStats;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    /// No pool loaded yet.
    Idle,
    /// A pool was loaded but holds no records.
    Empty,
    /// A question is shown and awaits an answer.
    InProgress,
    /// The current question has been answered; waiting for `advance`.
    Answered,
    /// Every item was presented.
    Complete,
}

/// Result of [`PracticeSession::select_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Item(ItemView),
    Complete,
    /// No pool, or an empty one.
    Empty,
}

/// What the presentation layer shows for the current item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Index into the pool.
    pub index: usize,
    pub question: Question,
}

/// Verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub correct: bool,
    pub expected: String,
}

/// Proof that a pool load was requested; see [`PracticeSession::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One quiz session over an item pool.
///
/// Randomness comes from the injected `R`, so seeding it replays a session.
pub struct PracticeSession<R = StdRng> {
    mode: DrillMode,
    pool: Vec<Record>,
    loaded: bool,
    generation: u64,
    consumed: HashSet<usize>,
    current: Option<ItemView>,
    answered: bool,
    last_outcome: Option<Outcome>,
    complete: bool,
    score: u32,
    total_answered: u32,
    rng: R,
}

impl PracticeSession<StdRng> {
    /// A session seeded from the operating system.
    pub fn new(mode: DrillMode) -> Self {
        Self::with_rng(mode, StdRng::from_os_rng())
    }

    /// A reproducible session.
    pub fn seeded(mode: DrillMode, seed: u64) -> Self {
        Self::with_rng(mode, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PracticeSession<R> {
    pub fn with_rng(mode: DrillMode, rng: R) -> Self {
        Self {
            mode,
            pool: Vec::new(),
            loaded: false,
            generation: 0,
            consumed: HashSet::new(),
            current: None,
            answered: false,
            last_outcome: None,
            complete: false,
            score: 0,
            total_answered: 0,
            rng,
        }
    }

    pub fn mode(&self) -> DrillMode {
        self.mode
    }

    pub fn pool(&self) -> &[Record] {
        &self.pool
    }

    pub fn current(&self) -> Option<&ItemView> {
        self.current.as_ref()
    }

    /// Outcome of the current item, until `advance` clears it.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn consumed(&self) -> &HashSet<usize> {
        &self.consumed
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            score: self.score,
            total_answered: self.total_answered,
            pool_size: self.pool.len(),
            consumed: self.consumed.len(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.loaded {
            SessionPhase::Idle
        } else if self.pool.is_empty() {
            SessionPhase::Empty
        } else if self.complete {
            SessionPhase::Complete
        } else if self.answered {
            SessionPhase::Answered
        } else {
            SessionPhase::InProgress
        }
    }

    /// Announce an upcoming pool load, e.g. before starting a fetch.
    ///
    /// Only the most recent ticket is honored by [`Self::finish_load`]; a
    /// fetch that completes after a newer load was requested is dropped.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Install `records` if `ticket` is still current. Returns whether the
    /// pool was replaced.
    pub fn finish_load(&mut self, ticket: LoadTicket, records: Vec<Record>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "ignoring stale pool load"
            );
            return false;
        }
        self.install(records);
        true
    }

    /// Replace the pool and start over. A non-empty pool shows its first item.
    pub fn load_pool(&mut self, records: Vec<Record>) {
        let ticket = self.begin_load();
        self.finish_load(ticket, records);
    }

    fn install(&mut self, records: Vec<Record>) {
        self.pool = records;
        self.loaded = true;
        self.reset_progress();
        info!(mode = %self.mode, items = self.pool.len(), "pool loaded");
        if !self.pool.is_empty() {
            self.select_next();
        }
    }

    fn reset_progress(&mut self) {
        self.consumed.clear();
        self.current = None;
        self.answered = false;
        self.last_outcome = None;
        self.complete = false;
        self.score = 0;
        self.total_answered = 0;
    }

    /// Present a random item not yet shown in this pass.
    ///
    /// While the current item is answered and awaiting `advance`, the
    /// current item is returned unchanged.
    pub fn select_next(&mut self) -> Selection {
        if self.pool.is_empty() {
            return Selection::Empty;
        }
        if self.complete {
            return Selection::Complete;
        }
        if self.answered {
            if let Some(view) = &self.current {
                return Selection::Item(view.clone());
            }
        }

        let available: Vec<usize> = (0..self.pool.len())
            .filter(|idx| !self.consumed.contains(idx))
            .collect();

        if available.is_empty() {
            self.finish();
            return Selection::Complete;
        }

        let index = available[self.rng.random_range(0..available.len())];
        self.consumed.insert(index);
        let question = self
            .mode
            .question(&self.pool[index], &self.pool, &mut self.rng);
        let view = ItemView { index, question };
        self.current = Some(view.clone());
        self.answered = false;
        debug!(index, remaining = available.len() - 1, "selected item");
        Selection::Item(view)
    }

    /// Judge an answer to the current item.
    ///
    /// Returns `None` and changes nothing when there is no current item, it
    /// was already answered, or the answer cannot be judged (blank text, a
    /// choice out of range).
    pub fn submit_answer(&mut self, answer: Answer) -> Option<Outcome> {
        if self.answered {
            return None;
        }
        let view = self.current.as_ref()?;
        let correct = view.question.check(&answer)?;

        self.answered = true;
        self.total_answered += 1;
        if correct {
            self.score += 1;
        }

        let outcome = Outcome {
            correct,
            expected: view.question.expected.clone(),
        };
        debug!(
            index = view.index,
            correct,
            score = self.score,
            total = self.total_answered,
            "answer submitted"
        );
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Move past the current item, completing the session once every item
    /// has been shown.
    pub fn advance(&mut self) -> Selection {
        if self.pool.is_empty() {
            return Selection::Empty;
        }
        if self.complete {
            return Selection::Complete;
        }
        self.answered = false;
        self.last_outcome = None;

        if self.consumed.len() == self.pool.len() {
            self.finish();
            return Selection::Complete;
        }
        self.select_next()
    }

    /// Start a fresh pass over the same pool.
    pub fn restart(&mut self) -> Selection {
        self.reset_progress();
        info!(mode = %self.mode, items = self.pool.len(), "session restarted");
        self.select_next()
    }

    fn finish(&mut self) {
        self.complete = true;
        self.current = None;
        self.answered = false;
        info!(
            score = self.score,
            total = self.total_answered,
            "session complete"
        );
    }
}

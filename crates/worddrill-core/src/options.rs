//! Distractor generation for choice-style questions.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of options a choice question shows when the pool allows it.
pub const OPTION_COUNT: usize = 4;

/// Build the option list for a choice question.
///
/// Collects the distinct non-empty candidate values other than `correct`,
/// shuffles them, keeps up to `OPTION_COUNT - 1` as distractors, adds
/// `correct` and shuffles again so its position is uniform. With fewer than
/// three distinct distractors available the list is simply shorter.
pub fn make_options<'a, I, R>(correct: &str, candidates: I, rng: &mut R) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut distractors: Vec<&str> = candidates
        .into_iter()
        .filter(|c| !c.is_empty() && *c != correct && seen.insert(*c))
        .collect();
    distractors.shuffle(rng);

    let mut options: Vec<String> = distractors
        .into_iter()
        .take(OPTION_COUNT - 1)
        .map(str::to_string)
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

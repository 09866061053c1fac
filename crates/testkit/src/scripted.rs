use sakuragen_core::RandomSource;
use std::collections::VecDeque;

/// [`RandomSource`] that replays fixed answers.
///
/// Boolean and range draws are served from two independent queues, so a
/// scenario can pin exactly the decisions it cares about. Once a queue runs
/// dry, booleans answer `false` and ranges answer their lower bound. Scripted
/// range answers are clamped into the requested bounds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    bools: VecDeque<bool>,
    ranges: VecDeque<i32>,
    bool_draws: usize,
    range_draws: usize,
}

impl ScriptedRandom {
    /// Empty script: every draw takes the fallback answer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue boolean answers.
    pub fn bools(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.bools.extend(answers);
        self
    }

    /// Queue range answers.
    pub fn ranges(mut self, answers: impl IntoIterator<Item = i32>) -> Self {
        self.ranges.extend(answers);
        self
    }

    /// Number of boolean draws served so far.
    pub fn bool_draws(&self) -> usize {
        self.bool_draws
    }

    /// Number of range draws served so far.
    pub fn range_draws(&self) -> usize {
        self.range_draws
    }

    /// Scripted answers not consumed yet, as (bools, ranges).
    pub fn remaining(&self) -> (usize, usize) {
        (self.bools.len(), self.ranges.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_bool(&mut self) -> bool {
        self.bool_draws += 1;
        self.bools.pop_front().unwrap_or(false)
    }

    fn next_range(&mut self, lo: i32, hi: i32) -> i32 {
        self.range_draws += 1;
        self.ranges
            .pop_front()
            .map_or(lo, |value| value.clamp(lo, hi))
    }
}

use std::collections::VecDeque;

use pyraminx_core::notation::{self, Modifier, Token};
use pyraminx_core::{Move, Scramble};
use web_time::Duration;

use crate::{AnimationPreferences, InputSource};

/// One move emitted by a playback, followed by a pause in seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Step {
    mv: Move,
    pause_after: f32,
}

/// Scripted sequence that feeds moves into the scheduler at a fixed cadence,
/// the way a person pressing keys would.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    source: InputSource,
    steps: VecDeque<Step>,
    /// Seconds until the next move is emitted.
    wait: f32,
}

impl Playback {
    /// Plays a scramble. A double token emits its second turn after a short
    /// pause.
    pub fn scramble(scramble: &Scramble, prefs: &AnimationPreferences) -> Self {
        let mut steps = VecDeque::new();
        for token in scramble.tokens() {
            push_token(&mut steps, *token, prefs.double_turn_pause, prefs.scramble_interval);
        }
        Self::new(InputSource::Scramble, steps)
    }

    /// Plays an algorithm given in notation. Tokens that fail to parse are
    /// logged and skipped. Returns `None` if no token is valid.
    pub fn algorithm(
        sequence: &str,
        source: InputSource,
        prefs: &AnimationPreferences,
    ) -> Option<Self> {
        let mut steps = VecDeque::new();
        for result in notation::parse_sequence(sequence) {
            match result {
                Ok(token) => push_token(
                    &mut steps,
                    token,
                    prefs.algorithm_interval,
                    prefs.algorithm_interval,
                ),
                Err(e) => log::warn!("skipping token in {source} playback: {e}"),
            }
        }
        (!steps.is_empty()).then(|| Self::new(source, steps))
    }

    fn new(source: InputSource, steps: VecDeque<Step>) -> Self {
        Self {
            source,
            steps,
            wait: 0.0,
        }
    }

    /// Returns the source tag for emitted moves.
    pub fn source(&self) -> InputSource {
        self.source
    }
    /// Returns the number of moves not yet emitted.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
    /// Returns whether every move has been emitted.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advances the playback clock and returns the moves that are now due.
    pub fn advance(&mut self, delta: Duration) -> Vec<Move> {
        self.wait -= delta.as_secs_f32();
        let mut due = vec![];
        while self.wait <= 0.0 {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            due.push(step.mv);
            self.wait += step.pause_after;
        }
        due
    }

    /// Emits every remaining move immediately.
    pub fn finish(&mut self) -> Vec<Move> {
        self.wait = 0.0;
        self.steps.drain(..).map(|step| step.mv).collect()
    }
}

fn push_token(steps: &mut VecDeque<Step>, token: Token, double_pause: f32, interval: f32) {
    let moves = token.moves();
    let pause_within = match token.modifier {
        Modifier::Double => double_pause,
        Modifier::None | Modifier::Prime => interval,
    };
    let last = moves.len().saturating_sub(1);
    for (i, mv) in moves.into_iter().enumerate() {
        let pause_after = if i == last { interval } else { pause_within };
        steps.push_back(Step { mv, pause_after });
    }
}

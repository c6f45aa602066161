use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::notation::{self, Modifier, NotationError, Token};
use crate::{Move, MoveKey, Vertex};

/// Number of layer moves in a scramble.
pub const MAIN_SCRAMBLE_LENGTH: usize = 11;

/// Random scramble: 11 layer moves with no two consecutive on the same
/// vertex, followed by up to one turn of each tip.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Scramble {
    /// Layer move tokens.
    pub main: Vec<Token>,
    /// Tip tokens, at most one per tip.
    pub tips: Vec<Token>,
}

impl Scramble {
    /// Generates a scramble from a random number generator.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut main = Vec::with_capacity(MAIN_SCRAMBLE_LENGTH);
        let mut prev: Option<Vertex> = None;
        for _ in 0..MAIN_SCRAMBLE_LENGTH {
            let candidates: SmallVec<[Vertex; 4]> =
                Vertex::iter().filter(|&v| Some(v) != prev).collect();
            let v = candidates[rng.random_range(0..candidates.len())];
            let modifier = match rng.random_bool(0.5) {
                true => Modifier::Prime,
                false => Modifier::None,
            };
            main.push(Token::new(MoveKey::Layer(v), modifier));
            prev = Some(v);
        }

        let tips = Vertex::iter()
            .filter_map(|v| {
                let modifier = match rng.random_range(0..3) {
                    0 => Modifier::None,
                    1 => Modifier::Prime,
                    _ => return None,
                };
                Some(Token::new(MoveKey::Tip(v), modifier))
            })
            .collect();

        Self { main, tips }
    }

    /// Generates a reproducible scramble from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::generate(&mut rand_chacha::ChaCha12Rng::seed_from_u64(seed))
    }

    /// Generates a scramble from the thread-local random number generator.
    pub fn random() -> Self {
        Self::generate(&mut rand::rng())
    }

    /// Iterates over all tokens, layer moves first.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.main.iter().chain(&self.tips)
    }

    /// Returns every move the scramble expands to.
    pub fn moves(&self) -> Vec<Move> {
        notation::expand(self.tokens())
    }
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", notation::format_sequence(self.tokens()))
    }
}

impl FromStr for Scramble {
    type Err = NotationError;

    /// Parses a scramble string. Layer tokens go to [`Scramble::main`] and tip
    /// tokens go to [`Scramble::tips`], preserving their relative order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, tips) = notation::parse_sequence_strict(s)?
            .into_iter()
            .partition(|token| token.key.is_layer());
        Ok(Self { main, tips })
    }
}

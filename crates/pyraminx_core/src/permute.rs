use crate::table::{self, MoveDef};
use crate::{FaceState, Move};

impl FaceState {
    /// Applies a move to the sticker colors.
    ///
    /// Every cycle reads from the same pre-move copy of the state, so cycles
    /// within one move never observe each other's writes.
    pub fn apply(&mut self, mv: Move) {
        self.apply_def(&table::lookup(mv.key), mv.inverse);
    }

    /// Returns the state after applying a move.
    #[must_use]
    pub fn applied(mut self, mv: Move) -> Self {
        self.apply(mv);
        self
    }

    /// Applies a move given by its raw symbol. Returns `false` and leaves the
    /// state untouched if the symbol is not a known move key.
    pub fn apply_symbol(&mut self, symbol: char, inverse: bool) -> bool {
        match table::lookup_symbol(symbol) {
            Some(def) => {
                self.apply_def(&def, inverse);
                true
            }
            None => {
                log::debug!("ignoring unknown move symbol {symbol:?}");
                false
            }
        }
    }

    /// Applies a sequence of moves in order.
    pub fn apply_all(&mut self, moves: impl IntoIterator<Item = Move>) {
        for mv in moves {
            self.apply(mv);
        }
    }

    fn apply_def(&mut self, def: &MoveDef, inverse: bool) {
        let old = *self;
        for &[p1, p2, p3] in def.sticker_cycles() {
            if inverse {
                self[p1] = old[p2];
                self[p2] = old[p3];
                self[p3] = old[p1];
            } else {
                self[p2] = old[p1];
                self[p3] = old[p2];
                self[p1] = old[p3];
            }
        }
    }
}

use std::collections::VecDeque;

use serde::Serialize;

use crate::MoveRequest;

/// Maximum number of entries kept in [`MoveHistory`].
pub const HISTORY_LEN: usize = 15;

/// Most recent move requests, oldest first, for display in a history bar.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct MoveHistory(VecDeque<MoveRequest>);

impl MoveHistory {
    /// Records a request, evicting the oldest entry if the history is full.
    pub fn push(&mut self, request: MoveRequest) {
        self.0.push_back(request);
        while self.0.len() > HISTORY_LEN {
            self.0.pop_front();
        }
    }

    /// Iterates over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MoveRequest> {
        self.0.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

use std::collections::VecDeque;

use cgmath::{Deg, One, Quaternion, Rotation3, Vector3};
use pyraminx_core::{Move, Piece, PuzzleState};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter};
use web_time::Duration;

use crate::{AnimationPreferences, Axes, InterpolateFn};

/// If at least this much of a move is animated in one frame, just complete
/// the move to reduce unnecessary flashing.
const MIN_TWIST_DELTA: f32 = 1.0 / 3.0;

/// Where a move request came from.
#[derive(
    Serialize, Deserialize, Display, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputSource {
    /// Key press.
    Keyboard,
    /// Pointer drag on a sticker or tip.
    Pointer,
    /// Scramble playback.
    Scramble,
    /// Algorithm playback.
    Algorithm,
    /// Playback of a sequence returned by the solver.
    Solver,
}

/// Move request tagged with its source.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    /// Move to perform.
    #[serde(rename = "move")]
    pub mv: Move,
    /// Where the request came from.
    pub source: InputSource,
}

/// Scheduler state.
#[derive(Serialize, Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SchedulerState {
    Idle,
    Animating,
}

/// Move that is currently being animated.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTask {
    request: MoveRequest,
    /// Pieces to group and spin, resolved from the registry when the
    /// animation started.
    pieces: SmallVec<[Piece; 5]>,
    axis: Vector3<f32>,
    /// Initial orientation of the gripped pieces.
    start: Quaternion<f32>,
    /// Final orientation of the gripped pieces.
    end: Quaternion<f32>,
    /// Linear progress from 0.0 to 1.0, before easing.
    progress: f32,
}

impl AnimationTask {
    pub(crate) fn new(request: MoveRequest, puzzle: &PuzzleState, axes: &Axes) -> Self {
        let axis = axes[request.mv.key.vertex()];
        let start = Quaternion::one();
        let end = Quaternion::from_axis_angle(axis, Deg(request.mv.angle_degrees())) * start;
        Self {
            request,
            pieces: puzzle.registry().gripped_pieces(request.mv.key),
            axis,
            start,
            end,
            progress: 0.0,
        }
    }

    /// Returns the move request being animated.
    pub fn request(&self) -> MoveRequest {
        self.request
    }
    /// Returns the linear progress from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        self.progress
    }
    /// Returns the current orientation of the gripped pieces.
    pub fn rotation(&self, interpolate: InterpolateFn) -> Quaternion<f32> {
        self.start
            .slerp(self.end, interpolate.interpolate(self.progress))
    }

    /// Returns what the renderer needs to display this move.
    pub fn directive(&self, interpolate: InterpolateFn) -> RenderDirective {
        RenderDirective {
            pieces: self.pieces.to_vec(),
            axis: self.axis.into(),
            angle_degrees: self.request.mv.angle_degrees(),
            t: interpolate.interpolate(self.progress),
        }
    }
}

/// Instructions for the renderer for one animating move.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RenderDirective {
    /// Pieces to group and spin together.
    pub pieces: Vec<Piece>,
    /// Unit rotation axis.
    pub axis: [f32; 3],
    /// Signed total rotation, following the right-hand rule around `axis`.
    pub angle_degrees: f32,
    /// Eased fraction of the rotation to display.
    pub t: f32,
}

/// Result of one scheduling tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Move committed during this tick, if any.
    pub committed: Option<MoveRequest>,
    /// Whether the view should be redrawn next frame.
    pub needs_redraw: bool,
}

/// Serializes move requests from every input source into one animated
/// sequence.
///
/// Requests are never rejected, merged, or canceled. Each move commits to the
/// puzzle state only when its animation finishes, and the next move starts
/// only after that.
#[derive(Debug, Default, Clone)]
pub struct MoveScheduler {
    /// Moves waiting to start.
    queue: VecDeque<MoveRequest>,
    /// Move currently animating.
    current: Option<AnimationTask>,
    /// Total number of committed moves.
    commit_count: u64,
}

impl MoveScheduler {
    /// Constructs an idle scheduler with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move to the queue.
    pub fn enqueue(&mut self, mv: Move, source: InputSource) {
        log::trace!("enqueued {mv} from {source}");
        self.queue.push_back(MoveRequest { mv, source });
    }

    /// Returns whether a move is animating.
    pub fn state(&self) -> SchedulerState {
        match self.current {
            Some(_) => SchedulerState::Animating,
            None => SchedulerState::Idle,
        }
    }
    /// Returns the move currently animating.
    pub fn current(&self) -> Option<&AnimationTask> {
        self.current.as_ref()
    }
    /// Returns the moves waiting to start, in order.
    pub fn pending(&self) -> impl Iterator<Item = &MoveRequest> {
        self.queue.iter()
    }
    /// Returns the number of moves not yet committed, including the one
    /// animating.
    pub fn backlog(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }
    /// Returns the total number of committed moves.
    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    /// Advances the animation by `delta`, committing the current move if it
    /// finishes. At most one move commits per tick; the next queued move starts
    /// immediately afterward.
    pub fn step(
        &mut self,
        delta: Duration,
        puzzle: &mut PuzzleState,
        axes: &Axes,
        prefs: &AnimationPreferences,
    ) -> StepOutcome {
        if self.current.is_none() {
            self.start_next(puzzle, axes);
        }
        let duration = prefs.twist_duration_for_backlog(self.backlog());
        let Some(task) = &mut self.current else {
            return StepOutcome::default();
        };

        // `duration` is in seconds per move; `twist_delta` is fraction of a
        // move per tick.
        let mut twist_delta = delta.as_secs_f32() / duration;
        // Also handles division by zero.
        if !(0.0..MIN_TWIST_DELTA).contains(&twist_delta) {
            twist_delta = 1.0;
        }
        task.progress += twist_delta;

        let mut outcome = StepOutcome {
            committed: None,
            needs_redraw: true,
        };
        if task.progress >= 1.0 {
            let request = task.request;
            self.current = None;
            self.commit(request, puzzle);
            outcome.committed = Some(request);
            self.start_next(puzzle, axes);
        }
        outcome
    }

    /// Commits the current move and every queued move immediately, in order,
    /// and returns them.
    pub fn catch_up(&mut self, puzzle: &mut PuzzleState) -> Vec<MoveRequest> {
        let requests: Vec<MoveRequest> = self
            .current
            .take()
            .map(|task| task.request)
            .into_iter()
            .chain(self.queue.drain(..))
            .collect();
        for &request in &requests {
            self.commit(request, puzzle);
        }
        requests
    }

    fn start_next(&mut self, puzzle: &PuzzleState, axes: &Axes) {
        if let Some(request) = self.queue.pop_front() {
            self.current = Some(AnimationTask::new(request, puzzle, axes));
        }
    }

    fn commit(&mut self, request: MoveRequest, puzzle: &mut PuzzleState) {
        puzzle.do_move(request.mv);
        self.commit_count += 1;
    }
}

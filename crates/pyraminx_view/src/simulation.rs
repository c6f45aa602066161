use cgmath::{Point3, Vector3};
use pyraminx_core::{Face, Move, MoveKey, PuzzleState, Scramble, Snapshot, SnapshotError};
use web_time::{Duration, Instant};

use crate::{
    AnimationPreferences, Calibration, CalibrationError, InputSource, MoveHistory, MoveRequest,
    MoveScheduler, Playback, RenderDirective, SchedulerState, StepOutcome, calibrate, current_face,
};

const ASSUMED_FPS: f32 = 120.0;

/// External solving service. Receives a complete state and returns a move
/// sequence in notation.
pub trait Solver {
    /// Returns a sequence that solves `snapshot`.
    fn solve(&mut self, snapshot: &Snapshot) -> eyre::Result<String>;
}

/// Puzzle simulation, which owns the puzzle state, calibration, scheduler,
/// scripted playback, and move history.
#[derive(Debug, Clone)]
pub struct PuzzleSimulation {
    /// Latest puzzle state, not including the move currently animating.
    puzzle: PuzzleState,
    /// Rotation axes.
    calibration: Calibration,
    /// Move queue and current animation.
    scheduler: MoveScheduler,
    /// Scripted sequences still emitting moves.
    playbacks: Vec<Playback>,
    /// Recently requested moves.
    history: MoveHistory,

    /// Whether the puzzle was solved the last time the queue drained.
    solved: bool,
    /// Whether the solved state has been handled by the UI.
    solved_state_handled: bool,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}

impl Default for PuzzleSimulation {
    fn default() -> Self {
        Self::with_calibration(Calibration::canonical())
    }
}

impl PuzzleSimulation {
    /// Constructs a simulation with a solved puzzle, calibrated against the
    /// tip markers of a loaded model.
    pub fn new(markers: &[Point3<f32>]) -> Result<Self, CalibrationError> {
        Ok(Self::with_calibration(calibrate(markers)?))
    }

    /// Constructs a simulation with a solved puzzle and existing calibration.
    pub fn with_calibration(calibration: Calibration) -> Self {
        Self {
            puzzle: PuzzleState::new(),
            calibration,
            scheduler: MoveScheduler::new(),
            playbacks: vec![],
            history: MoveHistory::default(),

            solved: true,
            solved_state_handled: true,

            last_frame_time: None,
        }
    }

    /// Returns the latest puzzle state, not including the move currently
    /// animating.
    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }
    /// Returns the calibration.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
    /// Returns the scheduler.
    pub fn scheduler(&self) -> &MoveScheduler {
        &self.scheduler
    }
    /// Returns the recent move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Resets the puzzle to solved, dropping any queued moves and playback.
    /// Calibration is kept.
    pub fn reset(&mut self) {
        *self = Self::with_calibration(self.calibration);
    }

    /// Recalibrates after the model's anchor geometry reloads. On error the
    /// previous calibration is kept.
    pub fn recalibrate(&mut self, markers: &[Point3<f32>]) -> Result<(), CalibrationError> {
        self.calibration = calibrate(markers)?;
        Ok(())
    }

    /// Queues a move.
    pub fn enqueue(&mut self, mv: Move, source: InputSource) {
        self.history.push(MoveRequest { mv, source });
        self.scheduler.enqueue(mv, source);
    }

    /// Queues a move given by its raw symbol. Unknown symbols are ignored and
    /// `false` is returned.
    pub fn enqueue_symbol(&mut self, symbol: char, inverse: bool, source: InputSource) -> bool {
        match MoveKey::from_symbol(symbol) {
            Some(key) => {
                self.enqueue(Move::new(key, inverse), source);
                true
            }
            None => {
                log::debug!("ignoring unknown move symbol {symbol:?} from {source}");
                false
            }
        }
    }

    /// Starts scramble playback.
    pub fn play_scramble(&mut self, scramble: &Scramble, prefs: &AnimationPreferences) {
        log::info!("scrambling: {scramble}");
        self.playbacks.push(Playback::scramble(scramble, prefs));
    }

    /// Starts playback of a sequence in notation. Returns the number of moves
    /// that will be played.
    pub fn play_algorithm(
        &mut self,
        sequence: &str,
        source: InputSource,
        prefs: &AnimationPreferences,
    ) -> usize {
        let Some(playback) = Playback::algorithm(sequence, source, prefs) else {
            log::warn!("no valid moves in {source} sequence {sequence:?}");
            return 0;
        };
        let count = playback.remaining();
        self.playbacks.push(playback);
        count
    }

    /// Asks `solver` for a solution to the state after every pending move,
    /// then plays it. Returns the number of moves that will be played.
    pub fn play_solution(
        &mut self,
        solver: &mut impl Solver,
        prefs: &AnimationPreferences,
    ) -> eyre::Result<usize> {
        self.catch_up();
        let solution = solver.solve(&self.export())?;
        Ok(self.play_algorithm(&solution, InputSource::Solver, prefs))
    }

    /// Returns whether anything is animating or waiting to play.
    pub fn is_busy(&self) -> bool {
        self.scheduler.backlog() > 0 || !self.playbacks.is_empty()
    }

    /// Steps the simulation forward using wall-clock time. Returns whether
    /// the puzzle should be redrawn next frame.
    pub fn step(&mut self, prefs: &AnimationPreferences) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step_by(delta, prefs).needs_redraw;

        if needs_redraw || self.is_busy() {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }

    /// Steps the simulation forward by `delta`.
    pub fn step_by(&mut self, delta: Duration, prefs: &AnimationPreferences) -> StepOutcome {
        for playback in &mut self.playbacks {
            let source = playback.source();
            for mv in playback.advance(delta) {
                self.history.push(MoveRequest { mv, source });
                self.scheduler.enqueue(mv, source);
            }
        }
        self.playbacks.retain(|playback| !playback.is_finished());

        let outcome = self
            .scheduler
            .step(delta, &mut self.puzzle, &self.calibration.axes, prefs);
        if outcome.committed.is_some() {
            self.check_solved_if_drained();
        }
        outcome
    }

    /// Commits every pending move immediately, including moves that scripted
    /// playback has not emitted yet. Returns the committed moves.
    pub fn catch_up(&mut self) -> Vec<MoveRequest> {
        for mut playback in std::mem::take(&mut self.playbacks) {
            let source = playback.source();
            for mv in playback.finish() {
                self.history.push(MoveRequest { mv, source });
                self.scheduler.enqueue(mv, source);
            }
        }
        let committed = self.scheduler.catch_up(&mut self.puzzle);
        if !committed.is_empty() {
            self.check_solved_if_drained();
        }
        committed
    }

    fn check_solved_if_drained(&mut self) {
        if self.scheduler.state() == SchedulerState::Animating || !self.playbacks.is_empty() {
            return;
        }
        let solved = self.puzzle.is_solved();
        if solved && !self.solved {
            log::info!("puzzle solved");
            self.solved_state_handled = false;
        }
        self.solved = solved;
    }

    /// Replaces the sticker colors with an imported snapshot.
    ///
    /// Pending moves are committed first so none are lost. On error nothing
    /// changes, including the queue.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        snapshot.to_face_state().inspect_err(|e| {
            log::warn!("rejected snapshot: {e}");
        })?;
        self.catch_up();
        self.puzzle.import(snapshot)?;
        self.solved = self.puzzle.is_solved();
        self.solved_state_handled = true;
        Ok(())
    }

    /// Returns an owned copy of the latest sticker colors.
    pub fn export(&self) -> Snapshot {
        self.puzzle.export()
    }

    /// Returns the face pointing most directly at a camera looking along
    /// `view_direction`.
    pub fn orientation(&self, view_direction: Vector3<f32>) -> Face {
        current_face(&self.calibration.axes, view_direction)
    }

    /// Returns the render directive for the move currently animating.
    pub fn render_directive(&self, prefs: &AnimationPreferences) -> Option<RenderDirective> {
        Some(
            self.scheduler
                .current()?
                .directive(prefs.twist_interpolation),
        )
    }

    /// Returns whether the puzzle is solved, not counting pending moves.
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }
    /// Returns whether the puzzle was _just_ solved.
    ///
    /// This returns `true` at most once per transition to the solved state.
    pub fn handle_newly_solved_state(&mut self) -> bool {
        self.solved && !std::mem::replace(&mut self.solved_state_handled, true)
    }
}

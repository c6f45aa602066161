//! View controller for the Pyraminx engine: calibration, orientation, input
//! translation, and the animated move scheduler.

mod calibrate;
mod history;
pub mod input;
mod interpolate;
mod orientation;
mod playback;
mod prefs;
mod scheduler;
mod simulation;


pub use calibrate::{Axes, CANONICAL_MARKERS, Calibration, CalibrationError, calibrate};
pub use history::{HISTORY_LEN, MoveHistory};
pub use interpolate::InterpolateFn;
pub use orientation::current_face;
pub use playback::Playback;
pub use prefs::{AnimationPreferences, DEFAULT_PREFS_STR};
pub use scheduler::{
    AnimationTask, InputSource, MoveRequest, MoveScheduler, RenderDirective, SchedulerState,
    StepOutcome,
};
pub use simulation::{PuzzleSimulation, Solver};

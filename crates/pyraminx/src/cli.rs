use std::io::Read;
use std::path::PathBuf;

use cgmath::{Point3, Vector3};
use eyre::{Context, Result, bail, ensure};
use pyraminx_core::{Face, Scramble, Snapshot, SolvePace};
use pyraminx_view::{
    AnimationPreferences, CANONICAL_MARKERS, DEFAULT_PREFS_STR, InputSource, PuzzleSimulation,
};
use serde::Serialize;
use web_time::Duration;

/// Upper bound on simulated ticks, so a bad frame rate cannot hang.
const MAX_TICKS: usize = 10_000_000;

/// Pyraminx simulator command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file (YAML). Missing keys use the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print random scrambles, one per line.
    Scramble {
        /// Seed for reproducible scrambles.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of scrambles to print.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Play a move sequence through the animated scheduler and print the
    /// result as JSON.
    Play {
        /// Moves separated by spaces or commas, such as "U R' l b2".
        sequence: String,
        /// Initial state as a JSON snapshot, use '-' for stdin. Defaults to
        /// solved.
        #[arg(long, value_parser)]
        state: Option<clio::Input>,
        /// Tip marker positions as a JSON array of four [x, y, z] points.
        #[arg(long, value_parser)]
        markers: Option<clio::Input>,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Pace used to estimate solve time (reading, average, pro, robot).
        #[arg(long, default_value = "average")]
        pace: String,
    },
    /// Validate a JSON snapshot and print whether it is solved.
    Verify {
        /// Snapshot file, use '-' for stdin.
        #[arg(value_parser)]
        snapshot: clio::Input,
        /// Print the stickers as one line of color letters per face instead
        /// of JSON.
        #[arg(long)]
        compact: bool,
    },
    /// Print the default preferences file.
    Prefs,
}

#[derive(Serialize, Debug)]
struct PlayReport {
    state: Snapshot,
    solved: bool,
    commits: u64,
    ticks: usize,
    orientation: Face,
    history: Vec<String>,
    pace: SolvePace,
    estimated_seconds: f32,
}

#[derive(Serialize, Debug)]
struct VerifyReport {
    solved: bool,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = AnimationPreferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Scramble { seed, count } => {
            for i in 0..count {
                let scramble = match seed {
                    Some(seed) => Scramble::from_seed(seed.wrapping_add(i as u64)),
                    None => Scramble::random(),
                };
                println!("{scramble}");
            }
            Ok(())
        }

        Subcommand::Play {
            sequence,
            state,
            markers,
            fps,
            pace,
        } => {
            ensure!(fps.is_finite() && fps > 0.0, "frame rate must be positive");
            let delta = Duration::try_from_secs_f32(1.0 / fps).context("frame rate too small")?;
            let pace = SolvePace::from_name_or_default(&pace);

            let markers = match markers {
                Some(input) => read_json::<Vec<[f32; 3]>>(input, "markers")?,
                None => CANONICAL_MARKERS.to_vec(),
            };
            let markers: Vec<Point3<f32>> = markers.into_iter().map(Point3::from).collect();
            let mut sim =
                PuzzleSimulation::new(&markers).context("error calibrating rotation axes")?;

            if let Some(input) = state {
                let snapshot: Snapshot = read_json(input, "snapshot")?;
                sim.import(&snapshot).context("invalid snapshot")?;
            }

            let move_count = sim.play_algorithm(&sequence, InputSource::Algorithm, &prefs);
            if move_count == 0 && !sequence.trim().is_empty() {
                bail!("no valid moves in {sequence:?}");
            }

            let mut ticks = 0;
            while sim.is_busy() {
                ensure!(ticks < MAX_TICKS, "playback did not finish");
                if let Some(request) = sim.step_by(delta, &prefs).committed {
                    log::debug!("tick {ticks}: committed {}", request.mv);
                }
                ticks += 1;
            }

            let report = PlayReport {
                state: sim.export(),
                solved: sim.is_solved(),
                commits: sim.scheduler().commit_count(),
                ticks,
                orientation: sim.orientation(Vector3::new(0.0, 0.0, -1.0)),
                history: sim.history().iter().map(|r| r.mv.to_string()).collect(),
                pace,
                estimated_seconds: pace.estimate_seconds(move_count),
            };
            write_json_output(&report)
        }

        Subcommand::Verify { snapshot, compact } => {
            let snapshot: Snapshot = read_json(snapshot, "snapshot")?;
            let state = snapshot.to_face_state().context("invalid snapshot")?;
            if compact {
                println!("{}", state.to_compact_string());
                println!("solved: {}", state.is_solved());
                return Ok(());
            }
            write_json_output(&VerifyReport {
                solved: state.is_solved(),
            })
        }

        Subcommand::Prefs => {
            print!("{DEFAULT_PREFS_STR}");
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(mut input: clio::Input, what: &str) -> Result<T> {
    let mut buffer = String::new();
    input
        .read_to_string(&mut buffer)
        .with_context(|| format!("error reading {what}"))?;
    serde_json::from_str(&buffer).with_context(|| format!("error deserializing {what}"))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

use std::path::PathBuf;

use eyre::{Context, Result, bail};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use twistcube_core::twistmath::Vector3;
use twistcube_core::{LogicalIndex, Puzzle, Twist, parse_twists, resolve_twist};
use twistcube_view::{PuzzleSimulation, SimEvent, TwistRequest};
use twistprefs::Preferences;

/// twistcube command-line interface
///
/// Preferences are read from the built-in defaults, then `--prefs`, then
/// environment variables such as `TWISTCUBE_PUZZLE__ORDER=4`.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// YAML preferences file.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the canonical layout as JSON.
    Layout,
    /// Resolve a drag gesture into a twist and print it as JSON.
    Resolve {
        /// Drag vector, such as `1,0,0`.
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        drag: Vector3<f64>,
        /// Outward normal of the touched face, such as `0,1,0`.
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        normal: Vector3<f64>,
        /// Interpret the drag in world space, using the configured view
        /// orientation.
        #[arg(long)]
        world: bool,
    },
    /// Animate a sequence of twists with a simulated frame clock and print
    /// the final state as JSON.
    Play {
        /// Twists such as `R U R' U'`. Each turns the outer layer of its face.
        #[arg(default_value = "")]
        twists: String,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Number of random twists to apply before `twists`.
        #[arg(long, default_value_t = 0)]
        scramble: usize,
        /// Seed for the scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Undo every twist afterwards.
        #[arg(long)]
        undo: bool,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Layout => {
            let puzzle = Puzzle::new(prefs.puzzle.layout_params())?;
            let entries = puzzle
                .canonical()
                .iter()
                .map(|entry| {
                    let coords = puzzle.grid_coords(entry.index);
                    LayoutEntryOutput {
                        index: entry.index,
                        position: entry.position.into(),
                        depth: coords.map(|c| c.depth),
                        row: coords.map(|c| c.row),
                        col: coords.map(|c| c.col),
                    }
                })
                .collect_vec();
            write_json_output(&entries)
        }

        Subcommand::Resolve {
            drag,
            normal,
            world,
        } => {
            let twist = if world {
                PuzzleSimulation::new(&prefs)?.resolve_drag(drag, normal)
            } else {
                resolve_twist(drag, normal, prefs.interaction.ambiguity_tolerance)
            };
            write_json_output(&ResolveOutput {
                twist: twist.map(|t| t.to_string()),
            })
        }

        Subcommand::Play {
            twists,
            fps,
            scramble,
            seed,
            undo,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("frames per second must be positive");
            }
            let mut sim = PuzzleSimulation::new(&prefs)?;
            let mut moves = match seed {
                Some(seed) => {
                    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                    random_twists(&sim, scramble, &mut rng)
                }
                None => random_twists(&sim, scramble, &mut rand::rng()),
            };
            let twists = parse_twists(&twists).wrap_err("bad twist sequence")?;
            moves.extend(
                twists
                    .into_iter()
                    .map(|twist| (sim.puzzle().face_representative(twist.face), twist)),
            );

            let mut clock = FrameClock::new(fps);
            for &(touched, twist) in &moves {
                if sim.request_twist(touched, Some(twist)) != TwistRequest::Started {
                    bail!("twist {twist} at index {touched} was ignored");
                }
                clock.run_until_idle(&mut sim);
            }
            if undo {
                while sim.undo() == TwistRequest::Started {
                    clock.run_until_idle(&mut sim);
                }
            }

            let completed = sim
                .drain_events()
                .filter(|event| matches!(event, SimEvent::MoveCompleted { .. }))
                .count();
            let puzzle = sim.puzzle();
            let permutation_error = puzzle.check_permutation().err().map(|e| e.to_string());
            log::info!("played {completed} twists in {} frames", clock.frames);
            write_json_output(&PlayOutput {
                twists: moves.iter().map(|(_, twist)| twist.to_string()).collect(),
                completed,
                frames: clock.frames,
                indices: puzzle.cubes().iter_values().map(|cube| cube.index).collect(),
                solved: sim.is_solved(),
                permutation_ok: permutation_error.is_none(),
                permutation_error,
            })
        }

        Subcommand::Prefs => {
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

fn parse_vector(s: &str) -> Result<Vector3<f64>, String> {
    let components = s
        .split(',')
        .map(|x| x.trim().parse::<f64>().map_err(|e| format!("{x:?}: {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    match components.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected 3 comma-separated numbers, got {}", components.len())),
    }
}

fn random_twists(
    sim: &PuzzleSimulation,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<(LogicalIndex, Twist)> {
    let all_twists = Twist::iter().collect_vec();
    let slots = sim.puzzle().canonical().len() as LogicalIndex;
    let min_index = sim.puzzle().min_index();
    (0..count)
        .map(|_| {
            let touched = min_index + rng.random_range(0..slots);
            let twist = all_twists[rng.random_range(0..all_twists.len())];
            (touched, twist)
        })
        .collect()
}

/// Simulated frame clock, in milliseconds.
struct FrameClock {
    frame_duration: f64,
    now: f64,
    frames: usize,
}
impl FrameClock {
    fn new(fps: f64) -> Self {
        Self {
            frame_duration: 1000.0 / fps,
            now: 0.0,
            frames: 0,
        }
    }

    fn run_until_idle(&mut self, sim: &mut PuzzleSimulation) {
        while sim.is_rotating() {
            sim.step(self.now);
            self.now += self.frame_duration;
            self.frames += 1;
        }
    }
}

#[derive(Serialize, Debug)]
struct LayoutEntryOutput {
    index: LogicalIndex,
    position: [f64; 3],
    depth: Option<usize>,
    row: Option<usize>,
    col: Option<usize>,
}

#[derive(Serialize, Debug)]
struct ResolveOutput {
    twist: Option<String>,
}

#[derive(Serialize, Debug)]
struct PlayOutput {
    twists: Vec<String>,
    completed: usize,
    frames: usize,
    indices: Vec<LogicalIndex>,
    solved: bool,
    permutation_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    permutation_error: Option<String>,
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

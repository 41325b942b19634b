//! Face-Turn Animator
//!
//! Scrambles a 3x3x3 block cube with animated face turns. Runs headless to
//! produce and replay move sequences, or opens an interactive 3D viewer that
//! plays the scramble turn by turn.

mod visualization;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubeturn::grid::format_cube;
use cubeturn::{persistence, AnimatorConfig, FaceTurnAnimator, Move, Scramble, ScrambleRunner};

/// Animates face turns of a 3x3x3 block cube.
#[derive(Parser)]
#[command(name = "cubeturn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a random scramble headless and save it to disk.
    Scramble {
        #[command(flatten)]
        scramble: ScrambleArgs,
        /// Where to save the sequence.
        #[arg(short, long, default_value = persistence::SCRAMBLE_TXT)]
        out: PathBuf,
    },
    /// Replay a saved sequence headless and print the resulting layout.
    Replay {
        #[arg(short, long, default_value = persistence::SCRAMBLE_TXT)]
        file: PathBuf,
        #[command(flatten)]
        animation: AnimationArgs,
    },
    /// Print the keyframes generated for a move on a solved cube.
    Curves {
        /// Move in standard notation, e.g. R or U'.
        #[arg(value_name = "MOVE")]
        mv: String,
        #[command(flatten)]
        animation: AnimationArgs,
    },
    /// Play a scramble in an interactive 3D viewer.
    Display {
        #[command(flatten)]
        scramble: ScrambleArgs,
    },
}

#[derive(Args, Clone, Default)]
struct AnimationArgs {
    /// Use the slower intro turn speed.
    #[arg(long)]
    intro: bool,
    /// Distance between block centers.
    #[arg(long)]
    spacing: Option<f32>,
    /// Frames per quarter turn.
    #[arg(long)]
    turn_frames: Option<u32>,
    /// Animation frames per second.
    #[arg(long)]
    frame_rate: Option<f32>,
}

impl AnimationArgs {
    fn config(&self) -> AnimatorConfig {
        let mut config = if self.intro {
            AnimatorConfig::intro()
        } else {
            AnimatorConfig::default()
        };
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(turn_frames) = self.turn_frames {
            config.turn_frames = turn_frames;
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        config
    }
}

#[derive(Args, Clone)]
struct ScrambleArgs {
    /// Number of random moves.
    #[arg(short, long, default_value_t = 100)]
    count: usize,
    /// Seed for a reproducible scramble.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Play this sequence instead of a random one, e.g. "L'R'UDFBL'R'".
    #[arg(long)]
    moves: Option<String>,
    #[command(flatten)]
    animation: AnimationArgs,
}

impl Default for ScrambleArgs {
    fn default() -> Self {
        Self {
            count: 100,
            seed: None,
            moves: None,
            animation: AnimationArgs::default(),
        }
    }
}

impl ScrambleArgs {
    fn scramble(&self) -> cubeturn::TurnResult<Scramble> {
        if let Some(notation) = &self.moves {
            return Scramble::parse(notation);
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Scramble::random(self.count, &mut rng))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Scramble { scramble, out }) => run_scramble(&scramble, &out),
        Some(Command::Replay { file, animation }) => run_replay(&file, &animation),
        Some(Command::Curves { mv, animation }) => run_curves(&mv, &animation),
        Some(Command::Display { scramble }) => run_display(&scramble),
        // default: play the intro sequence in the viewer
        None => run_display(&ScrambleArgs {
            moves: Some(visualization::INTRO_SEQUENCE.to_string()),
            animation: AnimationArgs {
                intro: true,
                ..AnimationArgs::default()
            },
            ..ScrambleArgs::default()
        }),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Plays a sequence headless and returns the animator in its final state.
fn play_headless(
    config: AnimatorConfig,
    scramble: &Scramble,
) -> cubeturn::TurnResult<FaceTurnAnimator> {
    let mut animator = FaceTurnAnimator::new(config)?;
    let progress = ScrambleRunner::new(scramble).run(&mut animator)?;
    log::info!(
        "played {} moves, {} curve sets cached ({} reused)",
        progress.completed,
        animator.cache().len(),
        animator.cache().hits()
    );
    Ok(animator)
}

/// Runs a scramble, saves it to disk, and prints the final layout.
fn run_scramble(args: &ScrambleArgs, out: &Path) -> cubeturn::TurnResult<()> {
    let scramble = args.scramble()?;
    let animator = play_headless(args.animation.config(), &scramble)?;

    if let Err(e) = persistence::save(out, &scramble, animator.cube()) {
        eprintln!("Failed to save scramble: {}", e);
    } else {
        println!("Played {} moves", scramble.len());
        println!("Wrote {}", out.display());
    }
    print!("{}", format_cube(animator.cube()));
    Ok(())
}

/// Loads a saved sequence and replays it.
fn run_replay(file: &Path, args: &AnimationArgs) -> cubeturn::TurnResult<()> {
    let scramble = match persistence::load(file) {
        Ok(scramble) => scramble,
        Err(e) => {
            eprintln!("Failed to load {}: {}", file.display(), e);
            eprintln!("Run 'cubeturn scramble' first.");
            return Ok(());
        }
    };

    let animator = play_headless(args.config(), &scramble)?;
    println!("Replayed {} moves", scramble.len());
    print!("{}", format_cube(animator.cube()));
    if animator.cube().is_solved() {
        println!("Cube is solved");
    }
    Ok(())
}

/// Prints the position and orientation keyframes of every block in a move.
fn run_curves(notation: &str, args: &AnimationArgs) -> cubeturn::TurnResult<()> {
    let mv: Move = notation.parse()?;
    let mut animator = FaceTurnAnimator::new(args.config())?;

    println!("{mv}: pivot {}", animator.pivot(mv.face));
    for track in animator.preview(mv) {
        println!("block {}", animator.cube().block(track.block).name());
        let keys = track
            .curves
            .position
            .keys()
            .iter()
            .zip(track.curves.orientation.keys());
        for (position, orientation) in keys {
            let p = position.value;
            let q = orientation.value;
            println!(
                "  {:>3}  pos ({:>7.4}, {:>7.4}, {:>7.4})  rot ({:>7.4}, {:>7.4}, {:>7.4}, {:>7.4})",
                position.frame, p.x, p.y, p.z, q.x, q.y, q.z, q.w
            );
        }
    }
    Ok(())
}

/// Opens the viewer on a scramble.
fn run_display(args: &ScrambleArgs) -> cubeturn::TurnResult<()> {
    let config = args.animation.config();
    config.validate()?;
    let scramble = args.scramble()?;
    println!("Controls: L/R/U/D/F/B turn (shift reverses), N new scramble, Space pause");
    visualization::display(config, scramble);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "cubeturn",
            "replay",
            "--intro",
            "--spacing",
            "1.0",
            "--frame-rate",
            "30",
        ])
        .unwrap();
        let Some(Command::Replay { animation, .. }) = cli.command else {
            panic!("expected replay");
        };
        let config = animation.config();
        assert_eq!(config.turn_frames, AnimatorConfig::intro().turn_frames);
        assert_eq!(config.spacing, 1.0);
        assert_eq!(config.frame_rate, 30.0);
    }

    #[test]
    fn test_scramble_args_prefer_explicit_moves() {
        let args = ScrambleArgs {
            moves: Some("RU'".to_string()),
            ..ScrambleArgs::default()
        };
        assert_eq!(args.scramble().unwrap().to_string(), "RU'");

        let seeded = ScrambleArgs {
            count: 12,
            seed: Some(3),
            ..ScrambleArgs::default()
        };
        assert_eq!(seeded.scramble().unwrap(), seeded.scramble().unwrap());
        assert_eq!(seeded.scramble().unwrap().len(), 12);
    }

    #[test]
    fn test_headless_play_keeps_grid_invariants() {
        let scramble = Scramble::random(30, &mut StdRng::seed_from_u64(11));
        let animator = play_headless(AnimatorConfig::default(), &scramble).unwrap();
        assert!(animator.cube().check_invariants().is_empty());
        assert!(animator.is_idle());
    }
}

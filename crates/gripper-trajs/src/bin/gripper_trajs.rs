use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use gripper_trajs::core::{init_with_level, TrajectoryParams};
use gripper_trajs::dataset::{export_dataset, DatasetConfig};
use gripper_trajs::eval::{run_eval, EvalConfig};
use gripper_trajs::gif::{build_gifs, GifConfig};

#[derive(Parser)]
#[command(
    name = "gripper-trajs",
    about = "Evaluation and post-processing for gripper-detection rollouts",
    version
)]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct TrajectoryArgs {
    /// Width below which the gripper counts as closed.
    #[arg(long, default_value_t = TrajectoryParams::default().close_threshold)]
    threshold: f64,

    /// Lead of the width annotation over the camera stream, in steps.
    #[arg(long, default_value_t = TrajectoryParams::default().width_offset)]
    width_offset: usize,
}

impl TrajectoryArgs {
    fn params(&self) -> TrajectoryParams {
        TrajectoryParams {
            close_threshold: self.threshold,
            width_offset: self.width_offset,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render bounding-box overlays and trajectory images per sequence.
    Eval {
        /// Directory of per-sequence detection records (*.json).
        #[arg(long)]
        detections: PathBuf,

        /// Directory of robot-state annotation records.
        #[arg(long)]
        annotations: PathBuf,

        /// Output root for rendered images.
        #[arg(long)]
        out: PathBuf,

        /// Skip the bounding-box overlay pass.
        #[arg(long)]
        no_bboxes: bool,

        /// Skip the trajectory pass.
        #[arg(long)]
        no_trajs: bool,

        /// Only render the trajectory of the first frame of each sequence.
        #[arg(long)]
        first_only: bool,

        #[command(flatten)]
        trajectory: TrajectoryArgs,
    },

    /// Assemble per-sequence trajectory GIFs from an eval output root.
    Gifs {
        /// Eval output root (<root>/<sequence>/trajs/*.jpg).
        #[arg(long)]
        eval_root: PathBuf,

        /// Destination directory for the GIFs.
        #[arg(long)]
        dest: PathBuf,

        /// Per-frame display time in milliseconds.
        #[arg(long, default_value_t = 200)]
        delay_ms: u32,
    },

    /// Export trajectory keypoints as a JSONL fine-tuning dataset.
    ExportDataset {
        /// Directory of per-sequence detection records (*.json).
        #[arg(long)]
        detections: PathBuf,

        /// Directory of robot-state annotation records.
        #[arg(long)]
        annotations: PathBuf,

        /// Output JSONL file.
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        trajectory: TrajectoryArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_with_level(level)?;

    match cli.command {
        Command::Eval {
            detections,
            annotations,
            out,
            no_bboxes,
            no_trajs,
            first_only,
            trajectory,
        } => {
            let mut config = EvalConfig::new(detections, annotations, out);
            config.visualize_boxes = !no_bboxes;
            config.build_trajectories = !no_trajs;
            config.first_only = first_only;
            config.params = trajectory.params();

            let summary = run_eval(&config)?;
            println!(
                "{} sequences evaluated, {} failed",
                summary.sequences, summary.failures
            );
            if summary.failures > 0 {
                std::process::exit(1);
            }
        }
        Command::Gifs {
            eval_root,
            dest,
            delay_ms,
        } => {
            let mut config = GifConfig::new(eval_root, dest);
            config.frame_delay_ms = delay_ms;

            let written = build_gifs(&config)?;
            println!("{written} GIFs written");
        }
        Command::ExportDataset {
            detections,
            annotations,
            out,
            trajectory,
        } => {
            let mut config = DatasetConfig::new(detections, annotations, out);
            config.params = trajectory.params();

            let written = export_dataset(&config)?;
            println!("{written} dataset records written");
        }
    }

    Ok(())
}

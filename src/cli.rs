//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use rest_action_detector::detect::TaskKind;

/// Detect a rest action from a stream of pose landmarks
#[derive(Parser, Debug)]
#[command(name = "rest-action-detector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Action to detect: drink-water, leave-seat or stretch
    #[arg(short, long)]
    pub task: TaskKind,

    /// JSON-lines frame file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub frames: String,

    /// Session timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

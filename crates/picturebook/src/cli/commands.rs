//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use picturebook::StoryId;
use std::path::PathBuf;

/// Picturebook - illustrated, narrated children's storybooks from a prompt
#[derive(Parser, Debug)]
#[command(name = "picturebook")]
#[command(about = "Illustrated, narrated children's storybooks from a prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a storybook from a prompt
    Generate {
        /// What the story should be about
        #[arg(short, long)]
        prompt: String,

        /// short, normal, long or extended; unknown values mean normal
        #[arg(short, long)]
        length: Option<String>,

        /// Directory for every artifact (overrides `output_dir`)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the bundle of a previous run
    Show {
        /// 8-character story id
        story_id: StoryId,

        /// Directory the run wrote to (overrides `output_dir`)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Report which provider credentials are configured
    Check,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// The run manifest as JSON
    Json,
}

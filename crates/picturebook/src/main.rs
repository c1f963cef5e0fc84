//! Picturebook CLI binary.
//!
//! This binary provides command-line access to Picturebook:
//! - Generate a storybook from a prompt
//! - Show the bundle of a previous run
//! - Check which provider credentials are configured

use clap::Parser;
use picturebook::observability::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check, generate, show};

    // Keys in .env must be visible before configuration loads
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    match cli.command {
        Commands::Generate {
            prompt,
            length,
            output_dir,
            format,
        } => {
            generate(&prompt, length.as_deref(), output_dir, format).await?;
        }

        Commands::Show {
            story_id,
            output_dir,
            format,
        } => {
            show(&story_id, output_dir, format).await?;
        }

        Commands::Check => {
            check()?;
        }
    }

    Ok(())
}

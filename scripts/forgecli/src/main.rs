use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use forgecli::{gateway_config, generate, render};
use logicforge::error::{ErrorSource, ForgeError};
use logicforge::session::PRESETS;

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate digital logic designs from natural-language descriptions"
)]
pub struct Args {
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a design and write its sources and diagrams.
    Generate {
        /// The circuit description.
        prompt: String,
        /// The output directory.
        #[arg(short, long)]
        output: PathBuf,
        /// A TOML gateway configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render an existing design JSON file.
    Render {
        /// The design file.
        design: PathBuf,
        /// The output directory.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the example prompts.
    Presets,
}

fn report(err: &ForgeError) {
    match err.source() {
        ErrorSource::Gateway(err) => eprintln!("Error: {}", err.user_message()),
        _ => eprintln!("{err}"),
    }
}

pub fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let result = match args.command {
        Command::Generate {
            prompt,
            output,
            config,
        } => gateway_config(config.as_deref()).and_then(|cfg| generate(&prompt, output, cfg)),
        Command::Render { design, output } => render(design, output),
        Command::Presets => {
            for preset in PRESETS {
                println!("{preset}");
            }
            Ok(Vec::new())
        }
    };

    match result {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

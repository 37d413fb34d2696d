//! CLI frontend for Scenecraft: create, inspect, and run projects headlessly.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sc",
    about = "Scenecraft: run authored 2D game scenes without a renderer",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project file from a starter preset
    Init {
        /// Project name; the file is written to `<name>.json`
        name: String,

        /// Starter preset: empty, platformer, rpg, racing, shooter, chase
        #[arg(short, long, default_value = "platformer")]
        preset: String,
    },

    /// Parse and validate a project, reporting warnings and errors
    Check {
        /// Project JSON file
        file: PathBuf,
    },

    /// List the scenes of a project
    Scenes {
        /// Project JSON file
        file: PathBuf,
    },

    /// Show the objects, rules, and variables of one scene
    Show {
        /// Project JSON file
        file: PathBuf,

        /// Scene id or name (case-insensitive)
        scene: String,
    },

    /// Run a project headlessly and report what happened
    Run {
        /// Project JSON file
        file: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,

        /// Start in this scene (id or name) instead of the current one
        #[arg(long)]
        scene: Option<String>,

        /// Hold a key: CODE@START..END (end exclusive) or CODE@TICK; repeatable
        #[arg(short, long = "keys")]
        keys: Vec<String>,

        /// Comma-separated keys, each held with probability 0.5 every tick
        #[arg(long)]
        random_keys: Option<String>,

        /// RNG seed for --random-keys
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Host milliseconds per tick
        #[arg(long, default_value = "16.67")]
        frame_ms: f64,

        /// Print every event instead of a summary
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run a project and write the final frame as JSON
    Export {
        /// Project JSON file
        file: PathBuf,

        /// Number of ticks to simulate before capturing
        #[arg(short, long, default_value = "0")]
        ticks: u64,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name, preset } => commands::init::run(&name, &preset),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Scenes { file } => commands::scenes::run(&file),
        Commands::Show { file, scene } => commands::show::run(&file, &scene),
        Commands::Run {
            file,
            ticks,
            scene,
            keys,
            random_keys,
            seed,
            frame_ms,
            verbose,
        } => commands::run::run(
            &file,
            &commands::run::RunOptions {
                ticks,
                scene,
                keys,
                random_keys,
                seed,
                frame_ms,
                verbose,
            },
        ),
        Commands::Export {
            file,
            ticks,
            output,
        } => commands::export::run(&file, ticks, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

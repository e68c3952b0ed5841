//! `brickyard`: headless tool over saved brick builds.
//!
//! Reads and writes the same JSON build records the editor saves, and runs
//! placements through the editor's own resolver so the rules match.

mod report;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use editor::block::{BuildRecord, Footprint, Rotation};
use editor::config::EngineConfig;
use editor::consts::{DEFAULT_BUILD_NAME, DEFAULT_COLOR, DEFAULT_FOOTPRINT};
use editor::engine::EngineCore;
use editor::error::EditorError;
use editor::grid::Cell;
use editor::hit::HitResult;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Editor(#[from] EditorError),
}

#[derive(Parser, Debug)]
#[command(name = "brickyard", about = "Inspect and edit saved brick builds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarise a build: block count, occupied cells, tallest stack, bounds.
    Inspect { file: PathBuf },
    /// Print the stack height of every cell as a text grid.
    Heights { file: PathBuf },
    /// Place one block on the ground at a cell, stacking on what is there.
    Place {
        file: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, allow_negative_numbers = true)]
        y: i32,
        #[arg(long = "type", env = "BRICKYARD_TYPE", default_value = DEFAULT_FOOTPRINT)]
        kind: Footprint,
        #[arg(long, env = "BRICKYARD_COLOR", default_value = DEFAULT_COLOR)]
        color: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotation: i32,
        /// Write the result here instead of back to FILE.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write an empty build.
    New {
        file: PathBuf,
        #[arg(long, default_value = DEFAULT_BUILD_NAME)]
        name: String,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    match cli.command {
        Command::Inspect { file } => {
            let engine = load(&file, config)?;
            println!("{}", report::Summary::of(&engine));
            Ok(())
        }
        Command::Heights { file } => {
            let engine = load(&file, config)?;
            print!("{}", report::height_grid(engine.heights()));
            Ok(())
        }
        Command::Place { file, x, y, kind, color, rotation, out } => {
            let mut engine = load(&file, config)?;
            engine.set_active_footprint(kind);
            engine.set_active_color(color);
            engine.set_active_rotation(Rotation::from_degrees(rotation)?);

            let hit = HitResult::Ground { cell: Cell::new(x, y) };
            let placement = engine.resolve_hit(&hit).ok_or(EditorError::NoPlacement)?;
            engine.place(placement)?;
            let block = engine.selected_block().ok_or(EditorError::NoPlacement)?;
            tracing::info!(x = block.x, y = block.y, layer = block.z, kind = %block.footprint, "placed");
            println!("placed {} at ({}, {}) layer {}", block.footprint, block.x, block.y, block.z);

            save(out.as_deref().unwrap_or(file.as_path()), &engine.save_build())
        }
        Command::New { file, name } => {
            let build = BuildRecord { name, blocks: Vec::new() };
            save(&file, &build)?;
            println!("wrote {}", file.display());
            Ok(())
        }
    }
}

fn load(path: &Path, config: EngineConfig) -> Result<EngineCore, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let build = BuildRecord::from_json(&raw)?;
    let mut engine = EngineCore::with_config(config);
    engine.load_build(&build, None)?;
    Ok(engine)
}

fn save(path: &Path, build: &BuildRecord) -> Result<(), CliError> {
    let json = build.to_json()?;
    fs::write(path, json + "\n").map_err(|source| CliError::Write { path: path.to_path_buf(), source })
}
